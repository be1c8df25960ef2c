//! Order-creation payloads and results.
//!
//! An [`OrderRequest`] is always built at submission time from the live selection
//! (see [`crate::selection::Selection::order_request`]); it is never cached.
use super::string_id;
use super::{CartId, ProductId, VariantId};
use serde::{Deserialize, Serialize};

string_id! {
    /// Type-safe identifier for Orders, assigned by the order API.
    OrderId
}

/// Payload for creating a new order.
///
/// A cart order carries only the cart reference: the server resolves the cart contents
/// authoritatively, so line items are never re-sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderRequest {
    #[serde(rename_all = "camelCase")]
    Cart { cart_id: CartId },
    #[serde(rename_all = "camelCase")]
    Single {
        product_id: ProductId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variant_id: Option<VariantId>,
        quantity: u32,
    },
}

impl OrderRequest {
    pub fn cart(cart_id: impl Into<CartId>) -> Self {
        Self::Cart {
            cart_id: cart_id.into(),
        }
    }

    pub fn single(product_id: impl Into<ProductId>, variant_id: Option<VariantId>, quantity: u32) -> Self {
        Self::Single {
            product_id: product_id.into(),
            variant_id,
            quantity,
        }
    }
}

/// Result of a successful `create_order` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub id: OrderId,
}

impl OrderReceipt {
    pub fn new(id: impl Into<OrderId>) -> Self {
        Self { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_request_serializes_cart_reference_only() {
        let encoded = form_encode(&OrderRequest::cart("cart-9"));
        assert_eq!(encoded, "cartId=cart-9");
    }

    #[test]
    fn test_single_request_omits_missing_variant() {
        let encoded = form_encode(&OrderRequest::single("p-1", None, 2));
        assert_eq!(encoded, "productId=p-1&quantity=2");

        let with_variant = form_encode(&OrderRequest::single("p-1", Some("v-2".into()), 2));
        assert_eq!(with_variant, "productId=p-1&variantId=v-2&quantity=2");
    }

    fn form_encode(request: &OrderRequest) -> String {
        serde_urlencoded::to_string(request).expect("order requests are flat")
    }
}
