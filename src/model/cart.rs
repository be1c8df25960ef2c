//! The shopper's server-side cart.
use super::string_id;
use super::{Product, Variant};
use serde::{Deserialize, Serialize};

string_id! {
    /// Type-safe identifier for Carts.
    CartId
}

string_id! {
    /// Identifier of one entry inside a cart.
    CartItemId
}

/// The current shopper cart as returned by the cart API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(id: impl Into<CartId>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: CartItem) -> Self {
        self.items.push(item);
        self
    }
}

/// One cart entry. The quantity is owned by the cart and is not editable during checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product: Product,
    #[serde(default)]
    pub variant: Option<Variant>,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(id: impl Into<CartItemId>, product: Product, quantity: u32) -> Self {
        Self {
            id: id.into(),
            product,
            variant: None,
            quantity,
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }
}
