//! # In-memory storefront
//!
//! A self-contained implementation of [`CartApi`], [`ProductApi`] and [`OrderApi`] backed
//! by in-process collections. It stands in for the remote backend in the demo binary and
//! in end-to-end tests.
//!
//! Server-side rules it enforces (the checkout flow itself never pre-validates these):
//! - an order for an empty cart is rejected;
//! - an order for an unknown product or variant is rejected;
//! - a successful cart order empties the cart.

use super::{ApiError, CartApi, OrderApi, ProductApi};
use crate::model::{Cart, OrderId, OrderReceipt, OrderRequest, Product, ProductId};
use crate::pricing::{line_total, unit_price};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// An order accepted by the in-memory storefront.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub id: OrderId,
    pub request: OrderRequest,
    pub total: Decimal,
}

/// Catalog, cart and order book held in memory.
#[derive(Debug)]
pub struct InMemoryStorefront {
    products: RwLock<HashMap<ProductId, Product>>,
    cart: RwLock<Cart>,
    orders: RwLock<Vec<PlacedOrder>>,
    next_order_id: AtomicU64,
}

impl Default for InMemoryStorefront {
    fn default() -> Self {
        Self::new(Cart::new("cart_1"))
    }
}

impl InMemoryStorefront {
    /// Creates a storefront with an empty catalog and the given shopper cart.
    pub fn new(cart: Cart) -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
            cart: RwLock::new(cart),
            orders: RwLock::new(Vec::new()),
            next_order_id: AtomicU64::new(1),
        }
    }

    pub fn with_product(self, product: Product) -> Self {
        if let Ok(mut products) = self.products.write() {
            products.insert(product.id.clone(), product);
        }
        self
    }

    pub fn set_cart(&self, cart: Cart) -> Result<(), ApiError> {
        *self.cart.write().map_err(|_| poisoned())? = cart;
        Ok(())
    }

    /// Orders placed so far, oldest first.
    pub fn orders(&self) -> Vec<PlacedOrder> {
        self.orders.read().map(|o| o.clone()).unwrap_or_default()
    }

    fn next_order_id(&self) -> OrderId {
        let id = self.next_order_id.fetch_add(1, Ordering::SeqCst);
        OrderId(format!("order_{id}"))
    }

    fn price_request(&self, request: &OrderRequest) -> Result<Decimal, ApiError> {
        match request {
            OrderRequest::Cart { cart_id } => {
                let mut cart = self.cart.write().map_err(|_| poisoned())?;
                if &cart.id != cart_id {
                    return Err(ApiError::NotFound(format!("cart {cart_id}")));
                }
                if cart.items.is_empty() {
                    return Err(ApiError::Rejected("Your cart is empty".to_string()));
                }
                let total = cart
                    .items
                    .iter()
                    .map(|item| line_total(unit_price(&item.product, item.variant.as_ref()), item.quantity))
                    .sum();
                cart.items.clear();
                Ok(total)
            }
            OrderRequest::Single {
                product_id,
                variant_id,
                quantity,
            } => {
                if *quantity == 0 {
                    return Err(ApiError::Rejected("Quantity must be at least 1".to_string()));
                }
                let products = self.products.read().map_err(|_| poisoned())?;
                let product = products
                    .get(product_id)
                    .ok_or_else(|| ApiError::Rejected(format!("Product {product_id} is not available")))?;
                let variant = match variant_id {
                    Some(id) => Some(
                        product
                            .variant(id)
                            .ok_or_else(|| ApiError::Rejected(format!("Variant {id} is not available")))?,
                    ),
                    None => None,
                };
                Ok(line_total(unit_price(product, variant), *quantity))
            }
        }
    }
}

fn poisoned() -> ApiError {
    ApiError::Transport("storefront state is unavailable".to_string())
}

#[async_trait]
impl CartApi for InMemoryStorefront {
    #[instrument(skip(self))]
    async fn fetch_cart(&self) -> Result<Cart, ApiError> {
        let cart = self.cart.read().map_err(|_| poisoned())?.clone();
        debug!(cart_id = %cart.id, items = cart.items.len(), "Fetched cart");
        Ok(cart)
    }
}

#[async_trait]
impl ProductApi for InMemoryStorefront {
    #[instrument(skip(self))]
    async fn fetch_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        let product = products.get(id).cloned();
        debug!(product_id = %id, found = product.is_some(), "Fetched product");
        product.ok_or_else(|| ApiError::NotFound(format!("product {id}")))
    }
}

#[async_trait]
impl OrderApi for InMemoryStorefront {
    #[instrument(skip(self))]
    async fn create_order(&self, request: OrderRequest) -> Result<OrderReceipt, ApiError> {
        let total = match self.price_request(&request) {
            Ok(total) => total,
            Err(e) => {
                warn!(error = %e, "Order rejected");
                return Err(e);
            }
        };
        let id = self.next_order_id();
        let mut orders = self.orders.write().map_err(|_| poisoned())?;
        orders.push(PlacedOrder {
            id: id.clone(),
            request,
            total,
        });
        info!(order_id = %id, %total, size = orders.len(), "Order created");
        Ok(OrderReceipt { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartItem, Variant};

    fn storefront() -> InMemoryStorefront {
        let mug = Product::new("p-1", "Mug", Decimal::from(50));
        let tee = Product::new("p-2", "Tee", Decimal::from(100))
            .with_variant(Variant::new("v-xl", "XL", Decimal::from(120)));
        let cart = Cart::new("cart-9").with_item(CartItem::new("i-1", mug.clone(), 2));
        InMemoryStorefront::new(cart).with_product(mug).with_product(tee)
    }

    #[tokio::test]
    async fn test_cart_order_totals_and_empties_cart() {
        let store = storefront();

        let receipt = store.create_order(OrderRequest::cart("cart-9")).await.unwrap();
        assert_eq!(receipt.id, OrderId::from("order_1"));
        assert_eq!(store.orders()[0].total, Decimal::from(100));
        assert!(store.fetch_cart().await.unwrap().items.is_empty());

        let again = store.create_order(OrderRequest::cart("cart-9")).await;
        assert_eq!(again, Err(ApiError::Rejected("Your cart is empty".into())));
    }

    #[tokio::test]
    async fn test_single_order_uses_variant_price() {
        let store = storefront();
        store
            .create_order(OrderRequest::single("p-2", Some("v-xl".into()), 3))
            .await
            .unwrap();
        assert_eq!(store.orders()[0].total, Decimal::from(360));
    }

    #[tokio::test]
    async fn test_unknown_product_is_rejected() {
        let store = storefront();
        let result = store.create_order(OrderRequest::single("p-404", None, 1)).await;
        assert!(matches!(result, Err(ApiError::Rejected(_))));
        assert!(matches!(
            store.fetch_product(&"p-404".into()).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
