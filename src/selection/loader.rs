//! Resolves navigation parameters into a [`Selection`] using the read-only storefront APIs.

use super::{CartSelection, LineItem, Selection, SingleSelection};
use crate::clients::{ApiError, CartApi, Collaborators, ProductApi};
use crate::model::ProductId;
use crate::navigation::NavigationParams;
use crate::pricing::Quantity;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Errors that can occur while loading a selection.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error("Failed to load cart: {0}")]
    Cart(#[source] ApiError),

    #[error("Failed to load product {0}: {1}")]
    Product(ProductId, #[source] ApiError),
}

/// Fetches carts and products for the checkout flow.
///
/// Loading has no side effects beyond the reads, so it is safe to repeat.
#[derive(Clone)]
pub struct SelectionLoader {
    carts: Arc<dyn CartApi>,
    products: Arc<dyn ProductApi>,
}

impl SelectionLoader {
    pub fn new(carts: Arc<dyn CartApi>, products: Arc<dyn ProductApi>) -> Self {
        Self { carts, products }
    }

    pub fn from_collaborators(ctx: &Collaborators) -> Self {
        Self::new(ctx.carts.clone(), ctx.products.clone())
    }

    /// Resolves `params` into a selection.
    ///
    /// A cart reference wins over a product reference. `Ok(None)` means there is nothing
    /// to check out. An unknown variant reference degrades to no variant.
    #[instrument(skip(self))]
    pub async fn load(&self, params: &NavigationParams) -> Result<Option<Selection>, LoadError> {
        if let Some(cart_id) = &params.cart_id {
            debug!(%cart_id, "Loading cart");
            let cart = self.carts.fetch_cart().await.map_err(LoadError::Cart)?;
            let lines: Vec<LineItem> = cart
                .items
                .into_iter()
                .map(|item| LineItem {
                    product: item.product,
                    variant: item.variant,
                    quantity: item.quantity,
                })
                .collect();
            info!(%cart_id, lines = lines.len(), "Cart resolved");
            return Ok(Some(Selection::Cart(CartSelection {
                cart_id: cart_id.clone(),
                lines,
            })));
        }

        let Some(product_id) = &params.product_id else {
            debug!("No cart or product reference");
            return Ok(None);
        };

        debug!(%product_id, "Loading product");
        let product = self
            .products
            .fetch_product(product_id)
            .await
            .map_err(|e| LoadError::Product(product_id.clone(), e))?;

        let variant = params.variant_id.as_ref().and_then(|variant_id| {
            let found = product.variant(variant_id).cloned();
            if found.is_none() {
                debug!(%product_id, %variant_id, "Variant not found, using product price");
            }
            found
        });
        let quantity = Quantity::from_hint(params.quantity.as_deref());

        info!(%product_id, variant = ?variant.as_ref().map(|v| &v.id), %quantity, "Product resolved");
        Ok(Some(Selection::Single(SingleSelection::new(product, variant, quantity))))
    }
}

impl std::fmt::Debug for SelectionLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionLoader").finish_non_exhaustive()
    }
}
