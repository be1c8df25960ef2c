//! # Collaborator traits
//!
//! The checkout flow never talks to a backend or a router directly. Everything it
//! consumes is one of these traits, injected into the actor through [`Collaborators`]
//! when it starts running (see [`crate::checkout::CheckoutActor::run`]).
//!
//! | Trait | Kind | Used for |
//! |-------|------|----------|
//! | [`CartApi`] | async read | cart checkouts |
//! | [`ProductApi`] | async read | single-product checkouts |
//! | [`OrderApi`] | async write | placing the order |
//! | [`SessionStatus`] | sync read | the authentication gate |
//! | [`Navigator`] | sync | login redirect and post-success exits |
//! | [`Notifier`] | sync | blocking failure notifications |

use super::ApiError;
use crate::model::{Cart, OrderReceipt, OrderRequest, Product, ProductId};
use async_trait::async_trait;
use std::sync::Arc;

/// Reads the current shopper cart.
#[async_trait]
pub trait CartApi: Send + Sync {
    async fn fetch_cart(&self) -> Result<Cart, ApiError>;
}

/// Reads one product including its variants.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn fetch_product(&self, id: &ProductId) -> Result<Product, ApiError>;
}

/// Creates orders. The only mutating call the checkout flow makes.
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn create_order(&self, request: OrderRequest) -> Result<OrderReceipt, ApiError>;
}

/// Read-only view of the externally owned session store.
pub trait SessionStatus: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

/// Hands control to the routing layer.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Shows a blocking notification to the shopper.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Everything the checkout actor depends on, injected at `run()` time.
#[derive(Clone)]
pub struct Collaborators {
    pub carts: Arc<dyn CartApi>,
    pub products: Arc<dyn ProductApi>,
    pub orders: Arc<dyn OrderApi>,
    pub session: Arc<dyn SessionStatus>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

impl Collaborators {
    /// Wires a single backend implementing all three storefront APIs.
    pub fn from_storefront<S>(
        storefront: Arc<S>,
        session: Arc<dyn SessionStatus>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self
    where
        S: CartApi + ProductApi + OrderApi + 'static,
    {
        Self {
            carts: storefront.clone(),
            products: storefront.clone(),
            orders: storefront,
            session,
            navigator,
            notifier,
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("authenticated", &self.session.is_authenticated())
            .finish_non_exhaustive()
    }
}
