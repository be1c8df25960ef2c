use crate::navigation::NavigationError;
use thiserror::Error;

/// Errors returned by [`CheckoutClient`](super::CheckoutClient) calls.
///
/// Storefront failures are not in here: a failed load settles the flow into the empty
/// state and a failed order is reported through the notifier and the view.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Checkout actor closed")]
    ActorClosed,

    #[error("Checkout actor dropped response channel")]
    ActorDropped,

    /// Submit was requested while no selection is loaded.
    #[error("Nothing to check out")]
    NothingToCheckout,

    /// A confirmation exit was chosen before an order was placed.
    #[error("No order has been placed yet")]
    NotConfirmed,

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("Checkout task failed: {0}")]
    Shutdown(String),
}
