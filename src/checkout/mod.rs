//! # Checkout flow
//!
//! The checkout controller is an actor ([`CheckoutActor`]) paired with a cloneable
//! handle ([`CheckoutClient`]). The handle sends requests; the actor owns the selection,
//! the quantity and the submission state, and publishes a [`CheckoutView`] after every
//! change.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront_checkout::checkout;
//! use storefront_checkout::clients::{Collaborators, InMemoryStorefront, RecordingNavigator, RecordingNotifier, SessionFlag};
//! use storefront_checkout::config::CheckoutConfig;
//! use storefront_checkout::navigation::NavigationParams;
//!
//! # async fn demo() -> Result<(), storefront_checkout::checkout::CheckoutError> {
//! let ctx = Collaborators::from_storefront(
//!     Arc::new(InMemoryStorefront::default()),
//!     Arc::new(SessionFlag::new(true)),
//!     Arc::new(RecordingNavigator::new()),
//!     Arc::new(RecordingNotifier::new()),
//! );
//!
//! let (actor, client) = checkout::new(CheckoutConfig::default());
//! tokio::spawn(actor.run(ctx));
//!
//! client.open(NavigationParams::product("p-1").with_quantity_hint("2")).await?;
//! let view = client.wait_for(|v| v.status != checkout::CheckoutStatus::Loading).await?;
//! println!("{}", view.total_display);
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod state;
pub mod view;

pub use actor::CheckoutActor;
pub use client::CheckoutClient;
pub use error::CheckoutError;
pub use message::{CheckoutRequest, QuantityStep, Response};
pub use state::{OrderSubmitter, Phase, SubmissionState, SubmitOutcome, SubmitStep};
pub use view::{CheckoutStatus, CheckoutView, Confirmation, ConfirmationExit, LineView};

use crate::config::CheckoutConfig;
use tokio::sync::{mpsc, watch};

/// Creates a checkout actor and its client.
pub fn new(config: CheckoutConfig) -> (CheckoutActor, CheckoutClient) {
    let (sender, receiver) = mpsc::channel(config.channel_capacity.max(1));
    let (views_tx, views_rx) = watch::channel(CheckoutView::render(
        &Phase::Empty,
        &SubmissionState::Idle,
        None,
        &config,
    ));
    let actor = CheckoutActor::new(receiver, views_tx, config);
    let client = CheckoutClient::new(sender, views_rx);
    (actor, client)
}
