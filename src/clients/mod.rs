//! Collaborators of the checkout flow: storefront APIs, session, routing and notifications.

pub mod api;
pub mod error;
pub mod in_memory;
pub mod mock;
pub mod shell;

pub use api::*;
pub use error::*;
pub use in_memory::{InMemoryStorefront, PlacedOrder};
pub use shell::{RecordingNavigator, RecordingNotifier, SessionFlag};
