//! Startup, shutdown and tracing setup.

pub mod checkout_system;
pub mod tracing;

pub use checkout_system::CheckoutSystem;
pub use self::tracing::setup_tracing;
