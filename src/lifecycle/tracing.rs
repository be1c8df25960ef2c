//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); structured fields such as
//! `order_id` and `generation` carry the context instead.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: start and shutdown of the checkout actor
//! - **Loads**: which reference is fetched, the resolved selection, failures (`warn`)
//! - **Submissions**: login redirects, placed orders, failures with the shopper message
//! - **Stale work**: loads and orders that finished after the checkout was reopened
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Quantity edits, ignored submits and full payloads
//! RUST_LOG=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**, a buy-now checkout for a signed-in shopper:
//!
//! ```text
//! INFO Checkout actor started ctx=Collaborators { authenticated: true, .. }
//! INFO open: Loading checkout generation=1 params=NavigationParams { .. }
//! INFO load: Product resolved product_id=p-1 variant=Some(VariantId("v-2")) quantity=2
//! INFO Checkout ready generation=1 total=240
//! INFO submit: Placing order request=Single { .. }
//! INFO create_order: Order created order_id=order_1 total=240 size=1
//! INFO Order placed order_id=order_1
//! ```

/// Installs the global subscriber. Calling it again is harmless.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Structured fields carry the context instead of module paths
        .compact()
        .try_init();
}
