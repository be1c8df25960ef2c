//! # Storefront Checkout
//!
//! > **The checkout and order-placement flow of a retail storefront, as a Tokio actor.**
//!
//! A shopper arrives at checkout with either a cart or a single product chosen on a
//! product page. This crate resolves that selection, prices it live as the quantity
//! changes, sends signed-out shoppers through login and back, places the order and
//! reports the result.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One actor per checkout
//! All flow state (selection, quantity, submission state) is owned by a single
//! [`CheckoutActor`](checkout::CheckoutActor) task and changed one message at a time.
//! - **No locks on flow state**: the actor is the only writer.
//! - **At most one order in flight**: the submission state machine ignores a second submit
//!   while the first is outstanding.
//! - **Responsive while waiting**: network calls run on spawned tasks and report back to
//!   the actor, so quantity edits and duplicate clicks are handled during a request.
//!
//! ### Async Context Injection
//! The storefront APIs and host seams (session, router, notifications) are injected via
//! `run()`, not at construction. See [`clients::Collaborators`].
//!
//! ### Observability
//! `tracing` everywhere with structured fields. See the [`lifecycle::tracing`] module.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Controller ([`checkout`])
//! - **Role**: Owns the flow and publishes a render-ready [`CheckoutView`](checkout::CheckoutView).
//! - **Key items**: [`CheckoutClient`](checkout::CheckoutClient), [`OrderSubmitter`](checkout::OrderSubmitter).
//!
//! ### 2. The Selection ([`selection`], [`pricing`])
//! - **Role**: Loads a cart or product into a [`Selection`](selection::Selection) and prices it.
//! - **Key items**: [`SelectionLoader`](selection::SelectionLoader), [`Quantity`](pricing::Quantity), [`format_price`](pricing::format_price).
//!
//! ### 3. The Interface ([`clients`], [`navigation`])
//! - **Role**: The traits the flow consumes, an in-memory storefront, a test mock, and the
//!   query/redirect encoding of the checkout page.
//! - **Key items**: [`OrderApi`](clients::OrderApi), [`MockStorefront`](clients::mock::MockStorefront), [`login_redirect`](navigation::login_redirect).
//!
//! ### 4. The Orchestrator ([`lifecycle`], [`config`])
//! - **Role**: Spawns the actor with its collaborators and shuts it down.
//! - **Key items**: [`CheckoutSystem`](lifecycle::CheckoutSystem), [`CheckoutConfig`](config::CheckoutConfig).
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! # Run with info logs
//! RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod checkout;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod navigation;
pub mod pricing;
pub mod selection;
