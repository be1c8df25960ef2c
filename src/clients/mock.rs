//! # Mock Storefront & Testing Guide
//!
//! [`MockStorefront`] implements the same [`CartApi`], [`ProductApi`] and [`OrderApi`]
//! traits as a real backend but answers from a queue of expectations. It lets you test
//! the checkout actor deterministically, including failures and slow responses that are
//! hard to reproduce against a real server.
//!
//! ## When to use the mock vs the in-memory storefront
//!
//! | Feature | MockStorefront | InMemoryStorefront |
//! |---------|----------------|--------------------|
//! | **State** | None (expectations) | Real catalog, cart and order book |
//! | **Error Injection** | Easy (`return_err`) | Only via business rules |
//! | **Timing control** | `respond_later` holds a response | Always immediate |
//! | **Use Case** | Controller logic, re-entrancy, retries | End-to-end scenarios |
//!
//! ## Example
//!
//! ```rust
//! use storefront_checkout::clients::mock::MockStorefront;
//! use storefront_checkout::clients::{ApiError, OrderApi};
//! use storefront_checkout::model::OrderRequest;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockStorefront::new();
//!     mock.expect_create_order()
//!         .return_err(ApiError::Rejected("Out of stock".into()));
//!
//!     let result = mock.create_order(OrderRequest::cart("cart-9")).await;
//!     assert_eq!(result, Err(ApiError::Rejected("Out of stock".into())));
//!
//!     // Every expectation was consumed and every call was expected.
//!     mock.verify();
//! }
//! ```
//!
//! Calls that do not match the next expectation are answered with
//! `ApiError::Transport("unexpected ...")` and reported by [`MockStorefront::verify`].

use super::{ApiError, CartApi, OrderApi, ProductApi};
use crate::model::{Cart, OrderReceipt, OrderRequest, Product, ProductId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

/// Represents an expected call to the mock storefront.
enum Expectation {
    FetchCart {
        response: PendingResponse<Cart>,
    },
    FetchProduct {
        id: ProductId,
        response: PendingResponse<Product>,
    },
    CreateOrder {
        response: PendingResponse<OrderReceipt>,
    },
}

/// A canned answer, either immediate or held until the test releases it.
enum PendingResponse<T> {
    Ready(Result<T, ApiError>),
    Later(oneshot::Receiver<Result<T, ApiError>>),
}

impl<T> PendingResponse<T> {
    fn held() -> (oneshot::Sender<Result<T, ApiError>>, Self) {
        let (sender, receiver) = oneshot::channel();
        (sender, Self::Later(receiver))
    }

    async fn resolve(self) -> Result<T, ApiError> {
        match self {
            Self::Ready(response) => response,
            Self::Later(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(ApiError::Transport("held response was dropped".to_string()))),
        }
    }
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    order_requests: Vec<OrderRequest>,
    mismatches: Vec<String>,
}

/// A storefront double with expectation tracking for fluent testing.
///
/// Cloning shares the expectation queue, so one clone can be handed to the actor while
/// the test keeps another to add expectations and verify.
#[derive(Clone, Default)]
pub struct MockStorefront {
    state: Arc<Mutex<MockState>>,
}

fn lock(state: &Mutex<MockState>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockStorefront {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `fetch_cart` call.
    pub fn expect_fetch_cart(&self) -> FetchCartExpectationBuilder {
        FetchCartExpectationBuilder {
            state: self.state.clone(),
        }
    }

    /// Expects a `fetch_product` call for `id`.
    pub fn expect_fetch_product(&self, id: impl Into<ProductId>) -> FetchProductExpectationBuilder {
        FetchProductExpectationBuilder {
            id: id.into(),
            state: self.state.clone(),
        }
    }

    /// Expects a `create_order` call.
    pub fn expect_create_order(&self) -> CreateOrderExpectationBuilder {
        CreateOrderExpectationBuilder {
            state: self.state.clone(),
        }
    }

    /// Every request passed to `create_order`, in call order.
    pub fn order_requests(&self) -> Vec<OrderRequest> {
        lock(&self.state).order_requests.clone()
    }

    /// Number of expectations not yet consumed.
    pub fn remaining(&self) -> usize {
        lock(&self.state).expectations.len()
    }

    /// Verifies that all expectations were met and no unexpected call was made.
    ///
    /// # Panics
    /// Panics with the list of problems when verification fails.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.mismatches.is_empty() {
            panic!("Unexpected calls to mock storefront: {:?}", state.mismatches);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }

    fn next(&self, call: &str) -> Option<Expectation> {
        let mut state = lock(&self.state);
        let next = state.expectations.pop_front();
        if next.is_none() {
            state.mismatches.push(format!("{call} with no expectation left"));
        }
        next
    }

    fn mismatch(&self, message: String) -> ApiError {
        lock(&self.state).mismatches.push(message.clone());
        ApiError::Transport(format!("unexpected {message}"))
    }
}

#[async_trait]
impl CartApi for MockStorefront {
    async fn fetch_cart(&self) -> Result<Cart, ApiError> {
        match self.next("fetch_cart") {
            Some(Expectation::FetchCart { response }) => response.resolve().await,
            Some(_) => Err(self.mismatch("fetch_cart (another call was expected)".to_string())),
            None => Err(ApiError::Transport("unexpected fetch_cart".to_string())),
        }
    }
}

#[async_trait]
impl ProductApi for MockStorefront {
    async fn fetch_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        match self.next("fetch_product") {
            Some(Expectation::FetchProduct { id: expected, response }) if &expected == id => response.resolve().await,
            Some(Expectation::FetchProduct { id: expected, .. }) => {
                Err(self.mismatch(format!("fetch_product({id}), expected fetch_product({expected})")))
            }
            Some(_) => Err(self.mismatch(format!("fetch_product({id}) (another call was expected)"))),
            None => Err(ApiError::Transport("unexpected fetch_product".to_string())),
        }
    }
}

#[async_trait]
impl OrderApi for MockStorefront {
    async fn create_order(&self, request: OrderRequest) -> Result<OrderReceipt, ApiError> {
        lock(&self.state).order_requests.push(request);
        match self.next("create_order") {
            Some(Expectation::CreateOrder { response }) => response.resolve().await,
            Some(_) => Err(self.mismatch("create_order (another call was expected)".to_string())),
            None => Err(ApiError::Transport("unexpected create_order".to_string())),
        }
    }
}

/// Builder for `fetch_cart` expectations.
pub struct FetchCartExpectationBuilder {
    state: Arc<Mutex<MockState>>,
}

impl FetchCartExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, cart: Cart) {
        self.push(PendingResponse::Ready(Ok(cart)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.push(PendingResponse::Ready(Err(error)));
    }

    /// Holds the call open until the test sends a response through the returned sender.
    pub fn respond_later(self) -> oneshot::Sender<Result<Cart, ApiError>> {
        let (sender, response) = PendingResponse::held();
        self.push(response);
        sender
    }

    fn push(self, response: PendingResponse<Cart>) {
        lock(&self.state)
            .expectations
            .push_back(Expectation::FetchCart { response });
    }
}

/// Builder for `fetch_product` expectations.
pub struct FetchProductExpectationBuilder {
    id: ProductId,
    state: Arc<Mutex<MockState>>,
}

impl FetchProductExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, product: Product) {
        self.push(PendingResponse::Ready(Ok(product)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.push(PendingResponse::Ready(Err(error)));
    }

    /// Holds the call open until the test sends a response through the returned sender.
    pub fn respond_later(self) -> oneshot::Sender<Result<Product, ApiError>> {
        let (sender, response) = PendingResponse::held();
        self.push(response);
        sender
    }

    fn push(self, response: PendingResponse<Product>) {
        lock(&self.state).expectations.push_back(Expectation::FetchProduct {
            id: self.id,
            response,
        });
    }
}

/// Builder for `create_order` expectations.
pub struct CreateOrderExpectationBuilder {
    state: Arc<Mutex<MockState>>,
}

impl CreateOrderExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, receipt: OrderReceipt) {
        self.push(PendingResponse::Ready(Ok(receipt)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.push(PendingResponse::Ready(Err(error)));
    }

    /// Holds the call open until the test sends a response through the returned sender.
    ///
    /// Dropping the sender answers the call with a transport error.
    pub fn respond_later(self) -> oneshot::Sender<Result<OrderReceipt, ApiError>> {
        let (sender, response) = PendingResponse::held();
        self.push(response);
        sender
    }

    fn push(self, response: PendingResponse<OrderReceipt>) {
        lock(&self.state)
            .expectations
            .push_back(Expectation::CreateOrder { response });
    }
}
