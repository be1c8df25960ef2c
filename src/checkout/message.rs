use super::state::SubmitOutcome;
use super::view::ConfirmationExit;
use super::CheckoutError;
use crate::clients::ApiError;
use crate::model::OrderReceipt;
use crate::navigation::NavigationParams;
use crate::pricing::Quantity;
use crate::selection::{LoadError, Selection};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the checkout actor.
pub type Response<T> = oneshot::Sender<Result<T, CheckoutError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityStep {
    Increment,
    Decrement,
}

/// Requests sent from [`CheckoutClient`](super::CheckoutClient) to the actor.
#[derive(Debug)]
pub enum CheckoutRequest {
    Open {
        params: NavigationParams,
        respond_to: Response<()>,
    },
    AdjustQuantity {
        step: QuantityStep,
        respond_to: Response<Option<Quantity>>,
    },
    Submit {
        respond_to: Response<SubmitOutcome>,
    },
    Exit {
        exit: ConfirmationExit,
        respond_to: Response<String>,
    },
}

/// Results of work the actor spawned, tagged with the generation that started it.
#[derive(Debug)]
pub(crate) enum Completion {
    Loaded {
        generation: u64,
        result: Result<Option<Selection>, LoadError>,
    },
    Submitted {
        generation: u64,
        result: Result<OrderReceipt, ApiError>,
    },
}
