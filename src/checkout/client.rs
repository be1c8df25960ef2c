use super::message::{CheckoutRequest, QuantityStep, Response};
use super::state::SubmitOutcome;
use super::view::{CheckoutView, ConfirmationExit};
use super::CheckoutError;
use crate::navigation::NavigationParams;
use crate::pricing::Quantity;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

/// Handle for driving one checkout flow.
///
/// Cheap to clone. The actor stops once every clone has been dropped.
#[derive(Clone)]
pub struct CheckoutClient {
    sender: mpsc::Sender<CheckoutRequest>,
    views: watch::Receiver<CheckoutView>,
}

impl CheckoutClient {
    pub(crate) fn new(sender: mpsc::Sender<CheckoutRequest>, views: watch::Receiver<CheckoutView>) -> Self {
        Self { sender, views }
    }

    async fn request<T>(&self, build: impl FnOnce(Response<T>) -> CheckoutRequest) -> Result<T, CheckoutError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| CheckoutError::ActorClosed)?;
        response.await.map_err(|_| CheckoutError::ActorDropped)?
    }

    /// Starts the flow for `params`, replacing whatever was open.
    ///
    /// Reopening with the same parameters is a no-op, so an outstanding load is never
    /// started twice. Returns once loading has started; watch the view for the result.
    #[instrument(skip(self))]
    pub async fn open(&self, params: NavigationParams) -> Result<(), CheckoutError> {
        self.request(|respond_to| CheckoutRequest::Open { params, respond_to })
            .await
    }

    /// Adds one to a single-product checkout. Returns the new quantity, or `None` when
    /// the quantity is not editable.
    #[instrument(skip(self))]
    pub async fn increment(&self) -> Result<Option<Quantity>, CheckoutError> {
        self.adjust(QuantityStep::Increment).await
    }

    /// Removes one, never going below 1.
    #[instrument(skip(self))]
    pub async fn decrement(&self) -> Result<Option<Quantity>, CheckoutError> {
        self.adjust(QuantityStep::Decrement).await
    }

    async fn adjust(&self, step: QuantityStep) -> Result<Option<Quantity>, CheckoutError> {
        self.request(|respond_to| CheckoutRequest::AdjustQuantity { step, respond_to })
            .await
    }

    /// Places the order, or redirects to login when the shopper is signed out.
    ///
    /// While a submission is in flight further submits come back as
    /// [`SubmitOutcome::Ignored`].
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<SubmitOutcome, CheckoutError> {
        let outcome = self
            .request(|respond_to| CheckoutRequest::Submit { respond_to })
            .await?;
        debug!(?outcome, "Submit handled");
        Ok(outcome)
    }

    /// "Continue Shopping" on the order confirmation. Returns the path navigated to.
    #[instrument(skip(self))]
    pub async fn continue_shopping(&self) -> Result<String, CheckoutError> {
        self.exit(ConfirmationExit::ContinueShopping).await
    }

    /// "My Orders" on the order confirmation. Returns the path navigated to.
    #[instrument(skip(self))]
    pub async fn view_orders(&self) -> Result<String, CheckoutError> {
        self.exit(ConfirmationExit::ViewOrders).await
    }

    pub async fn exit(&self, exit: ConfirmationExit) -> Result<String, CheckoutError> {
        self.request(|respond_to| CheckoutRequest::Exit { exit, respond_to })
            .await
    }

    /// The latest published view.
    pub fn view(&self) -> CheckoutView {
        self.views.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CheckoutView> {
        self.views.clone()
    }

    /// Waits until the view satisfies `predicate`, checking the current view first.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&CheckoutView) -> bool,
    ) -> Result<CheckoutView, CheckoutError> {
        let mut views = self.views.clone();
        let view = views
            .wait_for(|view| predicate(view))
            .await
            .map_err(|_| CheckoutError::ActorClosed)?;
        Ok(view.clone())
    }
}
