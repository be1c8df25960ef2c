//! The checkout flow controller.
//!
//! # Concurrency Model
//! All flow state lives in [`CheckoutActor`] and is only touched by its own task, one
//! message at a time. Loads and order creation are spawned as separate tasks that report
//! back through an internal completion channel, so the actor keeps serving quantity
//! edits and duplicate submits while a call is in flight.
//!
//! Every completion carries the generation of the `open` that started it. Opening new
//! parameters bumps the generation, and completions from older generations are dropped.

use super::message::{CheckoutRequest, Completion, QuantityStep};
use super::state::{OrderSubmitter, Phase, SubmitOutcome, SubmitStep};
use super::view::{CheckoutView, ConfirmationExit};
use super::CheckoutError;
use crate::clients::{ApiError, Collaborators, OrderApi};
use crate::config::CheckoutConfig;
use crate::model::{OrderReceipt, OrderRequest};
use crate::navigation::NavigationParams;
use crate::pricing::Quantity;
use crate::selection::{Selection, SelectionLoader};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

pub struct CheckoutActor {
    receiver: mpsc::Receiver<CheckoutRequest>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions: mpsc::UnboundedReceiver<Completion>,
    views: watch::Sender<CheckoutView>,
    config: CheckoutConfig,
    params: Option<NavigationParams>,
    phase: Phase,
    submitter: OrderSubmitter,
    notice: Option<String>,
    generation: u64,
}

impl CheckoutActor {
    pub(crate) fn new(
        receiver: mpsc::Receiver<CheckoutRequest>,
        views: watch::Sender<CheckoutView>,
        config: CheckoutConfig,
    ) -> Self {
        let (completions_tx, completions) = mpsc::unbounded_channel();
        Self {
            receiver,
            completions_tx,
            completions,
            views,
            config,
            params: None,
            phase: Phase::Empty,
            submitter: OrderSubmitter::default(),
            notice: None,
            generation: 0,
        }
    }

    /// Runs the actor's event loop until every [`CheckoutClient`](super::CheckoutClient)
    /// has been dropped.
    ///
    /// # Context Injection
    /// The storefront APIs and host seams arrive here rather than in `new()`, so the
    /// actor can be built before the application has wired its backends.
    pub async fn run(mut self, ctx: Collaborators) {
        info!(?ctx, "Checkout actor started");
        let loader = SelectionLoader::from_collaborators(&ctx);

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle_request(msg, &ctx, &loader),
                    None => break,
                },
                Some(done) = self.completions.recv() => self.handle_completion(done, &ctx),
            }
        }

        info!(status = ?self.views.borrow().status, "Checkout actor shutdown");
    }

    fn handle_request(&mut self, msg: CheckoutRequest, ctx: &Collaborators, loader: &SelectionLoader) {
        match msg {
            CheckoutRequest::Open { params, respond_to } => {
                self.open(params, loader);
                let _ = respond_to.send(Ok(()));
            }
            CheckoutRequest::AdjustQuantity { step, respond_to } => {
                let _ = respond_to.send(Ok(self.adjust_quantity(step)));
            }
            CheckoutRequest::Submit { respond_to } => {
                let _ = respond_to.send(self.submit(ctx));
            }
            CheckoutRequest::Exit { exit, respond_to } => {
                let _ = respond_to.send(self.exit(exit, ctx));
            }
        }
    }

    fn open(&mut self, params: NavigationParams, loader: &SelectionLoader) {
        // An empty phase covers a failed load, which the shopper may retry
        let settled = matches!(self.phase, Phase::Closed | Phase::Empty) || self.submitter.state().is_terminal();
        let same = self.params.as_ref().is_some_and(|open| open.same_selection(&params));
        if same && !settled {
            debug!(?params, "Already open");
            return;
        }

        self.generation += 1;
        self.params = Some(params.clone());
        self.submitter.reset();
        self.notice = None;

        if params.has_selection() {
            info!(generation = self.generation, ?params, "Loading checkout");
            self.phase = Phase::Loading;
            let loader = loader.clone();
            let completions = self.completions_tx.clone();
            let generation = self.generation;
            tokio::spawn(async move {
                let result = loader.load(&params).await;
                let _ = completions.send(Completion::Loaded { generation, result });
            });
        } else {
            info!("Nothing to check out");
            self.phase = Phase::Empty;
        }
        self.publish();
    }

    fn adjust_quantity(&mut self, step: QuantityStep) -> Option<Quantity> {
        if self.submitter.state().is_terminal() {
            return None;
        }
        let Phase::Ready(Selection::Single(single)) = &mut self.phase else {
            return None;
        };
        match step {
            QuantityStep::Increment => single.increment(),
            QuantityStep::Decrement => single.decrement(),
        }
        let quantity = single.quantity();
        debug!(?step, %quantity, "Quantity changed");
        self.publish();
        Some(quantity)
    }

    fn submit(&mut self, ctx: &Collaborators) -> Result<SubmitOutcome, CheckoutError> {
        let Phase::Ready(selection) = &self.phase else {
            return Err(CheckoutError::NothingToCheckout);
        };
        let params = self.params.clone().unwrap_or_default();
        let authenticated = ctx.session.is_authenticated();

        let step = self
            .submitter
            .begin(selection, &params, authenticated, &self.config.routes)?;

        let outcome = match step {
            SubmitStep::Ignored => {
                debug!(state = ?self.submitter.state(), "Submit ignored");
                return Ok(SubmitOutcome::Ignored(self.submitter.state().clone()));
            }
            SubmitStep::Redirect(target) => {
                info!(%target, "Not signed in, redirecting to login");
                ctx.navigator.navigate(&target);
                SubmitOutcome::RedirectedToLogin { target }
            }
            SubmitStep::Send(request) => {
                info!(?request, "Placing order");
                self.notice = None;
                self.spawn_create_order(ctx.orders.clone(), request.clone());
                SubmitOutcome::Submitting { request }
            }
        };
        self.publish();
        Ok(outcome)
    }

    fn spawn_create_order(&self, orders: Arc<dyn OrderApi>, request: OrderRequest) {
        let completions = self.completions_tx.clone();
        let generation = self.generation;
        let timeout = self.config.submit_timeout;
        tokio::spawn(async move {
            let call = orders.create_order(request);
            let result = match timeout {
                Some(limit) => tokio::time::timeout(limit, call)
                    .await
                    .unwrap_or(Err(ApiError::TimedOut)),
                None => call.await,
            };
            let _ = completions.send(Completion::Submitted { generation, result });
        });
    }

    fn exit(&mut self, exit: ConfirmationExit, ctx: &Collaborators) -> Result<String, CheckoutError> {
        if !matches!(self.submitter.state(), super::SubmissionState::Succeeded { .. }) {
            return Err(CheckoutError::NotConfirmed);
        }
        let path = exit.path(&self.config.routes).to_string();
        info!(exit = exit.label(), %path, "Leaving checkout");
        ctx.navigator.navigate(&path);

        self.phase = Phase::Closed;
        self.submitter.reset();
        self.notice = None;
        self.publish();
        Ok(path)
    }

    fn handle_completion(&mut self, done: Completion, ctx: &Collaborators) {
        match done {
            Completion::Loaded { generation, result } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "Discarding stale load");
                    return;
                }
                self.phase = match result {
                    Ok(Some(selection)) => {
                        info!(generation, total = %selection.total(), "Checkout ready");
                        Phase::Ready(selection)
                    }
                    Ok(None) => Phase::Empty,
                    Err(e) => {
                        warn!(error = %e, "Checkout load failed");
                        Phase::Empty
                    }
                };
            }
            Completion::Submitted { generation, result } => {
                if generation != self.generation {
                    match &result {
                        Ok(receipt) => warn!(order_id = %receipt.id, "Order placed for a checkout that was replaced"),
                        Err(e) => debug!(error = %e, "Discarding stale order failure"),
                    }
                    return;
                }
                self.finish_submission(result, ctx);
            }
        }
        self.publish();
    }

    fn finish_submission(&mut self, result: Result<OrderReceipt, ApiError>, ctx: &Collaborators) {
        match result {
            Ok(receipt) => {
                info!(order_id = %receipt.id, "Order placed");
                self.submitter.succeed(receipt.id);
            }
            Err(e) => {
                let message = self.submitter.fail(&e);
                warn!(error = ?e, %message, "Order failed");
                ctx.notifier.alert(&message);
                self.notice = Some(message);
                self.submitter.recover();
            }
        }
    }

    fn publish(&self) {
        self.views.send_replace(CheckoutView::render(
            &self.phase,
            self.submitter.state(),
            self.notice.as_deref(),
            &self.config,
        ));
    }
}
