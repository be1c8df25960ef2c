//! # Flow state
//!
//! The checkout actor owns two pieces of state:
//!
//! - a [`Phase`], which says whether a selection is loaded;
//! - an [`OrderSubmitter`], the submission state machine.
//!
//! ```text
//!            submit (signed in)            success
//!   Idle ─────────────────────────▶ Submitting ─────────▶ Succeeded
//!    │  ▲                               │
//!    │  └────────── Failed ◀────────────┘ failure
//!    │ submit (signed out)
//!    ▼
//!   RedirectingToAuth
//! ```
//!
//! `Succeeded` and `RedirectingToAuth` are terminal for a flow instance. `Failed` lasts
//! only until the notification has been shown, then the submitter is back to `Idle`.

use crate::clients::ApiError;
use crate::config::Routes;
use crate::model::{OrderId, OrderRequest};
use crate::navigation::{login_redirect, NavigationError, NavigationParams};
use crate::selection::Selection;
use serde::Serialize;

/// Whether the flow has something to check out.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Loading,
    /// Nothing to check out: no references, or the load failed.
    Empty,
    Ready(Selection),
    /// The shopper left through a confirmation exit.
    Closed,
}

/// Submission state of one checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        order_id: OrderId,
    },
    Failed {
        message: String,
    },
    RedirectingToAuth {
        target: String,
    },
}

impl SubmissionState {
    /// Whether a submit would be accepted.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Failed { .. })
    }

    /// `Succeeded` and `RedirectingToAuth` end the flow instance.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded { .. } | SubmissionState::RedirectingToAuth { .. }
        )
    }
}

/// What the actor has to do after a submit request.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStep {
    /// A submission is in flight or the flow already ended.
    Ignored,
    /// Hand this login target to the navigator.
    Redirect(String),
    /// Send this request to the order API.
    Send(OrderRequest),
}

/// Result of [`CheckoutClient::submit`](super::CheckoutClient::submit).
///
/// The order itself completes later; watch the view for `Succeeded`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitting { request: OrderRequest },
    RedirectedToLogin { target: String },
    /// Nothing was done; carries the state that caused it.
    Ignored(SubmissionState),
}

/// The submission state machine. Transitions are pure; the actor performs the I/O.
#[derive(Debug, Default)]
pub struct OrderSubmitter {
    state: SubmissionState,
}

impl OrderSubmitter {
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Handles a submit.
    ///
    /// Signed-out shoppers are sent to the login page with a continuation built from the
    /// navigation parameters. Signed-in shoppers get an order request built from the
    /// selection as it is right now.
    pub fn begin(
        &mut self,
        selection: &Selection,
        params: &NavigationParams,
        authenticated: bool,
        routes: &Routes,
    ) -> Result<SubmitStep, NavigationError> {
        if !self.state.accepts_submit() {
            return Ok(SubmitStep::Ignored);
        }

        if !authenticated {
            let target = login_redirect(routes, params)?;
            self.state = SubmissionState::RedirectingToAuth {
                target: target.clone(),
            };
            return Ok(SubmitStep::Redirect(target));
        }

        self.state = SubmissionState::Submitting;
        Ok(SubmitStep::Send(selection.order_request()))
    }

    pub fn succeed(&mut self, order_id: OrderId) {
        self.state = SubmissionState::Succeeded { order_id };
    }

    /// Moves to `Failed` and returns the message to show the shopper.
    pub fn fail(&mut self, error: &ApiError) -> String {
        let message = error.shopper_message();
        self.state = SubmissionState::Failed {
            message: message.clone(),
        };
        message
    }

    /// `Failed` back to `Idle` once the failure has been surfaced.
    pub fn recover(&mut self) {
        if matches!(self.state, SubmissionState::Failed { .. }) {
            self.state = SubmissionState::Idle;
        }
    }

    /// Forgets everything; used when the flow is reopened or closed.
    pub fn reset(&mut self) {
        self.state = SubmissionState::Idle;
    }
}
