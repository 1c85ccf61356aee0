//! Request orchestration state machine.
//!
//! ```text
//!            submit                ok              payload built
//!   Idle ───────────▶ Validating ──────▶ Submitting ─────────────▶ Awaiting
//!    ▲                    │                                          │
//!    │                    │ invalid                        ok / err  │
//!    │ reset              ▼                                          ▼
//!    └──────────── Failed(kind, msg) ◀──────────────────── Success(result, bucket)
//! ```
//!
//! A [`RequestOrchestrator`] owns its [`ViewState`] and runs at most one
//! submission at a time. Calls to [`submit`](RequestOrchestrator::submit) or
//! [`reset`](RequestOrchestrator::reset) while a submission is in flight are
//! rejected with [`OrchestratorError::Busy`]. Observers see every transition in
//! order and never get write access.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use client::{CancelHandle, ClientError, VerificationResult, VerificationService};
use intake::{IntakeConfig, ValidatedInput, VerificationInput};
use verdict::{ConfidenceBucket, Presentation};

/// Category of a failed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    TimedOut,
    Cancelled,
    Unreachable,
    ServiceRejected,
    MalformedResponse,
    Misconfigured,
}

impl From<&ClientError> for ErrorKind {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::TimedOut { .. } => ErrorKind::TimedOut,
            ClientError::Cancelled => ErrorKind::Cancelled,
            ClientError::Unreachable(_) => ErrorKind::Unreachable,
            ClientError::ServiceRejected { .. } => ErrorKind::ServiceRejected,
            ClientError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            ClientError::InvalidConfig(_) => ErrorKind::Misconfigured,
        }
    }
}

/// What a renderer should show.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Awaiting,
    Success {
        result: VerificationResult,
        bucket: ConfidenceBucket,
        presentation: Presentation,
    },
    Failed {
        kind: ErrorKind,
        message: String,
    },
}

impl ViewState {
    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Validating => "validating",
            ViewState::Submitting => "submitting",
            ViewState::Awaiting => "awaiting",
            ViewState::Success { .. } => "success",
            ViewState::Failed { .. } => "failed",
        }
    }

    /// True while a submission is between `submit` and its terminal state.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            ViewState::Validating | ViewState::Submitting | ViewState::Awaiting
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewState::Success { .. } | ViewState::Failed { .. })
    }

    fn failed(kind: ErrorKind, message: impl Into<String>) -> Self {
        ViewState::Failed {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read-only subscriber to view transitions.
///
/// Callbacks run while the orchestrator holds its publish lock. They may read
/// `state()`, `input()` and `result()` but must not call `submit` or `reset`.
pub trait ViewObserver: Send + Sync {
    fn on_transition(&self, state: &ViewState);
}

impl<F> ViewObserver for F
where
    F: Fn(&ViewState) + Send + Sync,
{
    fn on_transition(&self, state: &ViewState) {
        self(state)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("a verification is already in progress")]
    Busy,
}

const CANCELLED_MESSAGE: &str = "Verification was cancelled.";

#[derive(Default)]
struct Inner {
    state: ViewState,
    input: Option<ValidatedInput>,
    result: Option<VerificationResult>,
    cancel: Option<CancelHandle>,
}

/// Single entry point for a UI layer.
pub struct RequestOrchestrator {
    service: Arc<dyn VerificationService>,
    intake: IntakeConfig,
    inner: Mutex<Inner>,
    /// Serializes "write state, then notify observers" across threads.
    publishing: Mutex<()>,
    observers: RwLock<Vec<Arc<dyn ViewObserver>>>,
    submissions: AtomicU64,
}

impl fmt::Debug for RequestOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOrchestrator")
            .field("state", &self.state())
            .field("intake", &self.intake)
            .finish_non_exhaustive()
    }
}

impl RequestOrchestrator {
    pub fn new(service: Arc<dyn VerificationService>) -> Self {
        Self::with_intake_config(service, IntakeConfig::default())
    }

    pub fn with_intake_config(service: Arc<dyn VerificationService>, intake: IntakeConfig) -> Self {
        Self {
            service,
            intake,
            inner: Mutex::new(Inner::default()),
            publishing: Mutex::new(()),
            observers: RwLock::new(Vec::new()),
            submissions: AtomicU64::new(0),
        }
    }

    /// Register an observer. It receives every later transition.
    pub fn subscribe(&self, observer: Arc<dyn ViewObserver>) {
        self.observers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(observer);
    }

    pub fn state(&self) -> ViewState {
        self.lock().state.clone()
    }

    /// Input of the current or last submission, cleared by `reset`.
    pub fn input(&self) -> Option<ValidatedInput> {
        self.lock().input.clone()
    }

    /// Result of the last successful submission, cleared by `reset`.
    pub fn result(&self) -> Option<VerificationResult> {
        self.lock().result.clone()
    }

    /// Run one submission to a terminal state and return that state.
    ///
    /// Allowed from `Idle`, `Success` and `Failed`. Returns
    /// [`OrchestratorError::Busy`] while another submission is in flight.
    /// If the returned future is dropped early, the orchestrator settles in
    /// `Failed(Cancelled)`.
    pub async fn submit(&self, input: VerificationInput) -> Result<ViewState, OrchestratorError> {
        let cancel = self.begin()?;
        let mut guard = InFlight {
            orchestrator: self,
            armed: true,
        };
        let submission = self.submissions.fetch_add(1, Ordering::Relaxed) + 1;
        let start = Instant::now();

        let validated = match intake::validate(input) {
            Ok(validated) => validated,
            Err(err) => {
                info!(submission, error = %err, "submission_invalid");
                guard.armed = false;
                return Ok(self.settle(ViewState::failed(ErrorKind::Validation, err.to_string())));
            }
        };

        if let Some(advisory) = intake::length_advisory(&validated, &self.intake) {
            warn!(
                submission,
                text_chars = advisory.text_chars,
                threshold = advisory.threshold,
                "{}",
                advisory.message()
            );
        }

        let payload = intake::build(validated.clone());
        self.transition(ViewState::Submitting, |inner| {
            inner.input = Some(validated);
        });
        self.transition(ViewState::Awaiting, |_| {});

        let outcome = self.service.submit(&payload, &cancel).await;
        guard.armed = false;

        let elapsed_ms = start.elapsed().as_millis();
        let next = match outcome {
            Ok(result) => {
                let presentation = verdict::interpret(&result);
                info!(
                    submission,
                    verdict = %result.result,
                    bucket = presentation.bucket.as_str(),
                    elapsed_ms,
                    "submission_succeeded"
                );
                ViewState::Success {
                    bucket: presentation.bucket,
                    result,
                    presentation,
                }
            }
            Err(err) => {
                warn!(submission, error = %err, elapsed_ms, "submission_failed");
                ViewState::failed(ErrorKind::from(&err), err.user_message())
            }
        };
        Ok(self.settle(next))
    }

    /// Return to `Idle`, clearing stored input and result.
    pub fn reset(&self) -> Result<(), OrchestratorError> {
        let _order = self.publish_order();
        let next = {
            let mut inner = self.lock();
            if inner.state.is_in_flight() {
                return Err(OrchestratorError::Busy);
            }
            if inner.state == ViewState::Idle && inner.input.is_none() && inner.result.is_none() {
                return Ok(());
            }
            inner.input = None;
            inner.result = None;
            inner.cancel = None;
            inner.state = ViewState::Idle;
            inner.state.clone()
        };
        self.publish(&next);
        Ok(())
    }

    /// Trip the cancel hook of the in-flight call. Returns whether one existed.
    pub fn cancel(&self) -> bool {
        let inner = self.lock();
        match (&inner.cancel, inner.state.is_in_flight()) {
            (Some(cancel), true) => {
                cancel.cancel();
                true
            }
            _ => false,
        }
    }

    fn begin(&self) -> Result<CancelHandle, OrchestratorError> {
        let cancel = CancelHandle::new();
        let _order = self.publish_order();
        let next = {
            let mut inner = self.lock();
            if inner.state.is_in_flight() {
                debug!(state = %inner.state, "submission_rejected_busy");
                return Err(OrchestratorError::Busy);
            }
            inner.input = None;
            inner.result = None;
            inner.cancel = Some(cancel.clone());
            inner.state = ViewState::Validating;
            inner.state.clone()
        };
        self.publish(&next);
        Ok(cancel)
    }

    fn transition(&self, next: ViewState, update: impl FnOnce(&mut Inner)) {
        let _order = self.publish_order();
        {
            let mut inner = self.lock();
            update(&mut inner);
            inner.state = next.clone();
        }
        self.publish(&next);
    }

    fn settle(&self, next: ViewState) -> ViewState {
        let _order = self.publish_order();
        {
            let mut inner = self.lock();
            if let ViewState::Success { result, .. } = &next {
                inner.result = Some(result.clone());
            }
            inner.cancel = None;
            inner.state = next.clone();
        }
        self.publish(&next);
        next
    }

    fn publish(&self, state: &ViewState) {
        debug!(state = %state, "view_transition");
        let observers = self
            .observers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        for observer in observers {
            observer.on_transition(state);
        }
    }

    /// Held from the state write until every observer has seen it, so
    /// observers on any thread see transitions in the order they happened.
    fn publish_order(&self) -> MutexGuard<'_, ()> {
        self.publishing
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Settles the orchestrator if a `submit` future is dropped mid-flight.
struct InFlight<'a> {
    orchestrator: &'a RequestOrchestrator,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("submission_abandoned");
            self.orchestrator
                .settle(ViewState::failed(ErrorKind::Cancelled, CANCELLED_MESSAGE));
        }
    }
}
