//! Submission lifecycle coordinator.
//!
//! Owns the form controller, the submission status, and the deferred
//! post-success reset. Transitions:
//! idle -submit-> loading -ok-> success -(delay)-> idle;
//! loading -failure-> error; success/error -reset-> idle.

use std::{sync::Arc, time::Duration};

use form_core::RegistrationController;
use shared::{
    domain::RegistrationForm,
    error::FieldError,
    protocol::RegistrationPayload,
};
use thiserror::Error;
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::info;

use crate::recorder::{RecordingService, DEFAULT_FAILURE_MESSAGE, DEFAULT_SUCCESS_MESSAGE};

/// How long a successful submission stays on screen before the form clears.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    Success {
        message: String,
    },
    Error {
        message: String,
    },
}

impl SubmissionStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionStatus::Loading)
    }
}

#[derive(Debug, Clone)]
pub enum SubmissionEvent {
    StatusChanged(SubmissionStatus),
    FormCleared,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("ya hay un envío en curso")]
    InFlight,
    #[error("el formulario tiene errores de validación")]
    Invalid(Vec<FieldError>),
}

struct SessionState {
    controller: RegistrationController,
    status: SubmissionStatus,
    /// Bumped on every transition; a pending auto-reset only fires if the
    /// epoch it captured is still current.
    epoch: u64,
    reset_task: Option<JoinHandle<()>>,
}

/// Drives the submit lifecycle against an injected recording service.
/// Field edits stay permitted while a submission is in flight; the payload
/// is captured at submit time and unaffected by later edits.
pub struct RegistrationSession {
    service: Arc<dyn RecordingService>,
    reset_delay: Duration,
    inner: Mutex<SessionState>,
    events: broadcast::Sender<SubmissionEvent>,
}

impl RegistrationSession {
    pub fn new(service: Arc<dyn RecordingService>) -> Arc<Self> {
        Self::with_reset_delay(service, DEFAULT_RESET_DELAY)
    }

    pub fn with_reset_delay(service: Arc<dyn RecordingService>, reset_delay: Duration) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            service,
            reset_delay,
            inner: Mutex::new(SessionState {
                controller: RegistrationController::new(),
                status: SubmissionStatus::Idle,
                epoch: 0,
                reset_task: None,
            }),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SubmissionEvent> {
        self.events.subscribe()
    }

    pub async fn status(&self) -> SubmissionStatus {
        self.inner.lock().await.status.clone()
    }

    pub async fn form(&self) -> RegistrationForm {
        self.inner.lock().await.controller.form().clone()
    }

    pub async fn is_valid(&self) -> bool {
        self.inner.lock().await.controller.is_valid()
    }

    /// Edits form fields through the controller under the session lock.
    pub async fn with_form<R>(&self, edit: impl FnOnce(&mut RegistrationController) -> R) -> R {
        let mut inner = self.inner.lock().await;
        edit(&mut inner.controller)
    }

    /// Submits the current form. Rejected while a submission is in flight
    /// or while the form has validation errors; the errors are recorded
    /// inline as a submit attempt does on the form surface.
    pub async fn submit(self: &Arc<Self>) -> Result<SubmissionStatus, SubmitError> {
        let payload = {
            let mut inner = self.inner.lock().await;
            if inner.status.is_loading() {
                return Err(SubmitError::InFlight);
            }
            let errors = inner.controller.validate_all();
            if !errors.is_empty() {
                return Err(SubmitError::Invalid(errors));
            }
            let payload = RegistrationPayload::from_form(inner.controller.form());
            self.transition(&mut inner, SubmissionStatus::Loading);
            payload
        };

        // The lock is released while the request is in flight.
        let response = self.service.submit(&payload).await;

        let mut inner = self.inner.lock().await;
        let status = if response.success {
            SubmissionStatus::Success {
                message: response
                    .message
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
            }
        } else {
            SubmissionStatus::Error {
                message: response
                    .message
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            }
        };
        self.transition(&mut inner, status.clone());
        if matches!(status, SubmissionStatus::Success { .. }) {
            self.schedule_auto_reset(&mut inner);
        }
        Ok(status)
    }

    /// User-triggered reset: allowed from any non-loading state. Clears the
    /// form and the submission message, and cancels a pending auto-reset.
    pub async fn reset(&self) -> Result<(), SubmitError> {
        let mut inner = self.inner.lock().await;
        if inner.status.is_loading() {
            return Err(SubmitError::InFlight);
        }
        inner.controller.reset();
        self.transition(&mut inner, SubmissionStatus::Idle);
        let _ = self.events.send(SubmissionEvent::FormCleared);
        Ok(())
    }

    fn transition(&self, inner: &mut SessionState, status: SubmissionStatus) {
        inner.epoch += 1;
        if let Some(task) = inner.reset_task.take() {
            task.abort();
        }
        inner.status = status.clone();
        let _ = self.events.send(SubmissionEvent::StatusChanged(status));
    }

    fn schedule_auto_reset(self: &Arc<Self>, inner: &mut SessionState) {
        let session = Arc::clone(self);
        let epoch = inner.epoch;
        let delay = self.reset_delay;
        inner.reset_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            session.auto_reset(epoch).await;
        }));
    }

    async fn auto_reset(&self, epoch: u64) {
        let mut inner = self.inner.lock().await;
        // A newer transition supersedes the pending reset.
        if inner.epoch != epoch {
            return;
        }
        info!("clearing form after successful submission");
        inner.controller.reset();
        self.transition(&mut inner, SubmissionStatus::Idle);
        let _ = self.events.send(SubmissionEvent::FormCleared);
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
