//! Delayed login as an explicit, cancellable operation.
//!
//! Every login waits for the configured artificial delay before a session
//! is issued. The wait runs on its own task. Dropping a pending attempt,
//! as happens when the requester goes away, cancels it.

use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::LoginRequestDto;
use crate::features::auth::services::session_service::{IssuedSession, SessionService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    Pending,
    Resolved,
    Cancelled,
}

pub struct LoginAttempt {
    status: watch::Receiver<LoginStatus>,
    cancel: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<Option<Result<IssuedSession>>>>,
}

impl LoginAttempt {
    pub fn start(service: Arc<SessionService>, dto: LoginRequestDto) -> Self {
        let (status_tx, status_rx) = watch::channel(LoginStatus::Pending);
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let delay = service.login_delay();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    let outcome = service.login(&dto);
                    let _ = status_tx.send(LoginStatus::Resolved);
                    Some(outcome)
                }
                // Fires on explicit cancel and when the sender is dropped
                _ = cancel_rx => {
                    tracing::debug!("Login attempt cancelled for {}", dto.email);
                    let _ = status_tx.send(LoginStatus::Cancelled);
                    None
                }
            }
        });

        Self {
            status: status_rx,
            cancel: Some(cancel_tx),
            handle: Some(handle),
        }
    }

    pub fn status(&self) -> LoginStatus {
        *self.status.borrow()
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    /// Wait for the attempt to settle. `None` means it was cancelled.
    pub async fn outcome(mut self) -> Result<Option<IssuedSession>> {
        let Some(handle) = self.handle.as_mut() else {
            return Ok(None);
        };

        // The handle stays in place until joined so dropping this future cancels
        let joined = handle.await;
        self.handle = None;
        tracing::debug!("Login attempt settled as {:?}", self.status());

        match joined {
            Ok(outcome) => outcome.transpose(),
            Err(e) if e.is_cancelled() => Ok(None),
            Err(e) => Err(AppError::Internal(format!("Login task failed: {}", e))),
        }
    }
}

impl Drop for LoginAttempt {
    fn drop(&mut self) {
        // Abandoned while still waiting: stop the delay so no session is issued
        if self.handle.is_some() && self.status() == LoginStatus::Pending {
            self.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_session_config;
    use std::time::Duration;

    fn service_with_delay(delay: Duration) -> Arc<SessionService> {
        let mut config = test_session_config();
        config.login_delay = delay;
        Arc::new(SessionService::new(&config))
    }

    fn dto() -> LoginRequestDto {
        LoginRequestDto {
            email: "frank@campus.edu".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_attempt_resolves_after_delay() {
        let attempt = LoginAttempt::start(service_with_delay(Duration::from_millis(20)), dto());
        assert_eq!(attempt.status(), LoginStatus::Pending);

        let issued = attempt.outcome().await.unwrap().expect("login should resolve");
        assert_eq!(issued.user.email, "frank@campus.edu");
    }

    #[tokio::test]
    async fn test_status_reports_resolved() {
        let service = service_with_delay(Duration::ZERO);
        let attempt = LoginAttempt::start(service, dto());

        let mut status = attempt.status.clone();
        status
            .wait_for(|s| *s != LoginStatus::Pending)
            .await
            .unwrap();
        assert_eq!(attempt.status(), LoginStatus::Resolved);
    }

    #[tokio::test]
    async fn test_cancelled_attempt_yields_no_session() {
        let mut attempt = LoginAttempt::start(service_with_delay(Duration::from_secs(30)), dto());
        attempt.cancel();

        let mut status = attempt.status.clone();
        status
            .wait_for(|s| *s != LoginStatus::Pending)
            .await
            .unwrap();
        assert_eq!(attempt.status(), LoginStatus::Cancelled);
        assert!(attempt.outcome().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dropping_attempt_stops_the_task() {
        let attempt = LoginAttempt::start(service_with_delay(Duration::from_secs(30)), dto());
        let mut status = attempt.status.clone();
        drop(attempt);

        status
            .wait_for(|s| *s != LoginStatus::Pending)
            .await
            .unwrap();
        assert_eq!(*status.borrow(), LoginStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_abandoned_outcome_cancels_attempt() {
        let attempt = LoginAttempt::start(service_with_delay(Duration::from_secs(30)), dto());
        let mut status = attempt.status.clone();

        let waited = tokio::time::timeout(Duration::from_millis(10), attempt.outcome()).await;
        assert!(waited.is_err());

        status
            .wait_for(|s| *s != LoginStatus::Pending)
            .await
            .unwrap();
        assert_eq!(*status.borrow(), LoginStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_dropping_settled_attempt_keeps_resolved_status() {
        let attempt = LoginAttempt::start(service_with_delay(Duration::ZERO), dto());
        let mut status = attempt.status.clone();
        status
            .wait_for(|s| *s != LoginStatus::Pending)
            .await
            .unwrap();
        drop(attempt);

        assert_eq!(*status.borrow(), LoginStatus::Resolved);
    }
}
