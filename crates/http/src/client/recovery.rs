//! Session recovery through auto-login
//!
//! Both the 401 path of [`TodoClient::send`] and the navigation guard restore
//! the session here. Attempts are coalesced: callers snapshot the recovery
//! epoch before their request goes out, and a caller that finds the epoch
//! moved while it waited for the lock reuses the finished attempt instead of
//! calling auto-login again.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use todo_core::{RestoreOutcome, SessionCheck, SessionProbe};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::{ClientError, TodoClient};

pub(crate) struct RecoveryGate {
    epoch: AtomicU64,
    last: Mutex<RestoreOutcome>,
}

impl RecoveryGate {
    pub(crate) fn new() -> Self {
        Self {
            epoch: AtomicU64::new(0),
            last: Mutex::new(RestoreOutcome::NoToken),
        }
    }

    /// Number of completed recovery attempts
    pub(crate) fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }
}

impl TodoClient {
    /// Re-establish the session from the stored token
    ///
    /// Joins an attempt that is already in flight rather than starting a
    /// second one.
    pub async fn restore_session(&self) -> RestoreOutcome {
        let observed = self.inner.recovery.epoch();
        self.recover(observed).await
    }

    /// Number of auto-login attempts this client has completed
    pub fn recovery_epoch(&self) -> u64 {
        self.inner.recovery.epoch()
    }

    pub(crate) async fn recover(&self, observed: u64) -> RestoreOutcome {
        let gate = &self.inner.recovery;
        let mut last = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return RestoreOutcome::Cancelled,
            guard = gate.last.lock() => guard,
        };

        // Only a finished auto-login call is shared. `NoToken` may predate a
        // token stored since, so that caller looks at the store again.
        if gate.epoch() != observed
            && matches!(*last, RestoreOutcome::Restored | RestoreOutcome::Rejected)
        {
            debug!(outcome = ?*last, "Reusing result of concurrent session recovery");
            return *last;
        }

        let outcome = self.attempt_auto_login().await;
        // A cancelled attempt says nothing about the token; let the next caller retry
        if outcome != RestoreOutcome::Cancelled {
            *last = outcome;
            gate.epoch.fetch_add(1, Ordering::AcqRel);
        }
        outcome
    }

    async fn attempt_auto_login(&self) -> RestoreOutcome {
        let Some(token) = self.inner.tokens.load() else {
            debug!("No stored token, skipping auto-login");
            return RestoreOutcome::NoToken;
        };

        match self.auto_login(&token).await {
            Ok(()) => {
                info!("Session restored via auto-login");
                RestoreOutcome::Restored
            }
            Err(ClientError::Cancelled) => RestoreOutcome::Cancelled,
            Err(error) => {
                warn!(%error, "Auto-login failed, clearing stored token");
                self.inner.tokens.clear();
                RestoreOutcome::Rejected
            }
        }
    }
}

#[async_trait(?Send)]
impl SessionProbe for TodoClient {
    async fn restore_session(&self, cancel: &CancellationToken) -> RestoreOutcome {
        let scoped = self.with_cancellation(cancel.clone());
        TodoClient::restore_session(&scoped).await
    }

    async fn check_session(&self, cancel: &CancellationToken) -> SessionCheck {
        match self.with_cancellation(cancel.clone()).session_status().await {
            Ok(status) if status.logged_in => SessionCheck::Active,
            Ok(_) => SessionCheck::Inactive,
            Err(ClientError::Cancelled) => SessionCheck::Cancelled,
            Err(error) if error.is_unauthorized() => SessionCheck::Inactive,
            Err(error) => SessionCheck::Unavailable(error.to_string()),
        }
    }
}
