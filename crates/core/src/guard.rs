//! Pre-navigation authentication guard
//!
//! Every route transition is checked before it is entered. Public routes pass
//! straight through. Protected routes resolve authentication in three steps:
//!
//! 1. restore the session from the stored token (auto-login)
//! 2. ask the API whether the session cookie is still active
//! 3. otherwise redirect to the login route
//!
//! Network failures at any step count as "not authenticated". Nothing is
//! surfaced to the user besides the redirect.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::routes::RouteTable;

/// Result of trying to re-establish a session from the stored token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Auto-login answered 200, the session cookie is set
    Restored,
    /// No token was stored, no request was made
    NoToken,
    /// Auto-login failed and the stored token was deleted
    Rejected,
    /// The attempt was cancelled before it finished
    Cancelled,
}

impl RestoreOutcome {
    pub fn is_restored(self) -> bool {
        matches!(self, Self::Restored)
    }
}

/// Result of asking the API about the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCheck {
    Active,
    Inactive,
    /// The check itself failed (transport error, unexpected status, bad body)
    Unavailable(String),
    Cancelled,
}

/// What the router should do with a navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
    /// The navigation was superseded or cancelled
    Abort,
}

/// Authentication checks the guard needs from the API client
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait SessionProbe {
    /// Attempt auto-login with the stored token
    async fn restore_session(&self, cancel: &CancellationToken) -> RestoreOutcome;

    /// Check whether the session cookie maps to a logged in user
    async fn check_session(&self, cancel: &CancellationToken) -> SessionCheck;
}

/// Navigation guard bound to a probe and a route table
pub struct NavigationGuard<P> {
    probe: P,
    routes: RouteTable,
}

impl<P: SessionProbe> NavigationGuard<P> {
    /// Create a guard over the standard route table
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            routes: RouteTable::standard(),
        }
    }

    /// Use a different route table
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// The probe this guard queries
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Decide whether navigation to `to` may proceed
    pub async fn before_each(&self, to: &str, cancel: &CancellationToken) -> GuardDecision {
        let target = self.routes.resolve(to);
        if !target.requires_auth() {
            return GuardDecision::Proceed;
        }
        if cancel.is_cancelled() {
            return GuardDecision::Abort;
        }

        match self.probe.restore_session(cancel).await {
            RestoreOutcome::Restored => {
                debug!(path = %target.path, "Session restored from stored token");
                return GuardDecision::Proceed;
            }
            RestoreOutcome::Cancelled => return GuardDecision::Abort,
            RestoreOutcome::Rejected => {
                info!(path = %target.path, "Stored token rejected, falling back to session check");
            }
            RestoreOutcome::NoToken => {}
        }

        match self.probe.check_session(cancel).await {
            SessionCheck::Active => return GuardDecision::Proceed,
            SessionCheck::Cancelled => return GuardDecision::Abort,
            SessionCheck::Inactive => {
                debug!(path = %target.path, "No active session");
            }
            SessionCheck::Unavailable(reason) => {
                warn!(path = %target.path, %reason, "Session check failed, treating as logged out");
            }
        }

        GuardDecision::Redirect(self.routes.login_path().to_string())
    }
}
