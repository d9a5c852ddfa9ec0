//! Session token storage
//!
//! The token is an opaque bearer credential handed out by a "remember me"
//! login. Both the HTTP client's recovery path and the navigation guard read
//! it; a failed auto-login deletes it.

use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;

use crate::CoreResult;

/// Durable storage for the session token
pub trait TokenStore: Send + Sync {
    /// Read the stored token. Empty values count as absent.
    fn load(&self) -> Option<String>;

    /// Persist a new token, replacing any previous one
    fn save(&self, token: &str) -> CoreResult<()>;

    /// Delete the stored token
    fn clear(&self);
}

/// Token store shared between the client and the guard
pub type SharedTokenStore = Arc<dyn TokenStore>;

/// In-process token store
pub struct MemoryTokenStore {
    token: ArcSwapOption<String>,
}

impl MemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            token: ArcSwapOption::empty(),
        }
    }

    /// Create a store that already holds a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: ArcSwapOption::from_pointee(token.into()),
        }
    }

    /// Wrap into a shared handle
    pub fn shared(self) -> SharedTokenStore {
        Arc::new(self)
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryTokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTokenStore")
            .field("has_token", &self.token.load().is_some())
            .finish()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token
            .load_full()
            .map(|token| token.as_ref().clone())
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) -> CoreResult<()> {
        self.token.store(Some(Arc::new(token.to_owned())));
        Ok(())
    }

    fn clear(&self) {
        self.token.store(None);
    }
}
