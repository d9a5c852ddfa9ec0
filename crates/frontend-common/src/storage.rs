//! Browser token persistence

use gloo::storage::{LocalStorage, Storage};
use std::sync::Arc;
use todo_core::{CoreError, CoreResult, SharedTokenStore, TokenStore};

/// Token store backed by `window.localStorage`
///
/// Survives reloads and browser restarts, which is what lets a
/// "remember me" login restore the session on the next visit. The entry
/// holds the bare token string, not a JSON-encoded value.
#[derive(Debug, Clone)]
pub struct LocalStorageTokenStore {
    key: String,
}

impl LocalStorageTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn shared(self) -> SharedTokenStore {
        Arc::new(self)
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::raw()
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) -> CoreResult<()> {
        LocalStorage::raw()
            .set_item(&self.key, token)
            .map_err(|e| CoreError::storage(format!("localStorage rejected the token: {e:?}")))
    }

    fn clear(&self) {
        if let Err(e) = LocalStorage::raw().remove_item(&self.key) {
            tracing::warn!(key = %self.key, error = ?e, "Failed to remove stored token");
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_token_round_trips_through_local_storage() {
        let store = LocalStorageTokenStore::new("authToken-test");
        store.clear();
        assert_eq!(store.load(), None);

        store.save("persistent-token").unwrap();
        assert_eq!(store.load().as_deref(), Some("persistent-token"));
        assert_eq!(
            LocalStorage::raw().get_item("authToken-test").unwrap().as_deref(),
            Some("persistent-token")
        );

        store.clear();
        assert_eq!(store.load(), None);
    }

    #[wasm_bindgen_test]
    fn test_token_written_by_other_code_is_read() {
        LocalStorage::raw().set_item("authToken-raw", "abc123").unwrap();
        let store = LocalStorageTokenStore::new("authToken-raw");
        assert_eq!(store.load().as_deref(), Some("abc123"));
        store.clear();
    }
}
