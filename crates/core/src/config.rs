//! Client configuration
//!
//! Settings are plain serde types so the web build can use the defaults
//! directly while native binaries layer a config file and `TODO_*`
//! environment variables on top.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API origin used by the development backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Storage key under which the session token is persisted
pub const DEFAULT_TOKEN_KEY: &str = "authToken";

/// Default per-call timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Settings for constructing the API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base origin every request is sent to
    pub base_url: String,
    /// Per-call timeout in milliseconds, `None` disables it
    pub request_timeout_ms: Option<u64>,
    /// Name of the persisted token entry
    pub token_key: String,
    /// User agent sent by native clients
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: Some(DEFAULT_REQUEST_TIMEOUT_MS),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            user_agent: concat!("todo-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientSettings {
    /// Per-call timeout as a duration
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Check that required fields are usable
    pub fn validate(&self) -> crate::CoreResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(crate::CoreError::invalid_config("base_url must not be empty"));
        }
        if self.token_key.trim().is_empty() {
            return Err(crate::CoreError::invalid_config("token_key must not be empty"));
        }
        Ok(())
    }

    /// Load settings from an optional file plus `TODO_*` environment variables
    ///
    /// Later sources win: defaults, then the file, then the environment.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> crate::CoreResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(config::Environment::with_prefix("TODO").try_parsing(true));

        let settings: Self = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| crate::CoreError::invalid_config(e.to_string()))?;
        settings.validate()?;

        tracing::debug!(base_url = %settings.base_url, "Loaded client settings");
        Ok(settings)
    }
}
