//! Frontend configuration

use todo_core::{ClientSettings, config};

/// Build-time settings for the browser client
pub struct FrontendConfig;

impl FrontendConfig {
    /// API origin, overridable at build time through `TODO_API_BASE_URL`
    pub const API_BASE_URL: &'static str = match option_env!("TODO_API_BASE_URL") {
        Some(url) => url,
        None => config::DEFAULT_BASE_URL,
    };

    /// Local storage key holding the persistent session token
    pub const TOKEN_KEY: &'static str = config::DEFAULT_TOKEN_KEY;

    /// Per-call timeout in milliseconds
    pub const REQUEST_TIMEOUT_MS: u64 = config::DEFAULT_REQUEST_TIMEOUT_MS;

    /// Client settings derived from the constants above
    pub fn settings() -> ClientSettings {
        ClientSettings {
            base_url: Self::API_BASE_URL.to_string(),
            request_timeout_ms: Some(Self::REQUEST_TIMEOUT_MS),
            token_key: Self::TOKEN_KEY.to_string(),
            ..ClientSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_are_valid() {
        let settings = FrontendConfig::settings();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.token_key, "authToken");
    }
}
