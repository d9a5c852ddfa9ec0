//! CLI configuration utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use todo_core::ClientSettings;

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "TODO_DATA_DIR";

/// Resolve the directory holding the token file and logs
pub fn data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        // Check environment variable first, then fall back to system data dir
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(dir)
        } else {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("todo")
        }
    })
}

/// Load settings and apply command-line overrides
///
/// A `timeout` of zero disables the per-call timeout.
pub fn load_settings(
    path: Option<&Path>,
    base_url: Option<String>,
    timeout: Option<u64>,
) -> Result<ClientSettings> {
    let mut settings = ClientSettings::load(path).with_context(|| match path {
        Some(path) => format!("failed to load settings from {}", path.display()),
        None => "failed to load settings".to_string(),
    })?;

    if let Some(base_url) = base_url {
        settings.base_url = base_url;
    }
    if let Some(secs) = timeout {
        settings.request_timeout_ms = Some(secs.saturating_mul(1000));
    }
    settings.validate()?;
    Ok(settings)
}
