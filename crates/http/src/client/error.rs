//! Client error types

use std::time::Duration;
use thiserror::Error;
use todo_core::CoreError;

use crate::types::ErrorResponse;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The call did not finish within its deadline
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The call was cancelled by its caller
    #[error("Request cancelled")]
    Cancelled,

    /// Reading or writing the session token failed
    #[error("Token storage error: {0}")]
    Storage(#[from] CoreError),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Build an error from a status and raw response body
    ///
    /// The API reports failures as `{"error": "..."}`; other bodies are used
    /// verbatim and an empty body falls back to the status text.
    pub fn from_response_body(status: reqwest::StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) => parsed.error,
            Err(_) if body.trim().is_empty() => status.to_string(),
            Err(_) => body.to_string(),
        };
        Self::from_status(status, message)
    }

    /// HTTP status behind this error, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server answered 401
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether the failure happened before any response arrived
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_body_message_is_extracted() {
        let error = ClientError::from_response_body(
            StatusCode::UNAUTHORIZED,
            r#"{"error": "Token inválido ou expirado"}"#,
        );
        assert!(matches!(
            &error,
            ClientError::AuthenticationFailed(message) if message == "Token inválido ou expirado"
        ));
        assert!(error.is_unauthorized());
    }

    #[test]
    fn test_empty_body_falls_back_to_status_text() {
        let error = ClientError::from_response_body(StatusCode::INTERNAL_SERVER_ERROR, "");
        match error {
            ClientError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("500"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_conflict_maps_from_409() {
        let error = ClientError::from_status(StatusCode::CONFLICT, "exists".into());
        assert!(matches!(error, ClientError::Conflict(_)));
        assert_eq!(error.status(), Some(409));
    }

    #[test]
    fn test_local_failures_have_no_status() {
        assert_eq!(ClientError::Cancelled.status(), None);
        assert!(ClientError::Timeout(Duration::from_secs(1)).is_transport());
        assert!(!ClientError::Cancelled.is_unauthorized());
    }
}
