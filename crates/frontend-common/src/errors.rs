//! User-facing error messages

use todo_http::client::ClientError;

/// Convert a client error into text suitable for the page
///
/// Server-provided messages are shown as-is; transport failures get a
/// generic explanation.
pub fn user_message(error: &ClientError) -> String {
    match error {
        ClientError::BadRequest(message)
        | ClientError::AuthenticationFailed(message)
        | ClientError::Forbidden(message)
        | ClientError::NotFound(message)
        | ClientError::Conflict(message)
            if !message.is_empty() =>
        {
            message.clone()
        }
        ClientError::AuthenticationFailed(_) => "Please sign in to continue.".to_string(),
        ClientError::Conflict(_) => "That account already exists.".to_string(),
        ClientError::Timeout(_) => "The server took too long to respond. Please try again.".to_string(),
        ClientError::Request(_) => {
            "Could not reach the server. Check your connection and try again.".to_string()
        }
        ClientError::ServerError { status, .. } => {
            format!("Something went wrong on the server ({status}). Please try again later.")
        }
        ClientError::Storage(_) => "Could not remember this device's session.".to_string(),
        ClientError::Cancelled => String::new(),
        other => other.to_string(),
    }
}
