//! Request and response bodies of the to-do API

use serde::{Deserialize, Serialize};

/// Auto-login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoLoginRequest {
    pub token: String,
}

/// User attached to an active session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    #[serde(rename = "_id")]
    pub id: String,
}

/// Session status returned by `GET /todos/session`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStatus {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Ask the server for a persistent token
    #[serde(default)]
    pub remember_me: bool,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub user_id: String,
    /// Present only when `remember_me` was requested
    #[serde(default)]
    pub token: Option<String>,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
    pub user_id: String,
}

/// Logout request, optionally revoking the persistent token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Generic `{ "message": ... }` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Error body returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

/// Create task request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub text: String,
}

/// Partial task update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl TaskUpdate {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            done: None,
        }
    }

    pub fn done(done: bool) -> Self {
        Self {
            text: None,
            done: Some(done),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.done.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_uses_mongo_id_field() {
        let task: Task =
            serde_json::from_value(json!({"_id": "65f0c0ffee", "text": "milk"})).unwrap();
        assert_eq!(task.id, "65f0c0ffee");
        assert!(!task.done);
    }

    #[test]
    fn test_session_status_defaults_to_logged_out() {
        let status: SessionStatus = serde_json::from_value(json!({})).unwrap();
        assert!(!status.logged_in);
        assert!(status.user.is_none());
    }

    #[test]
    fn test_session_status_rejects_non_boolean_flag() {
        let result = serde_json::from_value::<SessionStatus>(json!({"logged_in": "yes"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_task_update_skips_absent_fields() {
        let body = serde_json::to_value(TaskUpdate::done(true)).unwrap();
        assert_eq!(body, json!({"done": true}));
        assert!(TaskUpdate::default().is_empty());
    }

    #[test]
    fn test_logout_without_token_sends_empty_object() {
        let body = serde_json::to_value(LogoutRequest::default()).unwrap();
        assert_eq!(body, json!({}));
    }
}
