//! Request envelope
//!
//! Requests are kept as plain data rather than `reqwest::RequestBuilder`s so
//! a request that failed with 401 can be issued again after recovery.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::ClientError;

/// Path segment identifying the auto-login endpoint
const AUTO_LOGIN_SEGMENT: &str = "/auto-login";

/// A request to the to-do API
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    retried: bool,
}

impl ApiRequest {
    /// Create a request for `path`, relative to the client's base URL
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Whether a recovery attempt has already been made for this request
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    /// Whether this request targets the auto-login endpoint
    pub fn is_auto_login(&self) -> bool {
        self.path.contains(AUTO_LOGIN_SEGMENT)
    }

    /// Record that a recovery attempt was made. Never reset.
    pub(crate) fn mark_retried(&mut self) {
        self.retried = true;
    }
}
