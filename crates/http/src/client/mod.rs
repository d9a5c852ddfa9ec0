//! Todo API client

pub mod auth;
mod deadline;
pub mod error;
mod recovery;
pub mod request;
pub mod tasks;

pub use error::ClientError;
pub use request::ApiRequest;

use reqwest::{Client, ClientBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use todo_core::{ClientSettings, MemoryTokenStore, RestoreOutcome, SharedTokenStore};
use tokio_util::sync::CancellationToken;

use recovery::RecoveryGate;

pub const AUTO_LOGIN_PATH: &str = "/todos/auto-login";
pub const SESSION_PATH: &str = "/todos/session";
pub const LOGIN_PATH: &str = "/todos/login";
pub const REGISTER_PATH: &str = "/todos/register";
pub const LOGOUT_PATH: &str = "/todos/logout";
pub const TASKS_PATH: &str = "/todos";

/// Todo API client
///
/// Cloning is cheap; clones share the connection pool, cookie jar, token
/// store and recovery state. Each clone carries its own cancellation token,
/// see [`TodoClient::with_cancellation`].
#[derive(Clone)]
pub struct TodoClient {
    inner: Arc<ClientInner>,
    cancel: CancellationToken,
}

struct ClientInner {
    http: Client,
    base_url: String,
    timeout: Option<Duration>,
    tokens: SharedTokenStore,
    recovery: RecoveryGate,
}

impl TodoClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> TodoClientBuilder {
        TodoClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Per-call timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    /// Token store shared with this client
    pub fn tokens(&self) -> &SharedTokenStore {
        &self.inner.tokens
    }

    /// Cancellation token observed by every call made through this handle
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// A handle whose calls are cancelled together with `cancel`
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel,
        }
    }

    /// Send a request, recovering once from a 401
    ///
    /// A 401 on anything but the auto-login endpoint triggers one session
    /// recovery. When recovery restores the session the request is sent
    /// again and that second outcome is returned. A recovery cancelled by
    /// this handle yields [`ClientError::Cancelled`]; otherwise the original
    /// error is returned unchanged.
    pub async fn send(&self, mut request: ApiRequest) -> Result<Response, ClientError> {
        loop {
            let observed = self.inner.recovery.epoch();
            let response = self.dispatch(&request).await?;
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            let error = self.read_error(response).await;
            if status != StatusCode::UNAUTHORIZED || request.is_auto_login() || request.is_retried()
            {
                return Err(error);
            }

            request.mark_retried();
            match self.recover(observed).await {
                RestoreOutcome::Restored => {}
                RestoreOutcome::Cancelled => return Err(ClientError::Cancelled),
                RestoreOutcome::NoToken | RestoreOutcome::Rejected => return Err(error),
            }
            debug!(method = %request.method(), path = %request.path(), "Retrying request after session recovery");
        }
    }

    /// Send a request and decode its JSON body
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        self.bounded(response.json::<T>()).await
    }

    /// Issue a single request without any recovery
    async fn dispatch(&self, request: &ApiRequest) -> Result<Response, ClientError> {
        trace!(method = %request.method(), path = %request.path(), retried = request.is_retried(), "Sending request");
        let url = format!("{}{}", self.inner.base_url, request.path());
        let mut builder = self.inner.http.request(request.method().clone(), url);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        // Session cookies must travel even when the API is on another origin
        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.fetch_credentials_include();
        }

        self.bounded(builder.send()).await
    }

    /// Turn a failed response into an error, reading its body
    async fn read_error(&self, response: Response) -> ClientError {
        let status = response.status();
        match self.bounded(response.text()).await {
            Ok(body) => ClientError::from_response_body(status, &body),
            Err(ClientError::Cancelled) => ClientError::Cancelled,
            Err(_) => ClientError::from_status(status, status.to_string()),
        }
    }

    /// Run a network future under this handle's timeout and cancellation
    async fn bounded<F, T>(&self, future: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, reqwest::Error>>,
    {
        deadline::run(future, self.inner.timeout, &self.cancel).await
    }
}

impl PartialEq for TodoClient {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for TodoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for TodoClient
#[derive(Default)]
pub struct TodoClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    tokens: Option<SharedTokenStore>,
}

impl TodoClientBuilder {
    /// Apply base URL, timeout and user agent from settings
    pub fn settings(mut self, settings: &ClientSettings) -> Self {
        self.base_url = Some(settings.base_url.clone());
        self.timeout = settings.request_timeout();
        self.user_agent = Some(settings.user_agent.clone());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the per-call timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable the per-call timeout
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Set the user agent (ignored in the browser)
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set where the session token is persisted
    pub fn token_store(mut self, tokens: SharedTokenStore) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<TodoClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url {base_url:?}: {e}")))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        #[cfg(not(target_arch = "wasm32"))]
        let http = {
            let user_agent = self
                .user_agent
                .unwrap_or_else(|| concat!("todo-client/", env!("CARGO_PKG_VERSION")).to_string());
            ClientBuilder::new()
                .user_agent(user_agent)
                .cookie_store(true)
                .build()?
        };

        #[cfg(target_arch = "wasm32")]
        let http = {
            let _ = self.user_agent; // Browsers own the user agent header
            ClientBuilder::new().build()?
        };

        let tokens = self
            .tokens
            .unwrap_or_else(|| MemoryTokenStore::new().shared());

        Ok(TodoClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                tokens,
                recovery: RecoveryGate::new(),
            }),
            cancel: CancellationToken::new(),
        })
    }
}
