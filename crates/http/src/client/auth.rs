//! Authentication API client methods

use reqwest::StatusCode;

use super::{
    ApiRequest, AUTO_LOGIN_PATH, ClientError, LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH,
    SESSION_PATH, TodoClient,
};
use crate::types::{
    AutoLoginRequest, LoginRequest, LoginResponse, LogoutRequest, MessageResponse,
    RegisterRequest, RegisterResponse, SessionStatus,
};

impl TodoClient {
    /// Log in with email and password
    ///
    /// With `remember_me` the server issues a persistent token, which is
    /// written to the token store for later auto-login.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<LoginResponse, ClientError> {
        let request = ApiRequest::post(LOGIN_PATH).json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            remember_me,
        })?;
        let response: LoginResponse = self.execute(request).await?;

        if let Some(token) = response.token.as_deref() {
            self.inner.tokens.save(token)?;
            debug!(user_id = %response.user_id, "Stored persistent session token");
        }
        info!(user_id = %response.user_id, "Logged in");
        Ok(response)
    }

    /// Create a new account
    pub async fn register(&self, email: &str, password: &str) -> Result<RegisterResponse, ClientError> {
        let request = ApiRequest::post(REGISTER_PATH).json(&RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        self.execute(request).await
    }

    /// End the session and revoke the stored token
    ///
    /// The local token is deleted even when the server call fails. A server
    /// answer of "no active session" counts as success.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let token = self.inner.tokens.load();
        self.inner.tokens.clear();

        let request = ApiRequest::post(LOGOUT_PATH).json(&LogoutRequest { token })?;
        match self.execute::<MessageResponse>(request).await {
            Ok(_) => Ok(()),
            Err(ClientError::BadRequest(message)) => {
                debug!(%message, "Logout without an active session");
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Ask whether the session cookie maps to a logged in user
    pub async fn session_status(&self) -> Result<SessionStatus, ClientError> {
        self.execute(ApiRequest::get(SESSION_PATH)).await
    }

    /// Re-establish the session cookie from a persistent token
    ///
    /// Only an exact 200 counts as success. This call never goes through
    /// 401 recovery and never touches the token store; see
    /// [`TodoClient::restore_session`] for the coalesced variant.
    pub async fn auto_login(&self, token: &str) -> Result<(), ClientError> {
        let request = ApiRequest::post(AUTO_LOGIN_PATH).json(&AutoLoginRequest {
            token: token.to_string(),
        })?;
        let response = self.dispatch(&request).await?;
        if response.status() == StatusCode::OK {
            Ok(())
        } else {
            Err(self.read_error(response).await)
        }
    }
}
