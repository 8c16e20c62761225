//! REST bindings for the authentication collaborator.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is folded into [`ApiError`]; nothing here panics. The session
//! store turns these into a plain `false` for its callers.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{LoginResponse, RegisterRequest, User};

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
pub const REGISTER_ENDPOINT: &str = "/api/auth/register";

/// Failure talking to the auth API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("{message} (status {status})")]
    Rejected { status: u16, message: String },
    /// The response body did not match the expected schema.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// No HTTP transport in this build (server-side rendering).
    #[error("not available on server")]
    Unavailable,
}

/// The authentication collaborator as seen by the session store.
#[allow(async_fn_in_trait)]
pub trait AuthClient {
    /// Exchange credentials for a user and bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Tell the server the token is no longer in use.
    async fn logout(&self, token: Option<&str>) -> Result<(), ApiError>;

    /// Create a new account.
    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError>;
}

/// HTTP implementation of [`AuthClient`] against the same-origin API.
#[derive(Clone, Debug, Default)]
pub struct HttpAuthClient {
    base_url: String,
}

impl HttpAuthClient {
    /// Client targeting an explicit origin, e.g. `https://campus.example.edu`.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Build the error for a non-2xx response, preferring the server's `{error}` body.
#[cfg(any(test, feature = "hydrate"))]
fn rejected(status: u16, body: Option<super::types::ErrorResponse>) -> ApiError {
    let message = body
        .map(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("request failed with status {status}"));
    ApiError::Rejected { status, message }
}

impl AuthClient for HttpAuthClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = super::types::LoginRequest { email: email.to_owned(), password: password.to_owned() };
            let resp = gloo_net::http::Request::post(&self.url(LOGIN_ENDPOINT))
                .json(&payload)
                .map_err(|e| ApiError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(rejected(resp.status(), resp.json().await.ok()));
            }
            resp.json::<LoginResponse>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.url(LOGIN_ENDPOINT), email, password);
            Err(ApiError::Unavailable)
        }
    }

    async fn logout(&self, token: Option<&str>) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let mut req = gloo_net::http::Request::post(&self.url(LOGOUT_ENDPOINT));
            if let Some(token) = token {
                req = req.header("Authorization", &bearer_header(token));
            }
            let resp = req
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(rejected(resp.status(), resp.json().await.ok()));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.url(LOGOUT_ENDPOINT), token);
            Err(ApiError::Unavailable)
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&self.url(REGISTER_ENDPOINT))
                .json(request)
                .map_err(|e| ApiError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(rejected(resp.status(), resp.json().await.ok()));
            }
            let body: super::types::RegisterResponse =
                resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))?;
            Ok(body.user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.url(REGISTER_ENDPOINT), request);
            Err(ApiError::Unavailable)
        }
    }
}
