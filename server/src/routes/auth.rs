//! Auth routes: email/password login, registration, bearer-token sessions.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Json;
use campus_client::net::types::{
    ErrorResponse, LoginRequest, LoginResponse, LogoutResponse, RegisterRequest, RegisterResponse, Role, User,
};
use tracing::{info, warn};

use crate::services::users::DirectoryError;
use crate::state::AppState;

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Failed request: status plus a JSON `{error}` body.
pub type ApiFailure = (StatusCode, Json<ErrorResponse>);

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ApiFailure {
    (status, Json(ErrorResponse { error: message.into() }))
}

pub(crate) fn directory_error_to_status(err: &DirectoryError) -> StatusCode {
    match err {
        DirectoryError::InvalidEmail | DirectoryError::EmptyName | DirectoryError::WeakPassword => {
            StatusCode::BAD_REQUEST
        }
        DirectoryError::Duplicate => StatusCode::CONFLICT,
        DirectoryError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Unwrap a JSON body, turning axum's plain-text rejection into `{error}`.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiFailure> {
    body.map(|Json(value)| value)
        .map_err(|rejection| error_response(rejection.status(), rejection.body_text()))
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the bearer token.
pub struct AuthUser {
    pub user: User,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiFailure;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let unauthorized = || error_response(StatusCode::UNAUTHORIZED, "authentication required");
        let token = bearer_token(&parts.headers).ok_or_else(unauthorized)?;

        let app_state = AppState::from_ref(state);
        let email = app_state
            .sessions
            .read()
            .await
            .validate(token)
            .map(str::to_owned)
            .ok_or_else(unauthorized)?;
        let user = app_state.users.read().await.find(&email).ok_or_else(unauthorized)?;

        Ok(Self { user })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login` — exchange credentials for a bearer token.
///
/// # Errors
///
/// `400` when either field is blank, `401` when the credentials do not match,
/// and axum's body status when the JSON is malformed.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiFailure> {
    let body = json_body(body)?;
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "email and password are required"));
    }

    let Some(user) = state.users.read().await.verify(&body.email, &body.password) else {
        warn!(email = %body.email.trim(), "login rejected");
        return Err(error_response(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS));
    };

    let token = state.sessions.write().await.issue(&user.email);
    info!(email = %user.email, role = user.role.label(), "login");
    Ok(Json(LoginResponse { user, token }))
}

/// `POST /api/auth/register` — create an account. Does not log in.
///
/// # Errors
///
/// `404` when registration is disabled, `403` when `Admin` is requested,
/// `409` for a taken email, `400` for malformed input.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiFailure> {
    let body = json_body(body)?;
    if !state.config.allow_registration {
        return Err(error_response(StatusCode::NOT_FOUND, "registration is disabled"));
    }

    let role = body.role.unwrap_or_default();
    if role == Role::Admin {
        return Err(error_response(StatusCode::FORBIDDEN, "administrator accounts cannot be self-registered"));
    }

    let user = state
        .users
        .write()
        .await
        .register(&body.email, &body.name, &body.password, role)
        .map_err(|e| error_response(directory_error_to_status(&e), e.to_string()))?;

    info!(email = %user.email, role = role.label(), "account registered");
    Ok((StatusCode::CREATED, Json(RegisterResponse { user })))
}

/// `POST /api/auth/logout` — revoke the bearer token if one is presented.
/// Always succeeds.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<LogoutResponse> {
    if let Some(token) = bearer_token(&headers)
        && state.sessions.write().await.revoke(token)
    {
        info!("session revoked");
    }
    Json(LogoutResponse { success: true })
}

/// `GET /api/auth/me` — return the current user.
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}
