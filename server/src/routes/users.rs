//! Account administration routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use campus_client::net::types::{Role, User};

use crate::routes::auth::{ApiFailure, AuthUser, error_response};
use crate::state::AppState;

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;

/// `GET /api/admin/users` — every account, sorted by email. Admin only.
///
/// # Errors
///
/// `403` when the caller is not an administrator.
pub async fn list_users(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<User>>, ApiFailure> {
    if auth.user.role != Role::Admin {
        tracing::warn!(email = %auth.user.email, "non-admin requested user list");
        return Err(error_response(StatusCode::FORBIDDEN, "administrator role required"));
    }
    Ok(Json(state.users.read().await.list()))
}
