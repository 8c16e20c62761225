//! Shared wire DTOs for the client/server auth boundary.
//!
//! DESIGN
//! ======
//! The server reuses these types for its request and response bodies so both
//! sides agree on one JSON schema without a separate protocol crate.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Access level attached to every account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Faculty,
    #[default]
    Student,
}

impl Role {
    /// Human-readable label for UI display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Faculty => "Faculty",
            Self::Student => "Student",
        }
    }
}

/// An authenticated identity as carried by login responses and durable storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login email, normalized to lower case by the server.
    pub email: String,
    /// Access level.
    pub role: Role,
    /// Display name.
    pub name: String,
}

impl User {
    /// True when every identity field carries a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.name.trim().is_empty()
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful `POST /api/auth/login` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    /// Opaque bearer token for subsequent API calls.
    pub token: String,
}

/// Body of `POST /api/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    /// Requested role; the server assigns `Student` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Successful `POST /api/auth/register` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: User,
}

/// `POST /api/auth/logout` response. The server always reports success.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Error body attached to every non-2xx API response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
