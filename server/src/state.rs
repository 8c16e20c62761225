//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! user directory and the session table sit behind separate locks so token
//! lookups never wait on a registration.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::services::session::SessionTable;
use crate::services::users::UserDirectory;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; every field is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<RwLock<UserDirectory>>,
    pub sessions: Arc<RwLock<SessionTable>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(users: UserDirectory, config: ServerConfig) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
            sessions: Arc::new(RwLock::new(SessionTable::new(config.token_ttl))),
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use campus_client::net::types::Role;

    use super::*;

    pub const ADMIN_EMAIL: &str = "admin@school.edu";
    pub const FACULTY_EMAIL: &str = "prof@school.edu";
    pub const STUDENT_EMAIL: &str = "kid@school.edu";
    pub const PASSWORD: &str = "correct-horse";

    /// Create a test `AppState` with one account per role and default config.
    #[must_use]
    pub fn test_app_state() -> AppState {
        test_app_state_with_config(ServerConfig::default())
    }

    #[must_use]
    pub fn test_app_state_with_config(config: ServerConfig) -> AppState {
        let mut users = UserDirectory::with_params(crate::services::users::test_params());
        for (email, name, role) in [
            (ADMIN_EMAIL, "Admin", Role::Admin),
            (FACULTY_EMAIL, "Prof", Role::Faculty),
            (STUDENT_EMAIL, "Kid", Role::Student),
        ] {
            users.register(email, name, PASSWORD, role).expect("seed user");
        }
        AppState::new(users, config)
    }

    /// Issue a live token for `email` directly in the session table.
    pub async fn issue_token(state: &AppState, email: &str) -> String {
        state.sessions.write().await.issue(email)
    }
}
