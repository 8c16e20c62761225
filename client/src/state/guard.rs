//! Route guard policy and state machine.
//!
//! DESIGN
//! ======
//! `decide` is a pure function of the requested path and a snapshot of the
//! session store. `GuardPhase::transition` turns successive decisions into
//! phases plus an optional [`GuardEffect`]; the reactive executor in
//! `util::auth` is the only code that actually navigates.
//!
//! ```text
//! Uninitialized --loading--> Checking --session--> Authorized
//!                               |
//!                               +--no session--> Redirecting --navigated--> Unauthorized
//! ```
//!
//! Public paths bypass every check, including the hydration handshake.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::net::types::Role;
use crate::state::auth::SessionStore;
use crate::util::storage::DurableStorage;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const API_PREFIX: &str = "/api";

/// Paths that render without a session.
const PUBLIC_PATHS: &[&str] = &[LOGIN_PATH, REGISTER_PATH];

/// Path prefixes restricted to specific roles.
const ROLE_POLICY: &[(&str, &[Role])] = &[("/admin", &[Role::Admin])];

/// Strip query, fragment and trailing slashes. The root stays `/`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// `path` equals `prefix` or is a descendant segment of it.
fn is_under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// True for the login page, the registration page, and any API route.
#[must_use]
pub fn is_public_path(path: &str) -> bool {
    let path = normalize_path(path);
    PUBLIC_PATHS.contains(&path) || is_under(path, API_PREFIX)
}

/// Roles allowed on `path`, or `None` when any signed-in user may enter.
#[must_use]
pub fn required_roles(path: &str) -> Option<&'static [Role]> {
    let path = normalize_path(path);
    ROLE_POLICY
        .iter()
        .find(|(prefix, _)| is_under(path, prefix))
        .map(|(_, roles)| *roles)
}

/// What the guard sees of the world for one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardInput {
    /// Role of the signed-in user; `None` when logged out.
    pub role: Option<Role>,
    /// Session store has not finished reading durable storage.
    pub loading: bool,
    /// The guard has mounted in the browser.
    pub mounted: bool,
}

impl GuardInput {
    #[must_use]
    pub fn from_store<S: DurableStorage>(store: &SessionStore<S>, mounted: bool) -> Self {
        Self { role: store.role(), loading: store.is_loading(), mounted }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    fn is_hydrated(&self) -> bool {
        self.mounted && !self.loading
    }
}

/// Render-or-redirect verdict for one path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Hydration has not finished; show a neutral placeholder.
    Loading,
    /// Render the requested page.
    Render,
    /// Render nothing and navigate to the given path.
    Redirect(&'static str),
}

/// Decide whether `path` may render for the given session snapshot.
#[must_use]
pub fn decide(path: &str, input: GuardInput) -> GuardDecision {
    if is_public_path(path) {
        return GuardDecision::Render;
    }
    if !input.is_hydrated() {
        return GuardDecision::Loading;
    }
    let Some(role) = input.role else {
        return GuardDecision::Redirect(LOGIN_PATH);
    };
    match required_roles(path) {
        Some(allowed) if !allowed.contains(&role) => GuardDecision::Redirect(DASHBOARD_PATH),
        _ => GuardDecision::Render,
    }
}

/// Side effect requested by a phase transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardEffect {
    Navigate(&'static str),
}

/// Lifecycle of the guard across route changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardPhase {
    #[default]
    Uninitialized,
    Checking,
    Authorized,
    Redirecting,
    Unauthorized,
}

impl GuardPhase {
    /// Next phase for a fresh decision, plus the effect the executor must run.
    ///
    /// Every evaluation re-enters the machine, so a route change from any
    /// phase lands wherever the new decision points.
    #[must_use]
    pub fn transition(self, decision: GuardDecision) -> (Self, Option<GuardEffect>) {
        match decision {
            GuardDecision::Loading => (Self::Checking, None),
            GuardDecision::Render => (Self::Authorized, None),
            GuardDecision::Redirect(target) => (Self::Redirecting, Some(GuardEffect::Navigate(target))),
        }
    }

    /// Phase after the executor has issued a redirect.
    #[must_use]
    pub fn settle(self) -> Self {
        match self {
            Self::Redirecting => Self::Unauthorized,
            other => other,
        }
    }
}
