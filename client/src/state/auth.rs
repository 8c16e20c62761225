//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionStore` is created by the root `App` and shared through Leptos
//! context. The route guard reads `is_loading`/`is_authenticated`; login and
//! logout are the only writers, both to memory and to durable storage.
//!
//! INVARIANTS
//! ==========
//! A session is either complete (email, name, token all non-empty) or absent.
//! Durable storage holds the `user` and `token` keys together or not at all.
//! `loading` stays true until the first storage read has finished.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::api::{ApiError, AuthClient};
use crate::net::types::{LoginResponse, Role, User};
use crate::state::guard::LOGIN_PATH;
use crate::util::storage::{BrowserStorage, DurableStorage, StorageError};

/// Durable-storage key holding the JSON-encoded [`User`].
pub const USER_KEY: &str = "user";
/// Durable-storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// A complete authenticated identity plus its bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl Session {
    /// Build a session, rejecting partial identities and blank tokens.
    #[must_use]
    pub fn new(user: User, token: String) -> Option<Self> {
        if !user.is_complete() || token.trim().is_empty() {
            return None;
        }
        Some(Self { user, token })
    }
}

/// Outcome of reading the persisted session keys.
#[derive(Debug, PartialEq, Eq)]
enum Persisted {
    Empty,
    Valid(Session),
    Corrupt(&'static str),
}

fn read_persisted(storage: &impl DurableStorage) -> Persisted {
    match (storage.get(USER_KEY), storage.get(TOKEN_KEY)) {
        (None, None) => Persisted::Empty,
        (Some(raw_user), Some(token)) => match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Session::new(user, token).map_or(Persisted::Corrupt("incomplete session"), Persisted::Valid),
            Err(_) => Persisted::Corrupt("unparseable user"),
        },
        (Some(_), None) => Persisted::Corrupt("user without token"),
        (None, Some(_)) => Persisted::Corrupt("token without user"),
    }
}

fn write_persisted(storage: &mut impl DurableStorage, session: &Session) -> Result<(), StorageError> {
    let raw_user = serde_json::to_string(&session.user)
        .map_err(|e| StorageError::Write { key: USER_KEY.to_owned(), reason: e.to_string() })?;
    storage.set(USER_KEY, &raw_user)?;
    storage.set(TOKEN_KEY, &session.token)
}

fn clear_persisted(storage: &mut impl DurableStorage) {
    storage.remove(USER_KEY);
    storage.remove(TOKEN_KEY);
}

/// Session store: who is logged in, and the login/logout transitions.
///
/// Plain data so it can live inside an `RwSignal`; every mutation happens in
/// one synchronous `&mut self` call, so observers never see a half-applied
/// transition.
#[derive(Clone, Debug)]
pub struct SessionStore<S = BrowserStorage> {
    storage: S,
    session: Option<Session>,
    loading: bool,
}

impl<S: DurableStorage + Default> Default for SessionStore<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: DurableStorage> SessionStore<S> {
    /// A store that has not yet read durable storage.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage, session: None, loading: true }
    }

    /// Hydrate from durable storage. Only the first call does anything.
    ///
    /// Corrupt or partial contents are removed and the store comes up logged
    /// out; that is logged, never surfaced.
    pub fn initialize(&mut self) {
        if !self.loading {
            return;
        }
        match read_persisted(&self.storage) {
            Persisted::Empty => self.session = None,
            Persisted::Valid(session) => self.session = Some(session),
            Persisted::Corrupt(reason) => {
                leptos::logging::warn!("discarding persisted session: {reason}");
                clear_persisted(&mut self.storage);
                self.session = None;
            }
        }
        self.loading = false;
    }

    /// True until [`initialize`](Self::initialize) has completed.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Authenticate against `client` and, on success, replace the session.
    ///
    /// Returns `false` on any failure, leaving the previous session intact.
    pub async fn login<C: AuthClient>(&mut self, client: &C, email: &str, password: &str) -> bool {
        let outcome = client.login(email, password).await;
        self.complete_login(outcome)
    }

    /// Commit the collaborator's answer to a login request.
    ///
    /// Split from [`login`](Self::login) so reactive callers can await the
    /// request without holding the store, then apply the result in one update.
    pub fn complete_login(&mut self, outcome: Result<LoginResponse, ApiError>) -> bool {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                leptos::logging::warn!("login failed: {e}");
                return false;
            }
        };
        let Some(session) = Session::new(response.user, response.token) else {
            leptos::logging::warn!("login response carried an incomplete session");
            return false;
        };
        if let Err(e) = write_persisted(&mut self.storage, &session) {
            leptos::logging::warn!("could not persist session: {e}");
            self.restore_persisted();
            return false;
        }
        self.session = Some(session);
        true
    }

    /// Put durable storage back in line with the in-memory session after a
    /// failed write. If the previous session cannot be rewritten, both sides
    /// drop to logged out.
    fn restore_persisted(&mut self) {
        let Some(previous) = self.session.clone() else {
            clear_persisted(&mut self.storage);
            return;
        };
        if read_persisted(&self.storage) == Persisted::Valid(previous.clone()) {
            return;
        }
        if write_persisted(&mut self.storage, &previous).is_err() {
            leptos::logging::warn!("could not restore previous session; signing out");
            clear_persisted(&mut self.storage);
            self.session = None;
        }
    }

    /// Drop the session from storage and memory, then navigate to the login page.
    pub fn logout<N: FnOnce(&str)>(&mut self, navigate: N) {
        clear_persisted(&mut self.storage);
        self.session = None;
        navigate(LOGIN_PATH);
    }
}
