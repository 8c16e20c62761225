//! Bearer-token session table.
//!
//! ARCHITECTURE
//! ============
//! Tokens are 32 random bytes rendered as hex and map to the normalized email
//! of the account that logged in. The table lives in memory only; a restart
//! signs everyone out.
//!
//! TRADE-OFFS
//! ==========
//! Expired tokens are rejected on lookup immediately but only removed by the
//! periodic sweep, so memory is bounded by logins per sweep interval.

use std::collections::HashMap;
use std::fmt::Write;
use std::time::Duration;

use rand::Rng;
use time::OffsetDateTime;
use tracing::info;

use crate::state::AppState;

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Longest lifetime a token may be issued with.
pub const MAX_TOKEN_TTL: time::Duration = time::Duration::days(365);

#[derive(Debug, Clone, PartialEq, Eq)]
struct SessionEntry {
    email: String,
    expires_at: OffsetDateTime,
}

/// Live tokens keyed by token string.
#[derive(Debug)]
pub struct SessionTable {
    ttl: time::Duration,
    entries: HashMap<String, SessionEntry>,
}

impl SessionTable {
    /// Table issuing tokens that live for `ttl`, capped at [`MAX_TOKEN_TTL`].
    #[must_use]
    pub fn new(ttl: time::Duration) -> Self {
        Self { ttl: ttl.min(MAX_TOKEN_TTL), entries: HashMap::new() }
    }

    /// Issue a fresh token for `email`.
    pub fn issue(&mut self, email: &str) -> String {
        self.issue_at(email, OffsetDateTime::now_utc())
    }

    pub(crate) fn issue_at(&mut self, email: &str, now: OffsetDateTime) -> String {
        let token = generate_token();
        // Saturates at the end of the calendar.
        let expires_at = now
            .checked_add(self.ttl)
            .unwrap_or_else(|| time::PrimitiveDateTime::MAX.assume_offset(now.offset()));
        self.entries
            .insert(token.clone(), SessionEntry { email: email.to_owned(), expires_at });
        token
    }

    /// Resolve a token to the email it was issued for, if still valid.
    #[must_use]
    pub fn validate(&self, token: &str) -> Option<&str> {
        self.validate_at(token, OffsetDateTime::now_utc())
    }

    pub(crate) fn validate_at(&self, token: &str, now: OffsetDateTime) -> Option<&str> {
        self.entries
            .get(token)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.email.as_str())
    }

    /// Drop a token. Returns whether it was present.
    pub fn revoke(&mut self, token: &str) -> bool {
        self.entries.remove(token).is_some()
    }

    /// Remove every expired token, returning how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        self.purge_expired_at(OffsetDateTime::now_utc())
    }

    pub(crate) fn purge_expired_at(&mut self, now: OffsetDateTime) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before - self.entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Spawn the background task that sweeps expired tokens every `interval`.
pub fn spawn_expiry_task(state: AppState, interval: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let mut sessions = state.sessions.write().await;
            let purged = sessions.purge_expired();
            if purged > 0 {
                info!(purged, remaining = sessions.len(), "swept expired sessions");
            }
        }
    })
}
