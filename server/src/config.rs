//! Server configuration loaded from environment variables.
//!
//! DESIGN
//! ======
//! Every knob has a default so a bare `cargo run` works. Unparseable values
//! fall back to the default rather than aborting; only an unreadable or
//! malformed seed-users file is fatal, because starting with a silently empty
//! directory would lock every account out.

use std::path::{Path, PathBuf};

use campus_client::net::types::Role;
use serde::Deserialize;

use crate::services::session::MAX_TOKEN_TTL;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;
pub const DEFAULT_SWEEP_SECS: u64 = 300;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read users file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid users file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// YAML file of accounts to load at startup.
    pub users_file: Option<PathBuf>,
    /// Lifetime of a bearer token from issue.
    pub token_ttl: time::Duration,
    /// Whether `POST /api/auth/register` is served.
    pub allow_registration: bool,
    /// How often expired tokens are swept from memory.
    pub sweep_interval: std::time::Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            users_file: None,
            token_ttl: time::Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
            allow_registration: true,
            sweep_interval: std::time::Duration::from_secs(DEFAULT_SWEEP_SECS),
        }
    }
}

impl ServerConfig {
    /// Load from `PORT`, `CAMPUS_USERS_FILE`, `CAMPUS_TOKEN_TTL_SECS`,
    /// `CAMPUS_ALLOW_REGISTRATION`, `CAMPUS_SESSION_SWEEP_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        let ttl_secs = env_parse("CAMPUS_TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS);
        let sweep_secs = env_parse("CAMPUS_SESSION_SWEEP_SECS", DEFAULT_SWEEP_SECS);
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            users_file: std::env::var("CAMPUS_USERS_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            token_ttl: token_ttl(ttl_secs),
            allow_registration: env_bool("CAMPUS_ALLOW_REGISTRATION").unwrap_or(true),
            sweep_interval: std::time::Duration::from_secs(sweep_secs.max(1)),
        }
    }
}

/// Token lifetime for a configured number of seconds. Non-positive values
/// take the default; anything longer than [`MAX_TOKEN_TTL`] is capped.
#[must_use]
pub fn token_ttl(secs: i64) -> time::Duration {
    if secs <= 0 {
        return time::Duration::seconds(DEFAULT_TOKEN_TTL_SECS);
    }
    time::Duration::seconds(secs).min(MAX_TOKEN_TTL)
}

/// One account entry in the seed-users file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedUser {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    users: Vec<SeedUser>,
}

/// Parse the YAML seed format:
///
/// ```yaml
/// users:
///   - email: admin@school.edu
///     name: Admin
///     role: Admin
///     password: change-me-now
/// ```
///
/// # Errors
///
/// Returns an error if the document does not match the format above.
pub fn parse_seed_users(raw: &str) -> Result<Vec<SeedUser>, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let file: SeedFile = serde_yaml::from_str(raw)?;
    Ok(file.users)
}

/// Read and parse the seed-users file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_seed_users(path: &Path) -> Result<Vec<SeedUser>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_owned(), source })?;
    parse_seed_users(&raw)
}
