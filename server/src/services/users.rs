//! In-memory user directory.
//!
//! Accounts are keyed by normalized email. Passwords are stored as Argon2id
//! PHC strings with a random per-account salt; plaintext never leaves
//! `register`/`verify`.

use std::collections::HashMap;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use campus_client::net::types::{Role, User};
use rand::Rng;
use uuid::Uuid;

use crate::config::SeedUser;

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("name is required")]
    EmptyName,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    WeakPassword,
    #[error("an account with that email already exists")]
    Duplicate,
    #[error("password hashing failed: {0}")]
    Hash(String),
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

fn kdf(params: &Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone())
}

/// Hash `password` with a fresh random salt into a PHC string.
///
/// # Errors
///
/// Returns [`DirectoryError::Hash`] if the KDF rejects its inputs.
pub fn hash_password(params: &Params, password: &str) -> Result<String, DirectoryError> {
    let bytes: [u8; 16] = rand::rng().random();
    let salt = SaltString::encode_b64(&bytes).map_err(|e| DirectoryError::Hash(e.to_string()))?;
    kdf(params)
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DirectoryError::Hash(e.to_string()))
}

/// Constant-time check of `password` against a stored PHC string.
#[must_use]
pub fn verify_password(params: &Params, password: &str, stored: &str) -> bool {
    PasswordHash::new(stored).is_ok_and(|parsed| kdf(params).verify_password(password.as_bytes(), &parsed).is_ok())
}

#[derive(Debug, Clone)]
struct UserRecord {
    id: Uuid,
    email: String,
    name: String,
    role: Role,
    password_hash: String,
}

impl UserRecord {
    fn to_user(&self) -> User {
        User { email: self.email.clone(), role: self.role, name: self.name.clone() }
    }
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    records: HashMap<String, UserRecord>,
    params: Params,
}

impl UserDirectory {
    /// Empty directory hashing with the default Argon2id cost.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty directory hashing with explicit Argon2 cost parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self { records: HashMap::new(), params }
    }

    /// Register every seed entry.
    ///
    /// # Errors
    ///
    /// Returns the first entry that fails validation or repeats an email.
    pub fn seed(&mut self, seed: &[SeedUser]) -> Result<(), DirectoryError> {
        for entry in seed {
            self.register(&entry.email, &entry.name, &entry.password, entry.role)?;
        }
        Ok(())
    }

    /// Create an account. Role policy is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectoryError`] for malformed input or a taken email.
    pub fn register(&mut self, email: &str, name: &str, password: &str, role: Role) -> Result<User, DirectoryError> {
        let email = normalize_email(email).ok_or(DirectoryError::InvalidEmail)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DirectoryError::EmptyName);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DirectoryError::WeakPassword);
        }
        if self.records.contains_key(&email) {
            return Err(DirectoryError::Duplicate);
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            email: email.clone(),
            name: name.to_owned(),
            role,
            password_hash: hash_password(&self.params, password)?,
        };
        let user = record.to_user();
        tracing::debug!(user_id = %record.id, %email, role = role.label(), "registered account");
        self.records.insert(email, record);
        Ok(user)
    }

    /// Check credentials, returning the account on a match.
    #[must_use]
    pub fn verify(&self, email: &str, password: &str) -> Option<User> {
        let email = normalize_email(email)?;
        let record = self.records.get(&email)?;
        verify_password(&self.params, password, &record.password_hash).then(|| record.to_user())
    }

    #[must_use]
    pub fn find(&self, email: &str) -> Option<User> {
        let email = normalize_email(email)?;
        self.records.get(&email).map(UserRecord::to_user)
    }

    /// All accounts sorted by email.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        let mut users = self.records.values().map(UserRecord::to_user).collect::<Vec<_>>();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        users
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Minimum-cost parameters so tests do not spend seconds per hash.
#[cfg(test)]
pub(crate) fn test_params() -> Params {
    Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None).expect("minimum argon2 params")
}
