//! User account domain model.
//!
//! # Invariants
//! - `username` uniqueness is enforced by the storage schema.
//! - `password_hash` holds an Argon2id PHC string, never plaintext.
//! - Accounts are created via signup and read-only afterwards.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by storage on signup.
pub type UserId = i64;

/// Persisted account record.
///
/// Deliberately not serializable: the stored credential hash must not leak
/// through serialization paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Storage-assigned surrogate key.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Argon2id PHC string for the account password.
    pub password_hash: String,
}

/// Claimed login credentials before verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Required-field violation for signup input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsError {
    EmptyUsername,
    EmptyPassword,
}

impl Display for CredentialsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username is required"),
            Self::EmptyPassword => write!(f, "password is required"),
        }
    }
}

impl Error for CredentialsError {}

impl Credentials {
    /// Creates a credentials pair without validating it.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks the required-field contract for signup.
    ///
    /// Whitespace-only values count as empty. The username is trimmed by
    /// callers before persistence; the password is used verbatim.
    pub fn validate(&self) -> Result<(), CredentialsError> {
        if self.username.trim().is_empty() {
            return Err(CredentialsError::EmptyUsername);
        }
        if self.password.trim().is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        Ok(())
    }
}
