//! Password hashing and verification.
//!
//! # Responsibility
//! - Turn a claimed password into a salted Argon2id PHC string on signup.
//! - Verify a claimed password against a stored PHC string on login.
//!
//! # Invariants
//! - Plaintext passwords never reach the repository layer.
//! - A mismatching password is `Ok(false)`; only a malformed stored hash
//!   or a backend failure is an error.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure in the hashing backend or a malformed stored hash.
#[derive(Debug)]
pub struct PasswordError(argon2::password_hash::Error);

impl Display for PasswordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "password hashing failed: {}", self.0)
    }
}

impl Error for PasswordError {}

impl From<argon2::password_hash::Error> for PasswordError {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self(value)
    }
}

/// Hashes a password with Argon2id and a fresh random salt.
///
/// Returns the self-describing PHC string to store in `users.password_hash`.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verifies a claimed password against a stored PHC string.
pub fn verify_password(stored_hash: &str, candidate: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash)?;
    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(err.into()),
    }
}
