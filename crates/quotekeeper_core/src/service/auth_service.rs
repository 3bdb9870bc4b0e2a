//! Signup and login use-case service.
//!
//! # Responsibility
//! - Validate signup input, hash the password, and persist the account.
//! - Verify claimed credentials against the stored hash on login.
//!
//! # Invariants
//! - Signup never stores plaintext; the repository receives only the
//!   Argon2id PHC string.
//! - Login treats unknown username and wrong password identically: both
//!   return `None`, with no hint which check failed.

use crate::auth::{hash_password, verify_password, PasswordError};
use crate::model::user::{Credentials, CredentialsError, User, UserId};
use crate::repo::user_repo::{UserRepoError, UserRepository};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for signup/login use-cases.
#[derive(Debug)]
pub enum AuthError {
    /// Required signup field missing.
    Credentials(CredentialsError),
    /// Username already taken.
    DuplicateUsername(String),
    /// Hashing backend failure or corrupt stored hash.
    Password(PasswordError),
    /// Persistence-layer failure.
    Repo(UserRepoError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Credentials(err) => write!(f, "{err}"),
            Self::DuplicateUsername(username) => {
                write!(f, "username already exists: `{username}`")
            }
            Self::Password(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Credentials(err) => Some(err),
            Self::Password(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::DuplicateUsername(_) => None,
        }
    }
}

impl From<CredentialsError> for AuthError {
    fn from(value: CredentialsError) -> Self {
        Self::Credentials(value)
    }
}

impl From<PasswordError> for AuthError {
    fn from(value: PasswordError) -> Self {
        Self::Password(value)
    }
}

impl From<UserRepoError> for AuthError {
    fn from(value: UserRepoError) -> Self {
        match value {
            UserRepoError::DuplicateUsername(username) => Self::DuplicateUsername(username),
            other => Self::Repo(other),
        }
    }
}

/// Auth service facade over a user repository implementation.
pub struct AuthService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> AuthService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new account from validated credentials.
    ///
    /// The username is trimmed before persistence; the password is hashed
    /// verbatim.
    pub fn sign_up(&self, credentials: &Credentials) -> Result<UserId, AuthError> {
        credentials.validate()?;

        let username = credentials.username.trim();
        let password_hash = hash_password(&credentials.password)?;
        let user_id = self.repo.create_user(username, &password_hash)?;

        info!("event=sign_up module=auth status=ok username={username}");
        Ok(user_id)
    }

    /// Verifies claimed credentials and returns the matching account.
    ///
    /// Returns `Ok(None)` for unknown usernames and wrong passwords alike.
    pub fn login(&self, credentials: &Credentials) -> Result<Option<User>, AuthError> {
        let username = credentials.username.trim();
        let Some(user) = self.repo.find_by_username(username)? else {
            info!("event=login module=auth status=rejected username={username}");
            return Ok(None);
        };

        if verify_password(&user.password_hash, &credentials.password)? {
            info!("event=login module=auth status=ok username={username}");
            Ok(Some(user))
        } else {
            info!("event=login module=auth status=rejected username={username}");
            Ok(None)
        }
    }
}
