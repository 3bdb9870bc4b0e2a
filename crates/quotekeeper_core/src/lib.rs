//! Core domain logic for QuoteKeeper.
//! This crate is the single source of truth for storage and auth invariants.

pub mod auth;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use config::Config;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::quote::{Quote, QuoteDraft, QuoteId, QuoteValidationError};
pub use model::user::{Credentials, CredentialsError, User, UserId};
pub use repo::quote_repo::{
    QuoteRepository, RepoError, RepoResult, SortOrder, SqliteQuoteRepository,
};
pub use repo::user_repo::{SqliteUserRepository, UserRepoError, UserRepository};
pub use service::auth_service::{AuthError, AuthService};
pub use service::quote_service::{QuoteService, QuoteServiceError};
pub use session::{AppSession, SessionError, SessionResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
