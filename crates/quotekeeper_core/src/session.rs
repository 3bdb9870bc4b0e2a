//! Application session facade.
//!
//! # Responsibility
//! - Own the storage handle and the logged-in user for one interactive
//!   session.
//! - Expose every user-facing operation behind the login gate.
//!
//! # Invariants
//! - Each operation scoped-acquires the connection, runs exactly one
//!   use-case, and releases the guard on every exit path.
//! - Quote operations are rejected until `login` succeeds.
//! - No state is cached between calls; every query re-reads storage.

use crate::config::Config;
use crate::db::{DbResult, Storage};
use crate::model::quote::{Quote, QuoteDraft, QuoteId};
use crate::model::user::{Credentials, User, UserId};
use crate::repo::quote_repo::{RepoError, SortOrder, SqliteQuoteRepository};
use crate::repo::user_repo::SqliteUserRepository;
use crate::service::auth_service::{AuthError, AuthService};
use crate::service::quote_service::{QuoteService, QuoteServiceError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Session-level error wrapping the use-case taxonomies.
#[derive(Debug)]
pub enum SessionError {
    /// Quote operation attempted before a successful login.
    NotLoggedIn,
    /// Signup/login failure.
    Auth(AuthError),
    /// Quote use-case failure.
    Quote(QuoteServiceError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotLoggedIn => write!(f, "no user is logged in"),
            Self::Auth(err) => write!(f, "{err}"),
            Self::Quote(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotLoggedIn => None,
            Self::Auth(err) => Some(err),
            Self::Quote(err) => Some(err),
        }
    }
}

impl From<AuthError> for SessionError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<QuoteServiceError> for SessionError {
    fn from(value: QuoteServiceError) -> Self {
        Self::Quote(value)
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Quote(QuoteServiceError::from(value))
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// One interactive session: storage handle plus the logged-in user.
///
/// Replaces shared global state: a presentation layer holds exactly one
/// `AppSession` and calls it after every user action.
pub struct AppSession {
    storage: Storage,
    current_user: Option<User>,
}

impl AppSession {
    /// Opens the configured database (running schema setup) and starts a
    /// logged-out session.
    ///
    /// Failure here is fatal to startup; there is no retry.
    pub fn open(config: &Config) -> DbResult<Self> {
        Ok(Self {
            storage: Storage::open(&config.db_path)?,
            current_user: None,
        })
    }

    /// Starts a logged-out session over a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            storage: Storage::open_in_memory()?,
            current_user: None,
        })
    }

    /// Creates a new account. Available before login.
    pub fn sign_up(&self, credentials: &Credentials) -> SessionResult<UserId> {
        self.storage.with_conn(|conn| {
            let repo = SqliteUserRepository::try_new(conn).map_err(AuthError::Repo)?;
            Ok(AuthService::new(repo).sign_up(credentials)?)
        })
    }

    /// Verifies credentials and, on success, marks the session logged in.
    ///
    /// Returns the authenticated account, or `None` when the credentials
    /// do not match.
    pub fn login(&mut self, credentials: &Credentials) -> SessionResult<Option<User>> {
        let user = self.storage.with_conn(|conn| {
            let repo = SqliteUserRepository::try_new(conn).map_err(AuthError::Repo)?;
            Ok::<_, SessionError>(AuthService::new(repo).login(credentials)?)
        })?;

        self.current_user = user.clone();
        Ok(user)
    }

    /// Ends the logged-in state; storage stays open.
    pub fn logout(&mut self) {
        self.current_user = None;
    }

    /// Currently authenticated account, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Persists a new quote and returns the stored record.
    pub fn add_quote(&self, draft: &QuoteDraft) -> SessionResult<Quote> {
        self.with_quotes(|service| Ok(service.add_quote(draft)?))
    }

    /// Overwrites an existing quote and returns the stored record.
    pub fn update_quote(&self, id: QuoteId, draft: &QuoteDraft) -> SessionResult<Quote> {
        self.with_quotes(|service| Ok(service.update_quote(id, draft)?))
    }

    /// Removes one quote by id.
    pub fn delete_quote(&self, id: QuoteId) -> SessionResult<()> {
        self.with_quotes(|service| Ok(service.delete_quote(id)?))
    }

    /// Point lookup by id.
    pub fn quote(&self, id: QuoteId) -> SessionResult<Option<Quote>> {
        self.with_quotes(|service| Ok(service.quote(id)?))
    }

    /// All quotes in storage order.
    pub fn quotes(&self) -> SessionResult<Vec<Quote>> {
        self.with_quotes(|service| Ok(service.quotes()?))
    }

    /// Distinct authors in the requested lexical order.
    pub fn authors(&self, order: SortOrder) -> SessionResult<Vec<String>> {
        self.with_quotes(|service| Ok(service.authors(order)?))
    }

    /// Distinct categories in the requested lexical order.
    pub fn categories(&self, order: SortOrder) -> SessionResult<Vec<String>> {
        self.with_quotes(|service| Ok(service.categories(order)?))
    }

    /// Quotes by one author, ordered by id ascending.
    pub fn quotes_by_author(&self, author: &str) -> SessionResult<Vec<Quote>> {
        self.with_quotes(|service| Ok(service.quotes_by_author(author)?))
    }

    /// Quotes in one category, ordered by id ascending.
    pub fn quotes_by_category(&self, category: &str) -> SessionResult<Vec<Quote>> {
        self.with_quotes(|service| Ok(service.quotes_by_category(category)?))
    }

    /// Substring search across text, author and category.
    pub fn search(&self, query: &str) -> SessionResult<Vec<Quote>> {
        self.with_quotes(|service| Ok(service.search(query)?))
    }

    /// Total stored quote count.
    pub fn quote_count(&self) -> SessionResult<u64> {
        self.with_quotes(|service| Ok(service.quote_count()?))
    }

    /// Quote count for one author's badge.
    pub fn author_quote_count(&self, author: &str) -> SessionResult<u64> {
        self.with_quotes(|service| Ok(service.author_quote_count(author)?))
    }

    /// Quote count for one category's badge.
    pub fn category_quote_count(&self, category: &str) -> SessionResult<u64> {
        self.with_quotes(|service| Ok(service.category_quote_count(category)?))
    }

    fn with_quotes<T>(
        &self,
        op: impl FnOnce(&QuoteService<SqliteQuoteRepository<'_>>) -> SessionResult<T>,
    ) -> SessionResult<T> {
        if self.current_user.is_none() {
            return Err(SessionError::NotLoggedIn);
        }

        self.storage.with_conn(|conn| {
            let repo = SqliteQuoteRepository::try_new(conn)?;
            op(&QuoteService::new(repo))
        })
    }
}
