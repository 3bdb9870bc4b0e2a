//! Quote use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD and browse entry points for callers that refresh
//!   a displayed list after every mutation.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Mutations that return a record read it back from storage, so callers
//!   always render persisted state.

use crate::model::quote::{Quote, QuoteDraft, QuoteId};
use crate::repo::quote_repo::{QuoteRepository, RepoError, RepoResult, SortOrder};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for quote use-cases.
#[derive(Debug)]
pub enum QuoteServiceError {
    /// Target quote does not exist.
    QuoteNotFound(QuoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for QuoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuoteNotFound(id) => write!(f, "quote not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent quote state: {details}"),
        }
    }
}

impl Error for QuoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for QuoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::QuoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Quote service facade over repository implementations.
pub struct QuoteService<R: QuoteRepository> {
    repo: R,
}

impl<R: QuoteRepository> QuoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new quote and returns the stored record.
    pub fn add_quote(&self, draft: &QuoteDraft) -> Result<Quote, QuoteServiceError> {
        let id = self.repo.insert(draft)?;
        self.repo
            .get(id)?
            .ok_or(QuoteServiceError::InconsistentState(
                "created quote not found in read-back",
            ))
    }

    /// Overwrites all fields of an existing quote and returns the stored
    /// record.
    pub fn update_quote(
        &self,
        id: QuoteId,
        draft: &QuoteDraft,
    ) -> Result<Quote, QuoteServiceError> {
        self.repo.update(id, draft)?;
        self.repo
            .get(id)?
            .ok_or(QuoteServiceError::InconsistentState(
                "updated quote not found in read-back",
            ))
    }

    /// Removes one quote by id.
    pub fn delete_quote(&self, id: QuoteId) -> Result<(), QuoteServiceError> {
        self.repo.delete(id)?;
        Ok(())
    }

    /// Point lookup by id.
    pub fn quote(&self, id: QuoteId) -> RepoResult<Option<Quote>> {
        self.repo.get(id)
    }

    /// Returns all quotes in storage order.
    pub fn quotes(&self) -> RepoResult<Vec<Quote>> {
        self.repo.list_all()
    }

    /// Returns distinct authors, ascending lexical order by default.
    pub fn authors(&self, order: SortOrder) -> RepoResult<Vec<String>> {
        self.repo.list_distinct_authors(order)
    }

    /// Returns distinct categories, ascending lexical order by default.
    pub fn categories(&self, order: SortOrder) -> RepoResult<Vec<String>> {
        self.repo.list_distinct_categories(order)
    }

    /// Returns quotes by one author, ordered by id ascending.
    pub fn quotes_by_author(&self, author: &str) -> RepoResult<Vec<Quote>> {
        self.repo.filter_by_author(author)
    }

    /// Returns quotes in one category, ordered by id ascending.
    pub fn quotes_by_category(&self, category: &str) -> RepoResult<Vec<Quote>> {
        self.repo.filter_by_category(category)
    }

    /// Case-insensitive substring search across text, author and category.
    pub fn search(&self, query: &str) -> RepoResult<Vec<Quote>> {
        self.repo.search(query)
    }

    /// Total stored quote count for the status display.
    pub fn quote_count(&self) -> RepoResult<u64> {
        self.repo.count_all()
    }

    /// Quote count for one author's display badge.
    pub fn author_quote_count(&self, author: &str) -> RepoResult<u64> {
        self.repo.count_by_author(author)
    }

    /// Quote count for one category's display badge.
    pub fn category_quote_count(&self, category: &str) -> RepoResult<u64> {
        self.repo.count_by_category(category)
    }
}
