//! Quote domain model.
//!
//! # Responsibility
//! - Define the persisted quote record and the validated draft shape used
//!   by insert/update paths.
//!
//! # Invariants
//! - `id` is storage-assigned and immutable after creation.
//! - Author and category are free text; two quotes may carry identical
//!   author/category strings.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by storage on insert.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type QuoteId = i64;

/// Persisted quote record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Storage-assigned surrogate key.
    pub id: QuoteId,
    /// Quote body.
    pub text: String,
    /// Attributed author, free text.
    pub author: String,
    /// Category label, free text.
    pub category: String,
}

/// Validated input shape for quote insert/update.
///
/// Drafts carry no id; the repository assigns one on insert and the caller
/// supplies one on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDraft {
    pub text: String,
    pub author: String,
    pub category: String,
}

/// Required-field violation raised before any SQL runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteValidationError {
    EmptyText,
    EmptyAuthor,
    EmptyCategory,
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "quote text is required"),
            Self::EmptyAuthor => write!(f, "author is required"),
            Self::EmptyCategory => write!(f, "category is required"),
        }
    }
}

impl Error for QuoteValidationError {}

impl QuoteDraft {
    /// Creates a draft without validating it.
    pub fn new(
        text: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            category: category.into(),
        }
    }

    /// Checks the required-field contract.
    ///
    /// A field consisting only of whitespace counts as empty. Fields are
    /// checked in declaration order and the first violation is returned.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        if self.text.trim().is_empty() {
            return Err(QuoteValidationError::EmptyText);
        }
        if self.author.trim().is_empty() {
            return Err(QuoteValidationError::EmptyAuthor);
        }
        if self.category.trim().is_empty() {
            return Err(QuoteValidationError::EmptyCategory);
        }
        Ok(())
    }
}

impl Quote {
    /// Returns the draft shape carrying this quote's current fields.
    ///
    /// Used by edit flows that pre-fill a form from an existing record.
    pub fn to_draft(&self) -> QuoteDraft {
        QuoteDraft {
            text: self.text.clone(),
            author: self.author.clone(),
            category: self.category.clone(),
        }
    }
}
