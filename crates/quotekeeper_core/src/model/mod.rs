//! Domain model for quotes and user accounts.
//!
//! # Responsibility
//! - Define the canonical records persisted by the repositories.
//! - Keep required-field validation as pure string checks, independent of
//!   presentation and storage code.
//!
//! # Invariants
//! - Every persisted record is identified by a storage-assigned integer id.
//! - Validation is a function of input strings only; it never touches storage.

pub mod quote;
pub mod user;
