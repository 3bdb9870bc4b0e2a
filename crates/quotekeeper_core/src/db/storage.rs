//! Shared storage handle with scoped connection acquisition.
//!
//! # Responsibility
//! - Hold one long-lived, migrated connection for the whole session.
//! - Hand the connection to callers one closure at a time.
//!
//! # Invariants
//! - The connection is released on every exit path of the closure,
//!   including panics and early returns.
//! - Callers never hold the connection across two operations.

use super::{open_db, open_db_in_memory, DbResult};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Long-lived storage handle wrapping one migrated connection.
///
/// Each data operation borrows the connection for exactly one closure;
/// the guard drop guarantees release on success and failure alike.
pub struct Storage {
    conn: Mutex<Connection>,
}

impl Storage {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: Mutex::new(open_db(path)?),
        })
    }

    /// Opens (and migrates) a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: Mutex::new(open_db_in_memory()?),
        })
    }

    /// Runs one operation against the shared connection.
    ///
    /// The lock scope is the closure; a poisoned lock is recovered because
    /// the connection itself holds no interrupted transaction state that
    /// could outlive a panicked closure.
    pub fn with_conn<T>(&self, op: impl FnOnce(&Connection) -> T) -> T {
        let guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        op(&guard)
    }
}

#[cfg(test)]
mod tests {
    use super::Storage;

    #[test]
    fn with_conn_releases_between_calls() {
        let storage = Storage::open_in_memory().unwrap();

        let first: i64 = storage.with_conn(|conn| {
            conn.query_row("SELECT 1;", [], |row| row.get(0)).unwrap()
        });
        let second: i64 = storage.with_conn(|conn| {
            conn.query_row("SELECT 2;", [], |row| row.get(0)).unwrap()
        });

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }
}
