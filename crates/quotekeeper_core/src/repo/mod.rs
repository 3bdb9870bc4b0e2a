//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for quotes and users.
//! - Isolate SQLite query details from service/session orchestration.
//!
//! # Invariants
//! - Repository writes enforce draft validation before persistence.
//! - Repository APIs return semantic errors (`NotFound`,
//!   `DuplicateUsername`) in addition to DB transport errors.
//! - Repositories refuse connections that have not been migrated.

use crate::db::migrations::latest_version;
use rusqlite::Connection;

pub mod quote_repo;
pub mod user_repo;

/// Table shape a repository requires from its connection.
pub(crate) struct TableSpec {
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

/// Readiness failure detected before any repository operation runs.
pub(crate) enum ReadinessError {
    Sqlite(rusqlite::Error),
    SchemaVersion {
        expected_version: u32,
        actual_version: u32,
    },
    MissingTable(&'static str),
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for ReadinessError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Verifies schema version and required tables/columns on a connection.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    required: &[TableSpec],
) -> Result<(), ReadinessError> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version < expected_version {
        return Err(ReadinessError::SchemaVersion {
            expected_version,
            actual_version,
        });
    }

    for required_table in required {
        if !table_exists(conn, required_table.table)? {
            return Err(ReadinessError::MissingTable(required_table.table));
        }
        for column in required_table.columns {
            if !table_has_column(conn, required_table.table, column)? {
                return Err(ReadinessError::MissingColumn {
                    table: required_table.table,
                    column,
                });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool, rusqlite::Error> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
