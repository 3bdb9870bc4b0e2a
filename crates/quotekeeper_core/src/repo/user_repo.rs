//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist signup records and look accounts up for login.
//!
//! # Invariants
//! - Username uniqueness is enforced by the schema; the UNIQUE violation
//!   surfaces as `DuplicateUsername`, not as a transport error.
//! - This layer stores whatever hash string it is given; hashing policy
//!   lives in the auth module.

use crate::db::DbError;
use crate::model::user::{User, UserId};
use crate::repo::{ensure_connection_ready, ReadinessError, TableSpec};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const USER_SELECT_SQL: &str = "SELECT
    id,
    username,
    password_hash
FROM users";

const USERS_TABLE: TableSpec = TableSpec {
    table: "users",
    columns: &["id", "username", "password_hash"],
};

pub type UserRepoResult<T> = Result<T, UserRepoError>;

/// Repository error for account persistence and lookup operations.
#[derive(Debug)]
pub enum UserRepoError {
    Db(DbError),
    DuplicateUsername(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for UserRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateUsername(username) => {
                write!(f, "username already exists: `{username}`")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for UserRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for UserRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for UserRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ReadinessError> for UserRepoError {
    fn from(value: ReadinessError) -> Self {
        match value {
            ReadinessError::Sqlite(err) => Self::Db(DbError::Sqlite(err)),
            ReadinessError::SchemaVersion {
                expected_version,
                actual_version,
            } => Self::UninitializedConnection {
                expected_version,
                actual_version,
            },
            ReadinessError::MissingTable(table) => Self::MissingRequiredTable(table),
            ReadinessError::MissingColumn { table, column } => {
                Self::MissingRequiredColumn { table, column }
            }
        }
    }
}

/// Repository interface for account signup and lookup.
pub trait UserRepository {
    /// Persists a new account and returns the storage-assigned id.
    fn create_user(&self, username: &str, password_hash: &str) -> UserRepoResult<UserId>;
    /// Looks one account up by exact username.
    fn find_by_username(&self, username: &str) -> UserRepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> UserRepoResult<Self> {
        ensure_connection_ready(conn, &[USERS_TABLE])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, username: &str, password_hash: &str) -> UserRepoResult<UserId> {
        let inserted = self.conn.execute(
            "INSERT INTO users (username, password_hash) VALUES (?1, ?2);",
            params![username, password_hash],
        );

        match inserted {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(err) if is_unique_violation(&err) => {
                Err(UserRepoError::DuplicateUsername(username.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn find_by_username(&self, username: &str) -> UserRepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE username = ?1;"))?;

        let mut rows = stmt.query([username])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }
}

fn parse_user_row(row: &Row<'_>) -> UserRepoResult<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(info, _)
            if info.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
