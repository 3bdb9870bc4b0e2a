//! Quote repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and query APIs over the `quotes` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `QuoteDraft::validate()` before SQL mutations.
//! - `list_all` returns rows in storage order; filter operations order by
//!   `id ASC`; distinct listings order lexically.
//! - Search matches a literal substring: `LIKE` wildcards in the query are
//!   escaped before binding.

use crate::db::DbError;
use crate::model::quote::{Quote, QuoteDraft, QuoteId, QuoteValidationError};
use crate::repo::{ensure_connection_ready, ReadinessError, TableSpec};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const QUOTE_SELECT_SQL: &str = "SELECT
    id,
    quote_text,
    author,
    category
FROM quotes";

const QUOTES_TABLE: TableSpec = TableSpec {
    table: "quotes",
    columns: &["id", "quote_text", "author", "category"],
};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for quote persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(QuoteValidationError),
    Db(DbError),
    NotFound(QuoteId),
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

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "quote not found: {id}"),
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

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<QuoteValidationError> for RepoError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ReadinessError> for RepoError {
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

/// Lexical ordering for distinct author/category listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    fn sql_keyword(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Repository interface for quote CRUD and query operations.
pub trait QuoteRepository {
    /// Persists a new quote and returns the storage-assigned id.
    fn insert(&self, draft: &QuoteDraft) -> RepoResult<QuoteId>;
    /// Overwrites all three fields of an existing quote.
    fn update(&self, id: QuoteId, draft: &QuoteDraft) -> RepoResult<()>;
    /// Removes one quote by id.
    fn delete(&self, id: QuoteId) -> RepoResult<()>;
    /// Point lookup by id.
    fn get(&self, id: QuoteId) -> RepoResult<Option<Quote>>;
    /// Returns all quotes in storage order.
    fn list_all(&self) -> RepoResult<Vec<Quote>>;
    /// Returns distinct authors in the requested lexical order.
    fn list_distinct_authors(&self, order: SortOrder) -> RepoResult<Vec<String>>;
    /// Returns distinct categories in the requested lexical order.
    fn list_distinct_categories(&self, order: SortOrder) -> RepoResult<Vec<String>>;
    /// Returns quotes whose author matches exactly, ordered by id.
    fn filter_by_author(&self, author: &str) -> RepoResult<Vec<Quote>>;
    /// Returns quotes whose category matches exactly, ordered by id.
    fn filter_by_category(&self, category: &str) -> RepoResult<Vec<Quote>>;
    /// Case-insensitive substring search over text, author and category.
    ///
    /// A blank query is equivalent to [`QuoteRepository::list_all`].
    fn search(&self, query: &str) -> RepoResult<Vec<Quote>>;
    /// Total number of stored quotes.
    fn count_all(&self) -> RepoResult<u64>;
    /// Number of quotes attributed to one author (exact match).
    fn count_by_author(&self, author: &str) -> RepoResult<u64>;
    /// Number of quotes in one category (exact match).
    fn count_by_category(&self, category: &str) -> RepoResult<u64>;
}

/// SQLite-backed quote repository.
pub struct SqliteQuoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[QUOTES_TABLE])?;
        Ok(Self { conn })
    }
}

impl QuoteRepository for SqliteQuoteRepository<'_> {
    fn insert(&self, draft: &QuoteDraft) -> RepoResult<QuoteId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO quotes (quote_text, author, category) VALUES (?1, ?2, ?3);",
            params![draft.text, draft.author, draft.category],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, id: QuoteId, draft: &QuoteDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE quotes
             SET
                quote_text = ?1,
                author = ?2,
                category = ?3
             WHERE id = ?4;",
            params![draft.text, draft.author, draft.category, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete(&self, id: QuoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM quotes WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get(&self, id: QuoteId) -> RepoResult<Option<Quote>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUOTE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_quote_row(row)?));
        }

        Ok(None)
    }

    fn list_all(&self) -> RepoResult<Vec<Quote>> {
        let mut stmt = self.conn.prepare(&format!("{QUOTE_SELECT_SQL};"))?;
        collect_quotes(stmt.query([])?)
    }

    fn list_distinct_authors(&self, order: SortOrder) -> RepoResult<Vec<String>> {
        self.list_distinct_column("author", order)
    }

    fn list_distinct_categories(&self, order: SortOrder) -> RepoResult<Vec<String>> {
        self.list_distinct_column("category", order)
    }

    fn filter_by_author(&self, author: &str) -> RepoResult<Vec<Quote>> {
        let mut stmt = self.conn.prepare(&format!(
            "{QUOTE_SELECT_SQL} WHERE author = ?1 ORDER BY id ASC;"
        ))?;
        collect_quotes(stmt.query([author])?)
    }

    fn filter_by_category(&self, category: &str) -> RepoResult<Vec<Quote>> {
        let mut stmt = self.conn.prepare(&format!(
            "{QUOTE_SELECT_SQL} WHERE category = ?1 ORDER BY id ASC;"
        ))?;
        collect_quotes(stmt.query([category])?)
    }

    fn search(&self, query: &str) -> RepoResult<Vec<Quote>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return self.list_all();
        }

        let pattern = format!("%{}%", escape_like_pattern(trimmed));
        let mut stmt = self.conn.prepare(&format!(
            "{QUOTE_SELECT_SQL}
             WHERE quote_text LIKE ?1 ESCAPE '\\'
                OR author LIKE ?1 ESCAPE '\\'
                OR category LIKE ?1 ESCAPE '\\'
             ORDER BY id ASC;"
        ))?;
        collect_quotes(stmt.query([pattern.as_str()])?)
    }

    fn count_all(&self) -> RepoResult<u64> {
        self.count_where("1 = 1", params![])
    }

    fn count_by_author(&self, author: &str) -> RepoResult<u64> {
        self.count_where("author = ?1", params![author])
    }

    fn count_by_category(&self, category: &str) -> RepoResult<u64> {
        self.count_where("category = ?1", params![category])
    }
}

impl SqliteQuoteRepository<'_> {
    fn list_distinct_column(&self, column: &str, order: SortOrder) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT DISTINCT {column} FROM quotes ORDER BY {column} {};",
            order.sql_keyword()
        ))?;

        let mut rows = stmt.query([])?;
        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            values.push(row.get(0)?);
        }
        Ok(values)
    }

    fn count_where(
        &self,
        predicate: &str,
        bind: impl rusqlite::Params,
    ) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM quotes WHERE {predicate};"),
            bind,
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

fn collect_quotes(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<Quote>> {
    let mut quotes = Vec::new();
    while let Some(row) = rows.next()? {
        quotes.push(parse_quote_row(row)?);
    }
    Ok(quotes)
}

fn parse_quote_row(row: &Row<'_>) -> RepoResult<Quote> {
    Ok(Quote {
        id: row.get("id")?,
        text: row.get("quote_text")?,
        author: row.get("author")?,
        category: row.get("category")?,
    })
}

/// Escapes `LIKE` wildcards so the user query matches literally.
fn escape_like_pattern(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
