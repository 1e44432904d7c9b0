//! The storage strategy shared by both SQL backends.
//!
//! Every statement handed to a [`Store`] is written in the PostgreSQL
//! placeholder dialect (`$1`, `$2`, ...). The SQLite implementation rewrites
//! placeholders before execution, so repositories never branch on backend.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use super::schema;
use super::value::{Record, SqlValue};

/// Which concrete backend a [`Store`] talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Remote PostgreSQL server reached through a connection pool.
    Postgres,
    /// Embedded single-file SQLite database.
    Sqlite,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Postgres => "postgres",
            Backend::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by a [`Store`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("cannot decode column `{column}`: {reason}")]
    Decode { column: String, reason: String },
}

impl StoreError {
    pub fn decode(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the backend rejected a write because of a unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StoreError::Database(e) => e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation()),
            StoreError::Decode { .. } => false,
        }
    }
}

/// Uniform result of [`Store::query`].
///
/// Reads fill `rows` and set `row_count` to the number of rows returned;
/// writes leave `rows` empty and report the number of affected rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<Record>,
    pub row_count: u64,
}

impl QueryResult {
    pub fn from_rows(rows: Vec<Record>) -> Self {
        let row_count = rows.len() as u64;
        Self { rows, row_count }
    }

    pub fn from_row_count(row_count: u64) -> Self {
        Self {
            rows: Vec::new(),
            row_count,
        }
    }

    /// First row, for statements expected to match at most one record.
    pub fn first(&self) -> Option<&Record> {
        self.rows.first()
    }
}

/// Whether a statement produces rows or only an affected-row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Read,
    Write,
}

impl StatementKind {
    /// Classifies a statement by its leading keyword.
    ///
    /// `SELECT`, `WITH` and `VALUES` statements are reads, as is any write carrying a
    /// `RETURNING` clause. Everything else is a write.
    pub fn classify(sql: &str) -> Self {
        let upper = sql.trim_start().to_ascii_uppercase();
        let leading = upper
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or_default();

        if matches!(leading, "SELECT" | "WITH" | "VALUES") {
            return StatementKind::Read;
        }

        let returns_rows = upper
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .any(|word| word == "RETURNING");

        if returns_rows {
            StatementKind::Read
        } else {
            StatementKind::Write
        }
    }
}

/// A SQL backend able to run `$N`-parameterised statements.
#[async_trait]
pub trait Store: Send + Sync {
    /// The backend this store is bound to for the life of the process.
    fn backend(&self) -> Backend;

    /// Executes a statement written in the `$1, $2, ...` placeholder dialect.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] for connection failures, constraint
    /// violations and malformed SQL, and [`StoreError::Decode`] when a column
    /// has a type the store cannot represent.
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<QueryResult, StoreError>;

    /// Creates the `links` table if it does not exist yet. Idempotent.
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.query(schema::links_table_ddl(self.backend()), &[])
            .await
            .map(|_| ())
    }

    /// Round-trips a trivial statement to prove the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError> {
        self.query("SELECT 1", &[]).await.map(|_| ())
    }
}
