//! Embedded SQLite store.

use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Column, Row, Sqlite, TypeInfo, ValueRef};
use std::str::FromStr;

use super::placeholders::rewrite_placeholders;
use super::store::{Backend, QueryResult, StatementKind, Store, StoreError};
use super::value::{Record, SqlValue};

/// Single-file SQLite database behind a one-connection pool.
///
/// The pool never grows past one connection and never retires it, so all
/// statements run one at a time on the same handle. This also keeps an
/// in-memory database alive for the life of the store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if missing) the database file at `path`.
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect_with(options).await
    }

    /// Opens a private in-memory database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::connect_with(options).await
    }

    async fn connect_with(options: SqliteConnectOptions) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl Store for SqliteStore {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<QueryResult, StoreError> {
        let sql = rewrite_placeholders(sql);
        let statement = bind_params(sqlx::query(&sql), params);

        match StatementKind::classify(&sql) {
            StatementKind::Read => {
                let rows = statement.fetch_all(&self.pool).await?;
                let records = rows
                    .iter()
                    .map(decode_row)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(QueryResult::from_rows(records))
            }
            StatementKind::Write => {
                let done = statement.execute(&self.pool).await?;
                Ok(QueryResult::from_row_count(done.rows_affected()))
            }
        }
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
            SqlValue::Bool(v) => query.bind(*v),
            SqlValue::Timestamp(v) => query.bind(*v),
        };
    }
    query
}

/// Decodes by the storage class of each value rather than the declared
/// column type, which SQLite does not enforce.
fn decode_row(row: &SqliteRow) -> Result<Record, StoreError> {
    let mut record = Record::new();

    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;

        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            let storage_class = raw.type_info().name().to_ascii_uppercase();
            match storage_class.as_str() {
                "INTEGER" => SqlValue::Integer(row.try_get_unchecked(index)?),
                "REAL" => SqlValue::Real(row.try_get_unchecked(index)?),
                "BOOLEAN" => SqlValue::Bool(row.try_get_unchecked(index)?),
                "BLOB" => {
                    let bytes: Vec<u8> = row.try_get_unchecked(index)?;
                    SqlValue::Text(String::from_utf8_lossy(&bytes).into_owned())
                }
                _ => SqlValue::Text(row.try_get_unchecked(index)?),
            }
        };

        record.push(column.name(), value);
    }

    Ok(record)
}
