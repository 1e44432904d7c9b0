//! Remote PostgreSQL store.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Column, Postgres, Row, TypeInfo, ValueRef};

use super::store::{Backend, QueryResult, StatementKind, Store, StoreError};
use super::value::{Record, SqlValue};

/// PostgreSQL store backed by a bounded connection pool.
///
/// Statements are already in the native `$N` dialect and are sent as-is.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects a pool of at most `max_connections` to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<QueryResult, StoreError> {
        let statement = bind_params(sqlx::query(sql), params);

        match StatementKind::classify(sql) {
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
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlValue],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
            SqlValue::Bool(v) => query.bind(*v),
            SqlValue::Timestamp(v) => query.bind(*v),
        };
    }
    query
}

fn decode_row(row: &PgRow) -> Result<Record, StoreError> {
    let mut record = Record::new();

    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;

        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            let type_name = raw.type_info().name().to_string();
            match type_name.as_str() {
                "INT2" => SqlValue::Integer(row.try_get::<i16, _>(index)?.into()),
                "INT4" => SqlValue::Integer(row.try_get::<i32, _>(index)?.into()),
                "INT8" => SqlValue::Integer(row.try_get(index)?),
                "FLOAT4" => SqlValue::Real(row.try_get::<f32, _>(index)?.into()),
                "FLOAT8" => SqlValue::Real(row.try_get(index)?),
                "BOOL" => SqlValue::Bool(row.try_get(index)?),
                "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" => {
                    SqlValue::Text(row.try_get(index)?)
                }
                "TIMESTAMPTZ" => SqlValue::Timestamp(row.try_get::<DateTime<Utc>, _>(index)?),
                // Tables created by older deployments use a zone-less column
                // filled with server time, which is treated as UTC.
                "TIMESTAMP" => {
                    SqlValue::Timestamp(row.try_get::<NaiveDateTime, _>(index)?.and_utc())
                }
                other => {
                    return Err(StoreError::decode(
                        column.name(),
                        format!("unsupported PostgreSQL type {other}"),
                    ));
                }
            }
        };

        record.push(column.name(), value);
    }

    Ok(record)
}
