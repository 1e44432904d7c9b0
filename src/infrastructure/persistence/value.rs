//! Backend-neutral parameter and column values.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use super::store::StoreError;

/// A single SQL value, either bound as a parameter or decoded from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    /// Interprets the value as a UTC timestamp.
    ///
    /// SQLite stores timestamps as text (`YYYY-MM-DD HH:MM:SS[.fff]`, always UTC)
    /// or occasionally as Unix seconds, so both are accepted alongside native
    /// PostgreSQL timestamps.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            SqlValue::Timestamp(ts) => Some(*ts),
            SqlValue::Integer(secs) => Utc.timestamp_opt(*secs, 0).single(),
            SqlValue::Text(text) => parse_timestamp(text),
            _ => None,
        }
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// One result row: column names paired with decoded values, in select order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Vec<(String, SqlValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: SqlValue) {
        self.columns.push((column.into(), value));
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    fn require(&self, column: &str) -> Result<&SqlValue, StoreError> {
        self.get(column)
            .ok_or_else(|| StoreError::decode(column, "column missing from result"))
    }

    pub fn get_i64(&self, column: &str) -> Result<i64, StoreError> {
        match self.require(column)? {
            SqlValue::Integer(v) => Ok(*v),
            other => Err(StoreError::decode(
                column,
                format!("expected integer, got {other:?}"),
            )),
        }
    }

    pub fn get_string(&self, column: &str) -> Result<String, StoreError> {
        match self.require(column)? {
            SqlValue::Text(v) => Ok(v.clone()),
            other => Err(StoreError::decode(
                column,
                format!("expected text, got {other:?}"),
            )),
        }
    }

    pub fn get_timestamp(&self, column: &str) -> Result<DateTime<Utc>, StoreError> {
        let value = self.require(column)?;
        value.as_timestamp().ok_or_else(|| {
            StoreError::decode(column, format!("expected timestamp, got {value:?}"))
        })
    }
}

impl FromIterator<(String, SqlValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, SqlValue)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
