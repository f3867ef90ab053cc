//! Backend-neutral query parameters and result shapes.
//!
//! Both storage backends decode their native rows into [`Row`] and report
//! writes as [`WriteResult`], so repositories never see driver types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use itemdesk_core::types::Timestamp;

use crate::storage::StorageError;

/// A single SQL value, used both for positional parameters and row cells.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Timestamp(Timestamp),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
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

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// Outcome of an INSERT / UPDATE / DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteResult {
    /// Row id generated by the last insert on the connection.
    pub inserted_id: i64,
    pub affected_rows: u64,
}

/// One result row: column name -> value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: BTreeMap<String, SqlValue>,
}

impl Row {
    pub fn insert(&mut self, column: impl Into<String>, value: SqlValue) {
        self.columns.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns.get(column)
    }

    fn require(&self, column: &str) -> Result<&SqlValue, StorageError> {
        self.get(column)
            .ok_or_else(|| decode_error(column, "column missing from result"))
    }

    pub fn get_i64(&self, column: &str) -> Result<i64, StorageError> {
        match self.require(column)? {
            SqlValue::Integer(v) => Ok(*v),
            SqlValue::Text(s) => s
                .parse()
                .map_err(|_| decode_error(column, format!("'{s}' is not an integer"))),
            other => Err(decode_error(column, format!("expected integer, got {other:?}"))),
        }
    }

    pub fn get_str(&self, column: &str) -> Result<&str, StorageError> {
        match self.require(column)? {
            SqlValue::Text(s) => Ok(s),
            other => Err(decode_error(column, format!("expected text, got {other:?}"))),
        }
    }

    /// Like [`Row::get_str`] but maps SQL `NULL` to `None`.
    pub fn get_opt_str(&self, column: &str) -> Result<Option<&str>, StorageError> {
        match self.require(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(s) => Ok(Some(s)),
            other => Err(decode_error(column, format!("expected text, got {other:?}"))),
        }
    }

    /// Read a UTC timestamp.
    ///
    /// SQLite hands `CURRENT_TIMESTAMP` values back as `YYYY-MM-DD HH:MM:SS`
    /// text; MySQL returns native timestamps. Unix seconds and RFC 3339 text
    /// are accepted as well.
    pub fn get_timestamp(&self, column: &str) -> Result<Timestamp, StorageError> {
        match self.require(column)? {
            SqlValue::Timestamp(ts) => Ok(*ts),
            SqlValue::Integer(secs) => DateTime::from_timestamp(*secs, 0)
                .ok_or_else(|| decode_error(column, format!("{secs} is out of range"))),
            SqlValue::Text(s) => parse_timestamp(s)
                .ok_or_else(|| decode_error(column, format!("'{s}' is not a timestamp"))),
            other => Err(decode_error(column, format!("expected timestamp, got {other:?}"))),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn decode_error(column: &str, reason: impl Into<String>) -> StorageError {
    StorageError::Decode {
        column: column.to_string(),
        reason: reason.into(),
    }
}
