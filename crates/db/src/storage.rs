//! The storage capability shared by every backend.

use std::fmt;

use async_trait::async_trait;

use crate::value::{Row, SqlValue, WriteResult};

/// Any failure raised while talking to the storage backend.
///
/// Callers treat every variant as a generic storage failure; the split exists
/// for diagnostics only.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Backend(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Cannot decode column '{column}': {reason}")]
    Decode { column: String, reason: String },
}

/// Which relational engine a [`Storage`] talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    MySql,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Sqlite => "SQLite",
            Backend::MySql => "MySQL",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execute parameterized SQL against one relational backend.
///
/// Statements use `?` placeholders, which both SQLite and MySQL accept.
/// Implementations are chosen once at startup and shared behind an `Arc`.
#[async_trait]
pub trait Storage: Send + Sync {
    fn backend(&self) -> Backend;

    /// Run a read statement and return its rows in result order.
    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, StorageError>;

    /// Run a read statement expected to match at most one row.
    async fn fetch_optional(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Option<Row>, StorageError> {
        Ok(self.fetch_all(sql, params).await?.into_iter().next())
    }

    /// Run a write statement.
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<WriteResult, StorageError>;

    /// Apply the embedded schema migrations for this backend.
    async fn run_migrations(&self) -> Result<(), StorageError>;

    /// Close every pooled connection. Further queries fail.
    async fn close(&self);

    /// Cheap round-trip used by health checks.
    async fn ping(&self) -> Result<(), StorageError> {
        self.fetch_all("SELECT 1", &[]).await.map(|_| ())
    }
}
