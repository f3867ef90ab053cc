//! Storage adapter for the item service.
//!
//! [`Storage`] is the single query capability the rest of the system sees;
//! [`SqliteStorage`] and [`MySqlStorage`] implement it. [`connect`] picks one
//! from [`DatabaseConfig`] at startup.

use std::sync::Arc;

pub mod config;
pub mod mysql;
pub mod repositories;
pub mod sqlite;
pub mod storage;
pub mod value;

pub use config::{BackendConfig, DatabaseConfig, MySqlConfig};
pub use mysql::MySqlStorage;
pub use sqlite::SqliteStorage;
pub use storage::{Backend, Storage, StorageError};
pub use value::{Row, SqlValue, WriteResult};

/// Shared handle to the configured backend.
pub type DbHandle = Arc<dyn Storage>;

/// Open the backend named by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<DbHandle, StorageError> {
    let storage: DbHandle = match &config.backend {
        BackendConfig::Sqlite { path } => {
            tracing::debug!(%path, "Opening SQLite database");
            Arc::new(SqliteStorage::connect(path, config.max_connections).await?)
        }
        BackendConfig::MySql(mysql) => {
            tracing::debug!(host = %mysql.host, database = %mysql.database, "Connecting to MySQL");
            Arc::new(MySqlStorage::connect(mysql, config.max_connections).await?)
        }
    };
    Ok(storage)
}

/// Verify the backend answers queries.
pub async fn health_check(storage: &dyn Storage) -> Result<(), StorageError> {
    storage.ping().await
}

/// Apply pending schema migrations.
pub async fn run_migrations(storage: &dyn Storage) -> Result<(), StorageError> {
    storage.run_migrations().await
}
