//! Connection settings for the storage backends.

/// Which backend to open and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// SQLite database file, created if missing.
    Sqlite { path: String },
    MySql(MySqlConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

/// Storage configuration resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub backend: BackendConfig,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}
