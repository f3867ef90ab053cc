use std::str::FromStr;

use axum::http::HeaderValue;
use itemdesk_db::{BackendConfig, DatabaseConfig, MySqlConfig};

/// A configuration variable held a value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{key} has an invalid value: '{value}'")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Storage backend selection and connection parameters.
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3001`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `USE_SQLITE`           | `true`                     |
    /// | `SQLITE_PATH`          | `database.sqlite`          |
    /// | `DB_HOST`              | `localhost`                |
    /// | `DB_PORT`              | `3306`                     |
    /// | `DB_USER`              | `root`                     |
    /// | `DB_PASSWORD`          | (empty)                    |
    /// | `DB_NAME`              | `crud_app`                 |
    /// | `DB_MAX_CONNECTIONS`   | `10`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port = parse_var(&lookup, "PORT", 3001)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|origin| HeaderValue::from_str(origin).is_err())
        {
            return Err(ConfigError {
                key: "CORS_ORIGINS",
                value: bad.clone(),
            });
        }

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let max_connections = parse_var(&lookup, "DB_MAX_CONNECTIONS", 10)?;

        // Anything other than a literal `false` keeps SQLite.
        let use_sqlite = var("USE_SQLITE", "true") != "false";
        let backend = if use_sqlite {
            BackendConfig::Sqlite {
                path: var("SQLITE_PATH", "database.sqlite"),
            }
        } else {
            BackendConfig::MySql(MySqlConfig {
                host: var("DB_HOST", "localhost"),
                port: parse_var(&lookup, "DB_PORT", 3306)?,
                user: var("DB_USER", "root"),
                password: var("DB_PASSWORD", ""),
                database: var("DB_NAME", "crud_app"),
            })
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database: DatabaseConfig {
                backend,
                max_connections,
            },
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError { key, value: raw }),
    }
}
