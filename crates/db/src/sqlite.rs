//! SQLite backend.

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Database, Row as _, Sqlite, TypeInfo, ValueRef};

use crate::storage::{Backend, Storage, StorageError};
use crate::value::{Row, SqlValue, WriteResult};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations/sqlite");

/// [`Storage`] over a SQLite database file (or an in-memory database).
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (creating if missing) the database file at `path`.
    pub async fn connect(path: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// A private in-memory database.
    ///
    /// Pinned to a single connection that is never recycled: every SQLite
    /// in-memory connection is its own database.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, StorageError> {
        let rows = bind(sql, params).fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<WriteResult, StorageError> {
        let result = bind(sql, params).execute(&self.pool).await?;
        Ok(WriteResult {
            inserted_id: result.last_insert_rowid(),
            affected_rows: result.rows_affected(),
        })
    }

    async fn run_migrations(&self) -> Result<(), StorageError> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn bind<'q>(
    sql: &'q str,
    params: &[SqlValue],
) -> Query<'q, Sqlite, <Sqlite as Database>::Arguments<'q>> {
    params.iter().fold(sqlx::query(sql), |query, param| match param {
        SqlValue::Null => query.bind(None::<String>),
        SqlValue::Integer(v) => query.bind(*v),
        SqlValue::Real(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.clone()),
        SqlValue::Timestamp(v) => query.bind(*v),
    })
}

/// Decode by storage class. SQLite is dynamically typed, so the runtime class
/// of each value decides the variant rather than the declared column type.
fn decode_row(row: &SqliteRow) -> Result<Row, StorageError> {
    let mut out = Row::default();
    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;
        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" | "BOOLEAN" => SqlValue::Integer(row.try_get_unchecked::<i64, _>(idx)?),
                "REAL" | "NUMERIC" => SqlValue::Real(row.try_get_unchecked::<f64, _>(idx)?),
                _ => SqlValue::Text(row.try_get_unchecked::<String, _>(idx)?),
            }
        };
        out.insert(column.name(), value);
    }
    Ok(out)
}
