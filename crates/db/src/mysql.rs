//! MySQL backend.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::migrate::Migrator;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, Database, MySql, Row as _, TypeInfo, ValueRef};

use crate::config::MySqlConfig;
use crate::storage::{Backend, Storage, StorageError};
use crate::value::{Row, SqlValue, WriteResult};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations/mysql");

/// [`Storage`] over a MySQL server.
#[derive(Debug, Clone)]
pub struct MySqlStorage {
    pool: MySqlPool,
}

impl MySqlStorage {
    pub async fn connect(config: &MySqlConfig, max_connections: u32) -> Result<Self, StorageError> {
        // Session time zone stays at sqlx's default of UTC, so TIMESTAMP
        // columns decode without conversion.
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl Storage for MySqlStorage {
    fn backend(&self) -> Backend {
        Backend::MySql
    }

    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, StorageError> {
        let rows = bind(sql, params).fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<WriteResult, StorageError> {
        let result = bind(sql, params).execute(&self.pool).await?;
        Ok(WriteResult {
            inserted_id: result.last_insert_id() as i64,
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
) -> Query<'q, MySql, <MySql as Database>::Arguments<'q>> {
    params.iter().fold(sqlx::query(sql), |query, param| match param {
        SqlValue::Null => query.bind(None::<String>),
        SqlValue::Integer(v) => query.bind(*v),
        SqlValue::Real(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.clone()),
        SqlValue::Timestamp(v) => query.bind(*v),
    })
}

/// Decode by declared column type.
fn decode_row(row: &MySqlRow) -> Result<Row, StorageError> {
    let mut out = Row::default();
    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;
        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            let type_name = raw.type_info().name().to_ascii_uppercase();
            let base = type_name.trim_end_matches(" UNSIGNED");
            match base {
                "BOOLEAN" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
                    SqlValue::Integer(row.try_get_unchecked::<i64, _>(idx)?)
                }
                "FLOAT" | "DOUBLE" => SqlValue::Real(row.try_get_unchecked::<f64, _>(idx)?),
                "TIMESTAMP" | "DATETIME" => SqlValue::Timestamp(
                    row.try_get_unchecked::<NaiveDateTime, _>(idx)?.and_utc(),
                ),
                "DATE" => SqlValue::Text(row.try_get_unchecked::<NaiveDate, _>(idx)?.to_string()),
                _ => SqlValue::Text(row.try_get_unchecked::<String, _>(idx)?),
            }
        };
        out.insert(column.name(), value);
    }
    Ok(out)
}
