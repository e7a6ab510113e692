//! SQLite table source.
//!
//! Reads local database snapshots and stands in for the remote database in
//! tests.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Number, Value};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use tracing::debug;

use super::helpers::{Dialect, build_chunk_query};
use super::source::{Record, TableSource, database_name};
use super::{DbError, DbResult};

/// SQLx-backed SQLite source.
pub struct SqliteSource {
    pool: SqlitePool,
    database: String,
}

impl SqliteSource {
    /// Open a database from a `sqlite:` URL.
    pub async fn connect(url: &str) -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(DbError::connection)?;

        Ok(Self {
            pool,
            database: database_name(url),
        })
    }

    /// Create an in-memory database.
    ///
    /// The pool holds exactly one connection that never expires, otherwise
    /// the data would vanish with it.
    pub async fn in_memory() -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(DbError::connection)?;

        Ok(Self {
            pool,
            database: "memory".to_string(),
        })
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl TableSource for SqliteSource {
    fn describe(&self) -> &str {
        &self.database
    }

    async fn fetch_ordered(
        &self,
        table: &str,
        order_by: &str,
        chunk_size: usize,
    ) -> DbResult<Vec<Record>> {
        let sql = build_chunk_query(table, order_by, Dialect::Sqlite)?;
        let chunk_size = chunk_size.max(1);
        let mut records = Vec::new();
        let mut offset = 0usize;

        loop {
            let rows = sqlx::query(&sql)
                .bind(chunk_size as i64)
                .bind(offset as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DbError::query(table, e))?;

            debug!(table, offset, rows = rows.len(), "fetched chunk");

            let fetched = rows.len();
            for row in &rows {
                records.push(sqlite_record(row)?);
            }

            if fetched < chunk_size {
                break;
            }
            offset += fetched;
        }

        Ok(records)
    }
}

pub(crate) fn sqlite_record(row: &SqliteRow) -> DbResult<Record> {
    let mut record = Record::with_capacity(row.len());
    for (index, column) in row.columns().iter().enumerate() {
        let declared = column.type_info().name();
        let value = sqlite_value(row, index, declared).map_err(|e| DbError::Decode {
            column: column.name().to_string(),
            type_name: declared.to_string(),
            message: e.to_string(),
        })?;
        record.insert(column.name().to_string(), value);
    }
    Ok(record)
}

fn sqlite_value(row: &SqliteRow, index: usize, declared: &str) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    // Storage class of the stored value, which may differ from the declared type.
    let storage = raw.type_info().name().to_string();

    if declared == "BOOLEAN" {
        return Ok(Value::Bool(row.try_get::<bool, _>(index)?));
    }

    let value = match storage.as_str() {
        "INTEGER" => Value::from(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" => {
            let real = row.try_get_unchecked::<f64, _>(index)?;
            Number::from_f64(real).map_or(Value::Null, Value::Number)
        }
        "BLOB" => Value::String(STANDARD.encode(row.try_get_unchecked::<Vec<u8>, _>(index)?)),
        _ => Value::String(row.try_get_unchecked::<String, _>(index)?),
    };

    Ok(value)
}
