//! MySQL table source, used against the tunneled remote database.

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Number, Value};
use sqlx::mysql::types::MySqlTime;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use tracing::debug;

use super::helpers::{Dialect, build_chunk_query};
use super::source::{Record, TableSource, database_name};
use super::{DbError, DbResult};

/// SQLx-backed MySQL source.
pub struct MySqlSource {
    pool: MySqlPool,
    database: String,
}

impl MySqlSource {
    /// Open a single-connection pool. The connection is reused for every table.
    pub async fn connect(url: &str) -> DbResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(DbError::connection)?;

        Ok(Self {
            pool,
            database: database_name(url),
        })
    }

    /// Underlying pool, for setting up fixtures.
    #[cfg(test)]
    pub(crate) fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

impl TableSource for MySqlSource {
    fn describe(&self) -> &str {
        &self.database
    }

    async fn fetch_ordered(
        &self,
        table: &str,
        order_by: &str,
        chunk_size: usize,
    ) -> DbResult<Vec<Record>> {
        let sql = build_chunk_query(table, order_by, Dialect::MySql)?;
        let chunk_size = chunk_size.max(1);
        let mut records = Vec::new();
        let mut offset = 0usize;

        loop {
            let rows = sqlx::query(&sql)
                .bind(chunk_size as u64)
                .bind(offset as u64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DbError::query(table, e))?;

            debug!(table, offset, rows = rows.len(), "fetched chunk");

            let fetched = rows.len();
            for row in &rows {
                records.push(mysql_record(row)?);
            }

            if fetched < chunk_size {
                break;
            }
            offset += fetched;
        }

        Ok(records)
    }
}

/// Literal written for a `0000-00-00 00:00:00` DATETIME or TIMESTAMP.
pub(crate) const ZERO_DATETIME: &str = "0000-00-00 00:00:00";

/// Literal written for a `0000-00-00` DATE.
pub(crate) const ZERO_DATE: &str = "0000-00-00";

/// How a MySQL column is turned into a JSON value, keyed by its type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Conversion {
    Bool,
    Signed,
    Unsigned,
    Year,
    Float,
    Double,
    DateTime,
    Date,
    Time,
    Json,
    Bit,
    Binary,
    Text,
}

impl Conversion {
    /// Resolve a column type name as reported by the driver.
    ///
    /// `TINYINT(1)` columns are reported as `BOOLEAN`. DECIMAL, CHAR, VARCHAR,
    /// TEXT, ENUM, SET and anything unknown fall through to `Text`.
    pub(crate) fn for_type(type_name: &str) -> Self {
        match type_name {
            "BOOLEAN" => Self::Bool,
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => Self::Signed,
            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" => Self::Unsigned,
            "YEAR" => Self::Year,
            "FLOAT" => Self::Float,
            "DOUBLE" => Self::Double,
            "DATETIME" | "TIMESTAMP" => Self::DateTime,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "JSON" => Self::Json,
            "BIT" => Self::Bit,
            "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
                Self::Binary
            }
            _ => Self::Text,
        }
    }
}

/// Convert a row into a record, resolving column types to JSON primitives.
pub(crate) fn mysql_record(row: &MySqlRow) -> DbResult<Record> {
    let mut record = Record::with_capacity(row.len());
    for (index, column) in row.columns().iter().enumerate() {
        let type_name = column.type_info().name();
        let value = mysql_value(row, index, Conversion::for_type(type_name)).map_err(|e| {
            DbError::Decode {
                column: column.name().to_string(),
                type_name: type_name.to_string(),
                message: e.to_string(),
            }
        })?;
        record.insert(column.name().to_string(), value);
    }
    Ok(record)
}

fn mysql_value(row: &MySqlRow, index: usize, conversion: Conversion) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match conversion {
        Conversion::Bool => Value::Bool(row.try_get::<bool, _>(index)?),
        Conversion::Signed => Value::from(row.try_get::<i64, _>(index)?),
        Conversion::Unsigned => Value::from(row.try_get::<u64, _>(index)?),
        Conversion::Year => Value::from(row.try_get_unchecked::<u16, _>(index)?),
        Conversion::Float => float_value(f64::from(row.try_get::<f32, _>(index)?)),
        Conversion::Double => float_value(row.try_get::<f64, _>(index)?),
        Conversion::DateTime => match row.try_get::<NaiveDateTime, _>(index) {
            Ok(datetime) => Value::String(datetime.format("%Y-%m-%d %H:%M:%S").to_string()),
            Err(e) => zero_temporal(row, index, ZERO_DATETIME, e)?,
        },
        Conversion::Date => match row.try_get::<NaiveDate, _>(index) {
            Ok(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            Err(e) => zero_temporal(row, index, ZERO_DATE, e)?,
        },
        Conversion::Time => {
            let time = row.try_get::<MySqlTime, _>(index)?;
            Value::String(format_time(
                time.is_negative(),
                time.hours(),
                time.minutes(),
                time.seconds(),
            ))
        }
        Conversion::Json => row.try_get::<Value, _>(index)?,
        Conversion::Bit => Value::from(fold_bits(&row.try_get_unchecked::<Vec<u8>, _>(index)?)),
        Conversion::Binary => Value::String(STANDARD.encode(row.try_get::<Vec<u8>, _>(index)?)),
        Conversion::Text => match row.try_get_unchecked::<String, _>(index) {
            Ok(text) => Value::String(text),
            Err(_) => Value::String(STANDARD.encode(row.try_get_unchecked::<Vec<u8>, _>(index)?)),
        },
    };

    Ok(value)
}

/// Zero dates have no calendar value, so the chrono decode rejects them.
/// Write the zero literal instead and surface any other decode failure.
fn zero_temporal(
    row: &MySqlRow,
    index: usize,
    literal: &str,
    error: sqlx::Error,
) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_unchecked::<Vec<u8>, _>(index)?;
    if is_zero_temporal(&raw) {
        Ok(Value::String(literal.to_string()))
    } else {
        Err(error)
    }
}

/// Whether a raw DATE/DATETIME/TIMESTAMP value is the zero date.
///
/// Binary values start with a length byte followed by the date parts; MySQL
/// sends a zero date as length 0. Text values carry the literal itself.
pub(crate) fn is_zero_temporal(raw: &[u8]) -> bool {
    match raw.split_first() {
        None => true,
        Some(_) if raw.starts_with(ZERO_DATE.as_bytes()) => true,
        Some((_, parts)) => parts.iter().all(|b| *b == 0),
    }
}

/// `[-]HH:MM:SS`, with hours allowed past 24 as MySQL TIME ranges up to 838.
pub(crate) fn format_time(negative: bool, hours: u32, minutes: u8, seconds: u8) -> String {
    let sign = if negative { "-" } else { "" };
    format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
}

/// BIT(n) values arrive big-endian.
pub(crate) fn fold_bits(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
}

pub(crate) fn float_value(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}
