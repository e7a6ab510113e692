//! Shared SQL helpers for table sources.

use super::{DbError, DbResult};

/// SQL dialect used to quote identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Sqlite,
}

/// Validate a table or column name.
///
/// Names are interpolated into SQL, so only `[A-Za-z_][A-Za-z0-9_]*` passes.
pub fn validate_identifier(name: &str) -> DbResult<&str> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(name)
    } else {
        Err(DbError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

/// Quote a validated identifier for the given dialect.
pub fn quote_identifier(name: &str, dialect: Dialect) -> DbResult<String> {
    let name = validate_identifier(name)?;
    Ok(match dialect {
        Dialect::MySql => format!("`{}`", name),
        Dialect::Sqlite => format!("\"{}\"", name),
    })
}

/// Build the chunked select used by every source:
/// `SELECT * FROM <table> ORDER BY <order_by> ASC LIMIT ? OFFSET ?`.
pub fn build_chunk_query(table: &str, order_by: &str, dialect: Dialect) -> DbResult<String> {
    Ok(format!(
        "SELECT * FROM {} ORDER BY {} ASC LIMIT ? OFFSET ?",
        quote_identifier(table, dialect)?,
        quote_identifier(order_by, dialect)?
    ))
}
