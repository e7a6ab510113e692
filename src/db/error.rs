//! Database error types.
//!
//! Backend agnostic: both the MySQL and SQLite sources map their driver
//! errors into these variants.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while reading rows from a table source.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Connection error: {message}")]
    #[diagnostic(
        code(seedsync::db::connection),
        help("Is the tunnel up? Check SEED_SOURCE_URL and the TUNNELER_* settings.")
    )]
    Connection { message: String },

    #[error("Query on table '{table}' failed: {message}")]
    #[diagnostic(code(seedsync::db::query))]
    Query { table: String, message: String },

    #[error("Invalid identifier '{name}'")]
    #[diagnostic(
        code(seedsync::db::invalid_identifier),
        help("Table and column names may only contain letters, digits and underscores.")
    )]
    InvalidIdentifier { name: String },

    #[error("Cannot decode column '{column}' ({type_name}): {message}")]
    #[diagnostic(code(seedsync::db::decode))]
    Decode {
        column: String,
        type_name: String,
        message: String,
    },

    #[error("Unsupported source URL '{url}'")]
    #[diagnostic(
        code(seedsync::db::unsupported_url),
        help("Use a mysql:// or sqlite: URL.")
    )]
    UnsupportedUrl { url: String },
}

/// Result type for table source operations.
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    pub(crate) fn query(table: &str, err: impl std::fmt::Display) -> Self {
        DbError::Query {
            table: table.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn connection(err: impl std::fmt::Display) -> Self {
        DbError::Connection {
            message: err.to_string(),
        }
    }
}
