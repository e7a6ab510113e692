//! Table sources.
//!
//! This module provides the read side of the seed sync: a trait for listing
//! every row of a table in key order, plus MySQL and SQLite implementations
//! that resolve column types to plain JSON values.
//!
//! # Architecture
//!
//! - `error`: Backend-agnostic error types
//! - `source`: The `TableSource` trait and URL-selected `RemoteSource`
//! - `mysql` / `sqlite`: SQLx-backed implementations

mod error;
mod helpers;
mod mysql;
mod source;
mod sqlite;


pub use error::{DbError, DbResult};
pub use helpers::{Dialect, quote_identifier, validate_identifier};
pub use mysql::MySqlSource;
pub use source::{Record, RemoteSource, TableSource, database_name, redact_url};
pub use sqlite::SqliteSource;
