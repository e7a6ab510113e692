//! Seeder settings.

use std::path::PathBuf;

use crate::sync::{DEFAULT_SEED_DIR, DEFAULT_SEED_EXTENSION};

/// Default number of rows read per query.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default key column used to order exported rows.
pub const DEFAULT_ORDER_COLUMN: &str = "id";

/// Where and how seed files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeederConfig {
    /// Directory holding the seed files
    pub directory: PathBuf,
    /// Seed file extension, without the dot
    pub extension: String,
    /// Rows per query while reading a table
    pub chunk_size: usize,
    /// Primary key column rows are ordered by
    pub order_by: String,
}

impl Default for SeederConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_SEED_DIR),
            extension: DEFAULT_SEED_EXTENSION.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            order_by: DEFAULT_ORDER_COLUMN.to_string(),
        }
    }
}

impl SeederConfig {
    /// Config writing into `directory` with every other setting at its default.
    pub fn in_dir(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }
}
