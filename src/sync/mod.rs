//! Sync module - seed file generation from the remote database.
//!
//! This module turns an operator's domain choice into an ordered list of
//! table exports and writes each table to a JSON seed file for local
//! development.

mod domain;
mod export;
mod json;
mod paths;
mod prompt;
mod runner;
#[cfg(test)]
pub(crate) mod test_support;

pub use domain::{Domain, SyncPlan};
pub use export::{ExportError, ExportOutcome, export_table};
pub use json::{JsonError, read_json_array, write_json_array};
pub use paths::{DEFAULT_SEED_DIR, DEFAULT_SEED_EXTENSION, seed_file_name, seed_path};
#[cfg(test)]
pub use prompt::MockPrompt;
pub use prompt::{ConsolePrompt, Prompt, PromptError};
pub use runner::{SeedRunner, SyncError, SyncReport, TableReport};
