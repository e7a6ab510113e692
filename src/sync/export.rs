//! Export one table to its seed file.

use miette::Diagnostic;
use thiserror::Error;
use tracing::info;

use super::json::{JsonError, write_json_array};
use super::paths::{seed_file_name, seed_path};
use super::prompt::{Prompt, PromptError};
use crate::config::SeederConfig;
use crate::db::{DbError, TableSource};

/// Errors that can occur during a table export.
#[derive(Error, Diagnostic, Debug)]
pub enum ExportError {
    #[error("Database error: {0}")]
    #[diagnostic(code(seedsync::sync::export::database))]
    Database(#[from] DbError),

    #[error("Seed file error: {0}")]
    #[diagnostic(code(seedsync::sync::export::file))]
    File(#[from] JsonError),

    #[error("Prompt error: {0}")]
    #[diagnostic(code(seedsync::sync::export::prompt))]
    Prompt(#[from] PromptError),
}

/// Result of exporting one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The seed file was rewritten with `rows` records.
    Synced { rows: usize },
    /// The operator declined to overwrite an existing seed file.
    Skipped,
}

impl ExportOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, ExportOutcome::Synced { .. })
    }
}

/// Export every row of `table` to `<directory>/<table>.<extension>`.
///
/// When the seed file already exists and `override_existing` is false the
/// operator is asked first; declining returns [`ExportOutcome::Skipped`]
/// without querying the source or touching the file.
pub async fn export_table<S, P>(
    source: &S,
    prompt: &P,
    config: &SeederConfig,
    table: &str,
    override_existing: bool,
) -> Result<ExportOutcome, ExportError>
where
    S: TableSource,
    P: Prompt + ?Sized,
{
    let file_name = seed_file_name(table, &config.extension);
    let path = seed_path(&config.directory, table, &config.extension);

    info!("Getting {} from {}", table, source.describe());
    info!("Generating {}", file_name);

    if path.exists() && !override_existing {
        let question = format!(
            "The seeder source file {} already exists. Are you sure you want to override its contents?",
            file_name
        );
        if !prompt.confirm(&question)? {
            info!("Goodbye!");
            return Ok(ExportOutcome::Skipped);
        }
    }

    let records = source
        .fetch_ordered(table, &config.order_by, config.chunk_size)
        .await?;
    write_json_array(&path, &records)?;

    info!(rows = records.len(), "{} synced", table);

    Ok(ExportOutcome::Synced {
        rows: records.len(),
    })
}
