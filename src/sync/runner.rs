//! Seed sync runner - walks a domain's plan.
//!
//! Primary tables are exported first. Relationship tables follow with
//! override forced, but only when no primary table of the domain was
//! skipped, since their rows reference the primary rows.

use miette::Diagnostic;
use thiserror::Error;
use tracing::{error, info, warn};

use super::domain::Domain;
use super::export::{ExportError, ExportOutcome, export_table};
use super::prompt::Prompt;
use crate::config::SeederConfig;
use crate::db::TableSource;

/// Errors that abort a sync run.
#[derive(Error, Diagnostic, Debug)]
pub enum SyncError {
    #[error("Syncing table '{table}' failed")]
    #[diagnostic(
        code(seedsync::sync::runner::export),
        help("Seed files written earlier in this run were kept.")
    )]
    Export {
        table: String,
        #[source]
        #[diagnostic_source]
        source: ExportError,
    },
}

/// One export that ran, and how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub table: String,
    pub outcome: ExportOutcome,
}

/// Per-table outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub domain: Domain,
    /// Exports in the order they ran.
    pub tables: Vec<TableReport>,
    /// Relationship tables not exported because a primary table was skipped.
    pub held_back: Vec<String>,
}

impl SyncReport {
    fn new(domain: Domain) -> Self {
        Self {
            domain,
            tables: Vec::new(),
            held_back: Vec::new(),
        }
    }

    /// Outcome for `table`, if it was exported in this run.
    pub fn outcome(&self, table: &str) -> Option<ExportOutcome> {
        self.tables
            .iter()
            .find(|t| t.table == table)
            .map(|t| t.outcome)
    }

    pub fn synced(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|t| t.outcome.is_synced())
            .map(|t| t.table.as_str())
            .collect()
    }

    pub fn skipped(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|t| t.outcome == ExportOutcome::Skipped)
            .map(|t| t.table.as_str())
            .collect()
    }

    pub fn total_rows(&self) -> usize {
        self.tables
            .iter()
            .map(|t| match t.outcome {
                ExportOutcome::Synced { rows } => rows,
                ExportOutcome::Skipped => 0,
            })
            .sum()
    }
}

/// Runs domain syncs against one shared source.
pub struct SeedRunner<'a, S, P: ?Sized> {
    source: &'a S,
    prompt: &'a P,
    config: &'a SeederConfig,
}

impl<'a, S, P> SeedRunner<'a, S, P>
where
    S: TableSource,
    P: Prompt + ?Sized,
{
    pub fn new(source: &'a S, prompt: &'a P, config: &'a SeederConfig) -> Self {
        Self {
            source,
            prompt,
            config,
        }
    }

    /// Sync every table of `domain`.
    ///
    /// `override_all` is the operator's global flag: when set no file is
    /// ever confirmed. The first failing export aborts the run.
    pub async fn run(&self, domain: Domain, override_all: bool) -> Result<SyncReport, SyncError> {
        let plan = domain.plan();
        let mut report = SyncReport::new(domain);

        if plan.force_override {
            info!("Preparing to overwrite all seeder files ...");
        }

        let mut primary_skipped = false;
        for table in plan.primary {
            let outcome = self
                .export(table, override_all || plan.force_override)
                .await?;
            primary_skipped |= outcome == ExportOutcome::Skipped;
            report.tables.push(TableReport {
                table: table.to_string(),
                outcome,
            });
        }

        if primary_skipped {
            if !plan.dependents.is_empty() {
                warn!(
                    tables = ?plan.dependents,
                    "primary table skipped, relationship tables left untouched"
                );
            }
            report.held_back = plan.dependents.iter().map(|t| t.to_string()).collect();
        } else {
            if plan.force_override {
                info!("Syncing relationships ...");
            }
            for table in plan.dependents {
                let outcome = self.export(table, true).await?;
                report.tables.push(TableReport {
                    table: table.to_string(),
                    outcome,
                });
            }
        }

        if plan.force_override {
            info!("Done!");
        }

        Ok(report)
    }

    /// Export a single table with the given override setting.
    pub async fn export(
        &self,
        table: &str,
        override_existing: bool,
    ) -> Result<ExportOutcome, SyncError> {
        export_table(self.source, self.prompt, self.config, table, override_existing)
            .await
            .map_err(|source| {
                error!(table, error = %source, "export failed");
                SyncError::Export {
                    table: table.to_string(),
                    source,
                }
            })
    }
}
