use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;
use crate::sync::{PromptError, SyncError};
use crate::tunnel::TunnelError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Failed to open tunnel to the remote database")]
    #[diagnostic(code(seedsync::cli::tunnel))]
    Tunnel {
        #[source]
        #[diagnostic_source]
        source: TunnelError,
    },

    #[error("Failed to connect to {url}")]
    #[diagnostic(code(seedsync::cli::connection_failed))]
    ConnectionFailed {
        url: String,
        #[source]
        #[diagnostic_source]
        source: DbError,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Sync(#[from] SyncError),

    #[error("Could not read the domain choice: {0}")]
    #[diagnostic(code(seedsync::cli::prompt))]
    Prompt(#[from] PromptError),
}

impl From<TunnelError> for CliError {
    fn from(source: TunnelError) -> Self {
        CliError::Tunnel { source }
    }
}

pub type CliResult<T> = Result<T, CliError>;
