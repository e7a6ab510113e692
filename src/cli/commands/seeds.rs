//! The seed generation command.

use tracing::info;

use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::config::SeederConfig;
use crate::db::{RemoteSource, TableSource, redact_url};
use crate::sync::{Domain, Prompt, PromptError, SeedRunner, SyncReport};
use crate::tunnel::{Tunnel, TunnelConfig};

/// Question shown by the domain menu.
pub const MENU_QUESTION: &str = "Which seeder data would you like to sync?";

/// Open the tunnel and the remote connection, pick a domain and sync it.
///
/// The tunnel and connection are opened before the menu is shown, so they
/// exist even when the operator ends up declining every overwrite.
pub async fn generate<P>(cli: &Cli, prompt: &P) -> CliResult<SyncReport>
where
    P: Prompt + ?Sized,
{
    let tunnel = Tunnel::open(&TunnelConfig::from(&cli.tunnel)).await?;
    let source = RemoteSource::connect(&cli.source_url)
        .await
        .map_err(|source| CliError::ConnectionFailed {
            url: redact_url(&cli.source_url),
            source,
        })?;
    info!(tunnel = ?tunnel.state(), "Connected to {}", source.describe());

    let domain = select_domain(cli.all, cli.domain, prompt)?;
    let config = SeederConfig::from(&cli.seeder);

    let report = SeedRunner::new(&source, prompt, &config)
        .run(domain, cli.override_files)
        .await?;

    drop(tunnel);
    Ok(report)
}

/// `--all` wins, then `--domain`, otherwise ask with the menu.
pub fn select_domain<P>(all: bool, domain: Option<Domain>, prompt: &P) -> CliResult<Domain>
where
    P: Prompt + ?Sized,
{
    if all {
        return Ok(Domain::All);
    }
    if let Some(domain) = domain {
        return Ok(domain);
    }

    let index = prompt.choose(MENU_QUESTION, &Domain::menu())?;
    Domain::ALL
        .get(index)
        .copied()
        .ok_or(CliError::Prompt(PromptError::InvalidChoice { index }))
}
