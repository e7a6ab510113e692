pub mod args;
mod commands;
pub mod error;
mod utils;

#[cfg(test)]
mod args_test;
#[cfg(test)]
mod utils_test;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use args::Cli;
pub use commands::seeds::{generate, select_domain};
pub use utils::format_report;

use crate::sync::ConsolePrompt;

/// Initialize tracing subscriber with env filter.
///
/// Progress goes to stderr so prompts on stdout stay readable.
fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seedsync=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Parse arguments, sync the chosen domain and print the per-table report.
pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let prompt = ConsolePrompt::stdio();
    let report = generate(&cli, &prompt).await?;

    println!("{}", format_report(&report));
    Ok(())
}
