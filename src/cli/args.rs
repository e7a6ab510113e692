//! Command-line arguments. Every setting also reads an environment variable.

use clap::{Args, Parser};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{DEFAULT_CHUNK_SIZE, SeederConfig};
use crate::sync::{DEFAULT_SEED_DIR, DEFAULT_SEED_EXTENSION, Domain};
use crate::tunnel::TunnelConfig;

/// Default remote database URL, reached through the tunnel's local end.
pub const DEFAULT_SOURCE_URL: &str = "mysql://root@127.0.0.1:13306/onramp";

#[derive(Parser, Debug)]
#[command(name = "seedsync")]
#[command(
    author,
    version,
    about = "Sync core data and generate new seed files for local development",
    long_about = None
)]
pub struct Cli {
    /// Overwrite existing seed files without asking
    #[arg(long = "override")]
    pub override_files: bool,

    /// Sync every domain without showing the menu
    #[arg(long, conflicts_with = "domain")]
    pub all: bool,

    /// Sync one domain without showing the menu (Modules, Resources, Skills, Terms, Tracks, All)
    #[arg(long, value_parser = parse_domain)]
    pub domain: Option<Domain>,

    #[command(flatten)]
    pub seeder: SeederArgs,

    /// Remote database URL (mysql:// or sqlite:)
    #[arg(long, env = "SEED_SOURCE_URL", default_value = DEFAULT_SOURCE_URL, hide_env_values = true)]
    pub source_url: String,

    #[command(flatten)]
    pub tunnel: TunnelArgs,
}

#[derive(Args, Debug)]
pub struct SeederArgs {
    /// Directory the seed files are written to
    #[arg(long, env = "SEEDER_DIRECTORY", default_value = DEFAULT_SEED_DIR)]
    pub seed_dir: PathBuf,

    /// Seed file extension
    #[arg(long, env = "SEEDER_EXTENSION", default_value = DEFAULT_SEED_EXTENSION)]
    pub extension: String,

    /// Rows fetched per query
    #[arg(long, env = "SEEDER_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
}

#[derive(Args, Debug)]
pub struct TunnelArgs {
    /// SSH host to tunnel through (no tunnel when unset)
    #[arg(long = "tunnel-host", env = "TUNNELER_HOSTNAME")]
    pub hostname: Option<String>,

    /// SSH user
    #[arg(long = "tunnel-user", env = "TUNNELER_USER")]
    pub user: Option<String>,

    /// SSH port
    #[arg(long = "tunnel-port", env = "TUNNELER_PORT", default_value_t = 22)]
    pub port: u16,

    /// SSH private key
    #[arg(long = "tunnel-identity-file", env = "TUNNELER_IDENTITY_FILE")]
    pub identity_file: Option<PathBuf>,

    /// Local address of the forward
    #[arg(long = "tunnel-local-address", env = "TUNNELER_LOCAL_ADDRESS", default_value = "127.0.0.1")]
    pub local_address: String,

    /// Local port of the forward
    #[arg(long = "tunnel-local-port", env = "TUNNELER_LOCAL_PORT", default_value_t = 13306)]
    pub local_port: u16,

    /// Database address as seen from the SSH host
    #[arg(long = "tunnel-bind-address", env = "TUNNELER_BIND_ADDRESS", default_value = "127.0.0.1")]
    pub bind_address: String,

    /// Database port as seen from the SSH host
    #[arg(long = "tunnel-bind-port", env = "TUNNELER_BIND_PORT", default_value_t = 3306)]
    pub bind_port: u16,

    /// ssh executable
    #[arg(long = "tunnel-ssh-path", env = "TUNNELER_SSH_PATH", default_value = "ssh")]
    pub ssh_path: String,

    /// Milliseconds between reachability checks
    #[arg(long = "tunnel-wait-ms", env = "TUNNELER_CONN_WAIT", default_value_t = 250)]
    pub conn_wait_ms: u64,

    /// Reachability checks before giving up
    #[arg(long = "tunnel-tries", env = "TUNNELER_CONN_TRIES", default_value_t = 10)]
    pub conn_tries: u32,
}

fn parse_domain(value: &str) -> Result<Domain, String> {
    value.parse()
}

impl From<&SeederArgs> for SeederConfig {
    fn from(args: &SeederArgs) -> Self {
        Self {
            directory: args.seed_dir.clone(),
            extension: args.extension.clone(),
            chunk_size: args.chunk_size,
            ..SeederConfig::default()
        }
    }
}

impl From<&TunnelArgs> for TunnelConfig {
    fn from(args: &TunnelArgs) -> Self {
        Self {
            local_address: args.local_address.clone(),
            local_port: args.local_port,
            bind_address: args.bind_address.clone(),
            bind_port: args.bind_port,
            user: args.user.clone(),
            hostname: args.hostname.clone(),
            port: args.port,
            identity_file: args.identity_file.clone(),
            ssh_path: args.ssh_path.clone(),
            conn_wait: Duration::from_millis(args.conn_wait_ms),
            conn_tries: args.conn_tries,
        }
    }
}
