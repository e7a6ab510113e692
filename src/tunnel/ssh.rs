//! Spawning and verifying the ssh port forward.

use miette::Diagnostic;
use std::process::Stdio;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::process::{Child, Command};
use tracing::{debug, info};

use super::TunnelConfig;

/// Errors that can occur while opening the tunnel.
#[derive(Error, Diagnostic, Debug)]
pub enum TunnelError {
    #[error("ssh executable '{path}' not found")]
    #[diagnostic(
        code(seedsync::tunnel::ssh_not_found),
        help("Install an OpenSSH client or set TUNNELER_SSH_PATH.")
    )]
    SshNotFound { path: String },

    #[error("Failed to start ssh: {0}")]
    #[diagnostic(code(seedsync::tunnel::spawn))]
    Spawn(#[source] std::io::Error),

    #[error("ssh exited before the tunnel came up (exit code {code:?})")]
    #[diagnostic(
        code(seedsync::tunnel::exited),
        help("Check TUNNELER_HOSTNAME, TUNNELER_USER and TUNNELER_IDENTITY_FILE.")
    )]
    Exited { code: Option<i32> },

    #[error("Tunnel endpoint {endpoint} unreachable after {tries} tries")]
    #[diagnostic(code(seedsync::tunnel::unreachable))]
    Unreachable { endpoint: String, tries: u32 },
}

/// How the tunnel was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunnelState {
    /// No tunnel host configured; connect directly.
    Disabled,
    /// Something already listens on the local endpoint.
    Reused,
    /// An ssh process was started by this run.
    Spawned,
}

/// An open tunnel. A spawned ssh process is killed when this drops.
#[derive(Debug)]
pub struct Tunnel {
    state: TunnelState,
    // Only held for `kill_on_drop`.
    _child: Option<Child>,
}

/// Arguments for `ssh`: no remote command, forward the local port, fail
/// instead of prompting.
pub fn ssh_args(config: &TunnelConfig, destination: &str) -> Vec<String> {
    let mut args = vec!["-N".to_string()];
    if let Some(identity) = &config.identity_file {
        args.push("-i".to_string());
        args.push(identity.display().to_string());
    }
    args.extend([
        "-o".to_string(),
        "BatchMode=yes".to_string(),
        "-o".to_string(),
        "ExitOnForwardFailure=yes".to_string(),
        "-L".to_string(),
        format!(
            "{}:{}:{}:{}",
            config.local_address, config.local_port, config.bind_address, config.bind_port
        ),
        "-p".to_string(),
        config.port.to_string(),
        destination.to_string(),
    ]);
    args
}

impl Tunnel {
    /// Open the tunnel described by `config`, or reuse one that is already up.
    pub async fn open(config: &TunnelConfig) -> Result<Self, TunnelError> {
        if !config.is_enabled() {
            info!("No tunnel host configured, connecting directly");
            return Ok(Self {
                state: TunnelState::Disabled,
                _child: None,
            });
        }
        let destination = config.destination().unwrap_or_default();

        let endpoint = config.local_endpoint();
        if is_listening(&endpoint).await {
            info!("Reusing tunnel on {}", endpoint);
            return Ok(Self {
                state: TunnelState::Reused,
                _child: None,
            });
        }

        info!("Opening tunnel {} -> {}", endpoint, destination);
        let mut child = Command::new(&config.ssh_path)
            .args(ssh_args(config, &destination))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TunnelError::SshNotFound {
                        path: config.ssh_path.clone(),
                    }
                } else {
                    TunnelError::Spawn(e)
                }
            })?;

        for attempt in 1..=config.conn_tries {
            if is_listening(&endpoint).await {
                info!("Tunnel up on {}", endpoint);
                return Ok(Self {
                    state: TunnelState::Spawned,
                    _child: Some(child),
                });
            }
            if let Some(status) = child.try_wait().map_err(TunnelError::Spawn)? {
                return Err(TunnelError::Exited {
                    code: status.code(),
                });
            }
            debug!(attempt, "tunnel not reachable yet");
            tokio::time::sleep(config.conn_wait).await;
        }

        Err(TunnelError::Unreachable {
            endpoint,
            tries: config.conn_tries,
        })
    }

    pub fn state(&self) -> TunnelState {
        self.state
    }
}

async fn is_listening(endpoint: &str) -> bool {
    TcpStream::connect(endpoint).await.is_ok()
}
