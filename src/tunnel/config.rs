//! Tunnel settings.

use std::path::PathBuf;
use std::time::Duration;

/// SSH port-forward settings.
///
/// The tunnel forwards `local_address:local_port` to
/// `bind_address:bind_port` as seen from `hostname`. Without a hostname no
/// tunnel is opened and the source URL is used as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunnelConfig {
    pub local_address: String,
    pub local_port: u16,
    pub bind_address: String,
    pub bind_port: u16,
    pub user: Option<String>,
    pub hostname: Option<String>,
    pub port: u16,
    pub identity_file: Option<PathBuf>,
    /// ssh executable
    pub ssh_path: String,
    /// Pause between reachability checks
    pub conn_wait: Duration,
    /// Reachability checks before giving up
    pub conn_tries: u32,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            local_address: "127.0.0.1".to_string(),
            local_port: 13306,
            bind_address: "127.0.0.1".to_string(),
            bind_port: 3306,
            user: None,
            hostname: None,
            port: 22,
            identity_file: None,
            ssh_path: "ssh".to_string(),
            conn_wait: Duration::from_millis(250),
            conn_tries: 10,
        }
    }
}

impl TunnelConfig {
    pub fn is_enabled(&self) -> bool {
        self.hostname.as_deref().is_some_and(|h| !h.is_empty())
    }

    /// Local end of the forward.
    pub fn local_endpoint(&self) -> String {
        format!("{}:{}", self.local_address, self.local_port)
    }

    /// `user@hostname`, or just the hostname without a user.
    pub fn destination(&self) -> Option<String> {
        let hostname = self.hostname.as_deref().filter(|h| !h.is_empty())?;
        Some(match self.user.as_deref().filter(|u| !u.is_empty()) {
            Some(user) => format!("{}@{}", user, hostname),
            None => hostname.to_string(),
        })
    }
}
