//! SSH tunnel to the remote database.
//!
//! The remote database is only reachable through an SSH port forward. The
//! tunnel is opened once at process start and kept alive for the whole run.

mod config;
mod ssh;

#[cfg(test)]
mod ssh_test;

pub use config::TunnelConfig;
pub use ssh::{Tunnel, TunnelError, TunnelState, ssh_args};
