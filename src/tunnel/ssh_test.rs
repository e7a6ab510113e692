use crate::tunnel::*;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;

fn enabled_config(local_port: u16) -> TunnelConfig {
    TunnelConfig {
        local_port,
        hostname: Some("bastion.example.com".to_string()),
        user: Some("forge".to_string()),
        conn_wait: Duration::from_millis(10),
        conn_tries: 3,
        ..TunnelConfig::default()
    }
}

/// A local port with nothing listening on it.
async fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

#[test]
fn test_ssh_args() {
    let config = TunnelConfig {
        identity_file: Some(PathBuf::from("/home/forge/.ssh/id_ed25519")),
        port: 2222,
        bind_address: "db.internal".to_string(),
        ..enabled_config(13306)
    };

    let args = ssh_args(&config, "forge@bastion.example.com");

    assert_eq!(
        args,
        vec![
            "-N",
            "-i",
            "/home/forge/.ssh/id_ed25519",
            "-o",
            "BatchMode=yes",
            "-o",
            "ExitOnForwardFailure=yes",
            "-L",
            "127.0.0.1:13306:db.internal:3306",
            "-p",
            "2222",
            "forge@bastion.example.com",
        ]
    );
}

#[test]
fn test_ssh_args_without_identity() {
    let args = ssh_args(&enabled_config(13306), "bastion");
    assert!(!args.contains(&"-i".to_string()));
    assert_eq!(args.last().unwrap(), "bastion");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_disabled_without_host() {
    let tunnel = Tunnel::open(&TunnelConfig::default()).await.unwrap();
    assert_eq!(tunnel.state(), TunnelState::Disabled);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_disabled_with_blank_host() {
    let config = TunnelConfig {
        hostname: Some(String::new()),
        // Never spawned: a blank host disables the tunnel before ssh is looked up
        ssh_path: "/nonexistent/ssh".to_string(),
        ..TunnelConfig::default()
    };

    let tunnel = Tunnel::open(&config).await.unwrap();

    assert_eq!(tunnel.state(), TunnelState::Disabled);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_reuses_listening_endpoint() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let config = TunnelConfig {
        // Would fail if it were spawned
        ssh_path: "/nonexistent/ssh".to_string(),
        ..enabled_config(port)
    };

    let tunnel = Tunnel::open(&config).await.unwrap();

    assert_eq!(tunnel.state(), TunnelState::Reused);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_missing_ssh_binary() {
    let config = TunnelConfig {
        ssh_path: "/nonexistent/ssh".to_string(),
        ..enabled_config(free_port().await)
    };

    let result = Tunnel::open(&config).await;

    assert!(matches!(result, Err(TunnelError::SshNotFound { .. })));
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_open_ssh_exits_early() {
    // `false` ignores its arguments and exits 1 straight away
    let config = TunnelConfig {
        ssh_path: "false".to_string(),
        conn_tries: 20,
        ..enabled_config(free_port().await)
    };

    let result = Tunnel::open(&config).await;

    assert!(matches!(
        result,
        Err(TunnelError::Exited { code: Some(1) })
    ));
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_open_unreachable_after_tries() {
    use std::os::unix::fs::PermissionsExt;

    // Stays alive but never opens the port
    let temp_dir = tempfile::TempDir::new().unwrap();
    let script = temp_dir.path().join("fake-ssh");
    std::fs::write(&script, "#!/bin/sh\nsleep 5\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let config = TunnelConfig {
        ssh_path: script.display().to_string(),
        ..enabled_config(free_port().await)
    };

    let result = Tunnel::open(&config).await;

    match result {
        Err(TunnelError::Unreachable { tries, .. }) => assert_eq!(tries, 3),
        other => panic!("Expected Unreachable, got {:?}", other),
    }
}
