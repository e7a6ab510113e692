use crate::cli::args::*;
use crate::config::SeederConfig;
use crate::sync::Domain;
use crate::tunnel::TunnelConfig;
use clap::Parser;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    let mut argv = vec!["seedsync"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)
}

#[test]
#[serial]
fn test_defaults() {
    let cli = parse(&[]).unwrap();

    assert!(!cli.override_files);
    assert!(!cli.all);
    assert_eq!(cli.domain, None);
    assert_eq!(cli.source_url, DEFAULT_SOURCE_URL);

    let seeder = SeederConfig::from(&cli.seeder);
    assert_eq!(seeder, SeederConfig::default());

    let tunnel = TunnelConfig::from(&cli.tunnel);
    assert_eq!(tunnel, TunnelConfig::default());
}

#[test]
#[serial]
fn test_flags() {
    let cli = parse(&["--override", "--all"]).unwrap();
    assert!(cli.override_files);
    assert!(cli.all);
}

#[test]
#[serial]
fn test_domain_is_case_insensitive() {
    let cli = parse(&["--domain", "resources"]).unwrap();
    assert_eq!(cli.domain, Some(Domain::Resources));
}

#[test]
#[serial]
fn test_unknown_domain_rejected() {
    assert!(parse(&["--domain", "widgets"]).is_err());
}

#[test]
#[serial]
fn test_all_conflicts_with_domain() {
    assert!(parse(&["--all", "--domain", "skills"]).is_err());
}

#[test]
#[serial]
fn test_seeder_args() {
    let cli = parse(&[
        "--seed-dir",
        "/tmp/seeds",
        "--extension",
        "seed",
        "--chunk-size",
        "250",
    ])
    .unwrap();

    let config = SeederConfig::from(&cli.seeder);
    assert_eq!(config.directory, PathBuf::from("/tmp/seeds"));
    assert_eq!(config.extension, "seed");
    assert_eq!(config.chunk_size, 250);
    assert_eq!(config.order_by, "id");
}

#[test]
#[serial]
fn test_tunnel_args() {
    let cli = parse(&[
        "--tunnel-host",
        "bastion.example.com",
        "--tunnel-user",
        "forge",
        "--tunnel-identity-file",
        "/keys/id_ed25519",
        "--tunnel-local-port",
        "23306",
        "--tunnel-wait-ms",
        "100",
        "--tunnel-tries",
        "3",
    ])
    .unwrap();

    let tunnel = TunnelConfig::from(&cli.tunnel);
    assert!(tunnel.is_enabled());
    assert_eq!(tunnel.destination().unwrap(), "forge@bastion.example.com");
    assert_eq!(tunnel.identity_file, Some(PathBuf::from("/keys/id_ed25519")));
    assert_eq!(tunnel.local_port, 23306);
    assert_eq!(tunnel.bind_port, 3306);
    assert_eq!(tunnel.conn_wait, Duration::from_millis(100));
    assert_eq!(tunnel.conn_tries, 3);
}

#[test]
#[serial]
fn test_seeder_env_vars() {
    unsafe {
        env::set_var("SEEDER_DIRECTORY", "/tmp/env-seeds");
        env::set_var("SEEDER_EXTENSION", "txt");
    }

    let cli = parse(&[]).unwrap();
    let config = SeederConfig::from(&cli.seeder);

    // Cleanup before asserting so a failure does not leak into other tests
    unsafe {
        env::remove_var("SEEDER_DIRECTORY");
        env::remove_var("SEEDER_EXTENSION");
    }

    assert_eq!(config.directory, PathBuf::from("/tmp/env-seeds"));
    assert_eq!(config.extension, "txt");
}

#[test]
#[serial]
fn test_flag_overrides_env_var() {
    unsafe {
        env::set_var("SEED_SOURCE_URL", "mysql://env@host/env_db");
    }

    let cli = parse(&["--source-url", "sqlite::memory:"]).unwrap();

    unsafe {
        env::remove_var("SEED_SOURCE_URL");
    }

    assert_eq!(cli.source_url, "sqlite::memory:");
}
