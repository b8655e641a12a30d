// crates/satcat-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Entry Point Tests
// Description: Unit tests for argument parsing and config resolution.
// Purpose: Validate flag defaults, override precedence, and end-to-end
//          archive loading against a real store.
// Dependencies: satcat-cli main helpers, tempfile
// ============================================================================

//! ## Overview
//! Parses real argument vectors through the clap definitions and runs the
//! load path against an on-disk store; nothing touches the network.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use clap::Parser;
use satcat_store_sqlite::SqliteCatalogConfig;
use satcat_store_sqlite::SqliteCatalogStore;

use super::Cli;
use super::CliError;
use super::Commands;
use super::run_load;
use super::serve_config;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// ISS element line 1 (valid checksum).
const ISS_LINE1: &str = "1 25544U 98067A   19128.56248153  .00016717  00000-0  10270-3 0  9002";

/// ISS element line 2 (valid checksum).
const ISS_LINE2: &str = "2 25544  51.6390 198.1271 0001239 315.7000  44.4052 15.52641749  9097";

// ============================================================================
// SECTION: Argument Parsing
// ============================================================================

#[test]
fn load_flags_parse_with_defaults() {
    let cli = Cli::try_parse_from([
        "satcat", "load", "--source", "visual.txt", "--url", "https://example.org/tle/full.txt",
    ])
    .unwrap();
    assert!(!cli.quiet);
    let Commands::Load(args) = cli.command else {
        panic!("expected the load subcommand");
    };
    assert_eq!(args.database, PathBuf::from("satcat.db"));
    assert!(!args.initdb);
    assert!(!args.refetch);
    assert!(!args.update);
    assert!(!args.classified);
    assert_eq!(args.source, vec![PathBuf::from("visual.txt")]);
    assert_eq!(args.url, vec!["https://example.org/tle/full.txt".to_string()]);
}

#[test]
fn serve_flags_parse() {
    let cli = Cli::try_parse_from([
        "satcat", "--quiet", "serve", "--port", "8080", "--writable",
    ])
    .unwrap();
    assert!(cli.quiet);
    let Commands::Serve(args) = cli.command else {
        panic!("expected the serve subcommand");
    };
    assert_eq!(args.port, Some(8080));
    assert!(args.writable);
    assert!(args.config.is_none());
}

#[test]
fn unknown_subcommands_are_rejected() {
    assert!(Cli::try_parse_from(["satcat", "propagate"]).is_err());
}

// ============================================================================
// SECTION: Serve Configuration
// ============================================================================

#[test]
fn serve_defaults_apply_without_a_config_file() {
    let cli = Cli::try_parse_from(["satcat", "serve"]).unwrap();
    let Commands::Serve(args) = cli.command else {
        panic!("expected the serve subcommand");
    };
    let config = serve_config(&args).unwrap();
    assert_eq!(config.port, 4853);
    assert_eq!(config.listen, "127.0.0.1");
    assert!(!config.writable);
    assert_eq!(config.store.path, PathBuf::from("satcat.db"));
}

#[test]
fn flags_override_the_config_file() {
    let directory = tempfile::tempdir().unwrap();
    let config_path = directory.path().join("satcat.toml");
    std::fs::write(&config_path, "port = 9000\n[store]\npath = \"from-file.db\"\n").unwrap();
    let cli = Cli::try_parse_from([
        "satcat",
        "serve",
        "--config",
        config_path.to_str().unwrap(),
        "--port",
        "9001",
        "--writable",
    ])
    .unwrap();
    let Commands::Serve(args) = cli.command else {
        panic!("expected the serve subcommand");
    };
    let config = serve_config(&args).unwrap();
    assert_eq!(config.port, 9001);
    assert!(config.writable);
    assert_eq!(config.store.path, PathBuf::from("from-file.db"));
}

// ============================================================================
// SECTION: Load Path
// ============================================================================

#[test]
fn load_requires_at_least_one_input() {
    let cli = Cli::try_parse_from(["satcat", "load"]).unwrap();
    let Commands::Load(args) = cli.command else {
        panic!("expected the load subcommand");
    };
    assert!(matches!(run_load(&args), Err(CliError::Config(_))));
}

#[test]
fn loads_a_local_archive_into_the_store() {
    let directory = tempfile::tempdir().unwrap();
    let archive = directory.path().join("visual.txt");
    std::fs::write(&archive, format!("ISS (ZARYA)\n{ISS_LINE1}\n{ISS_LINE2}\n")).unwrap();
    let database = directory.path().join("catalog.db");
    let cli = Cli::try_parse_from([
        "satcat",
        "load",
        "--database",
        database.to_str().unwrap(),
        "--source",
        archive.to_str().unwrap(),
    ])
    .unwrap();
    let Commands::Load(args) = cli.command else {
        panic!("expected the load subcommand");
    };
    run_load(&args).unwrap();
    // A second pass without --update leaves the catalog unchanged.
    run_load(&args).unwrap();
    let store =
        SqliteCatalogStore::open(&SqliteCatalogConfig::for_path(database)).unwrap();
    assert_eq!(store.count().unwrap(), 1);
}
