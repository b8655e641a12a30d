// crates/satcat-cli/src/main.rs
// ============================================================================
// Module: Satcat CLI Entry Point
// Description: Command dispatcher for catalog loading and serving.
// Purpose: Load archive files into the catalog and run the HTTP server.
// Dependencies: clap, satcat-server, satcat-store-sqlite, tokio, tracing
// ============================================================================

//! ## Overview
//! Two subcommands: `load` fetches archive files (idempotently, unless a
//! refetch is forced) and ingests each local text blob as one batch with a
//! single commit; `serve` runs the HTTP surface. All diagnostics go through
//! `tracing`; `--quiet` raises the default level to warnings.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod fetch;
#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use satcat_server::ServerConfig;
use satcat_store_sqlite::SqliteCatalogConfig;
use satcat_store_sqlite::SqliteCatalogStore;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default catalog database file.
const DEFAULT_DATABASE: &str = "satcat.db";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid configuration or arguments.
    #[error("configuration error: {0}")]
    Config(String),
    /// Archive download failed.
    #[error("fetch error: {0}")]
    Fetch(String),
    /// Local file I/O failed.
    #[error("io error: {0}")]
    Io(String),
    /// The catalog store rejected an operation.
    #[error("catalog error: {0}")]
    Catalog(String),
    /// The HTTP server failed.
    #[error("server error: {0}")]
    Server(String),
}

// ============================================================================
// SECTION: Arguments
// ============================================================================

/// Satellite catalog loader and server.
#[derive(Debug, Parser)]
#[command(name = "satcat", disable_help_subcommand = true)]
struct Cli {
    /// Only log warnings and errors.
    #[arg(long, global = true)]
    quiet: bool,
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch archive files and ingest them into the catalog.
    Load(LoadArgs),
    /// Run the catalog HTTP server.
    Serve(ServeArgs),
}

/// Arguments for the `load` subcommand.
#[derive(Debug, Args)]
struct LoadArgs {
    /// Catalog database file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DATABASE)]
    database: PathBuf,
    /// Drop and recreate the catalog table before loading.
    #[arg(long)]
    initdb: bool,
    /// Re-download archives even when a local copy exists.
    #[arg(long)]
    refetch: bool,
    /// Replace existing records instead of rejecting duplicates.
    #[arg(long)]
    update: bool,
    /// Mark every loaded record as classified.
    #[arg(long)]
    classified: bool,
    /// Local archive file to ingest; repeatable.
    #[arg(long, value_name = "FILE")]
    source: Vec<PathBuf>,
    /// Archive URL to fetch and ingest; repeatable.
    #[arg(long, value_name = "URL")]
    url: Vec<String>,
}

/// Arguments for the `serve` subcommand.
#[derive(Debug, Args)]
struct ServeArgs {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Catalog database file; overrides the configuration file.
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,
    /// Listen address; overrides the configuration file.
    #[arg(long, value_name = "ADDR")]
    listen: Option<String>,
    /// Listen port; overrides the configuration file.
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,
    /// Enable mutating routes.
    #[arg(long)]
    writable: bool,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "command failed");
            ExitCode::FAILURE
        }
    }
}

/// Installs the global tracing subscriber.
fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Dispatches the parsed command line.
fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Load(args) => run_load(&args),
        Commands::Serve(args) => run_serve(&args),
    }
}

// ============================================================================
// SECTION: Load
// ============================================================================

/// Fetches and ingests every requested archive, one batch per file.
fn run_load(args: &LoadArgs) -> Result<(), CliError> {
    if args.source.is_empty() && args.url.is_empty() {
        return Err(CliError::Config("nothing to load: pass --source or --url".to_string()));
    }
    let mut config = SqliteCatalogConfig::for_path(args.database.clone());
    config.reinitialize = args.initdb;
    let store =
        SqliteCatalogStore::open(&config).map_err(|err| CliError::Catalog(err.to_string()))?;
    let mut paths = args.source.clone();
    let working_directory = std::env::current_dir()
        .map_err(|err| CliError::Io(format!("cannot resolve working directory: {err}")))?;
    for url in &args.url {
        paths.push(fetch::fetch_to_file(url, &working_directory, args.refetch)?);
    }
    for path in &paths {
        let blob = std::fs::read_to_string(path)
            .map_err(|err| CliError::Io(format!("cannot read {}: {err}", path.display())))?;
        let summary = store
            .ingest(&blob, args.classified, args.update)
            .map_err(|err| CliError::Catalog(err.to_string()))?;
        tracing::info!(
            file = %path.display(),
            parsed = summary.parsed,
            loaded = summary.loaded,
            failed = summary.failures.len(),
            "archive loaded"
        );
    }
    Ok(())
}

// ============================================================================
// SECTION: Serve
// ============================================================================

/// Resolves the effective server configuration from file and flag overrides.
fn serve_config(args: &ServeArgs) -> Result<ServerConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            ServerConfig::load(path).map_err(|err| CliError::Config(err.to_string()))?
        }
        None => ServerConfig::for_store(SqliteCatalogConfig::for_path(PathBuf::from(
            DEFAULT_DATABASE,
        ))),
    };
    if let Some(database) = &args.database {
        config.store.path.clone_from(database);
    }
    if let Some(listen) = &args.listen {
        config.listen.clone_from(listen);
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.writable {
        config.writable = true;
    }
    Ok(config)
}

/// Runs the HTTP server until shutdown.
fn run_serve(args: &ServeArgs) -> Result<(), CliError> {
    let config = serve_config(args)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| CliError::Server(format!("cannot start runtime: {err}")))?;
    runtime
        .block_on(satcat_server::run(config))
        .map_err(|err| CliError::Server(err.to_string()))
}
