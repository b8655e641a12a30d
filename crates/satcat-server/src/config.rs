// crates/satcat-server/src/config.rs
// ============================================================================
// Module: Server Configuration
// Description: TOML-backed configuration for the catalog server.
// Purpose: Define bind address, writable mode, and the store section.
// Dependencies: satcat-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! Configuration loads from a TOML file with serde defaults; command-line
//! flags override individual fields after loading. The `[store]` section is
//! the store crate's own configuration type, so there is no duplicate
//! schema for database settings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;

use satcat_store_sqlite::SqliteCatalogConfig;
use serde::Deserialize;

use crate::server::ServerError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default listen address.
const DEFAULT_LISTEN: &str = "127.0.0.1";

/// Default listen port.
const DEFAULT_PORT: u16 = 4853;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Catalog server configuration.
///
/// # Invariants
/// - `listen` and `port` must combine into a parseable socket address.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Whether mutating routes are enabled.
    #[serde(default)]
    pub writable: bool,
    /// Catalog store settings.
    pub store: SqliteCatalogConfig,
}

impl ServerConfig {
    /// Builds a config with defaults around the given store settings.
    #[must_use]
    pub fn for_store(store: SqliteCatalogConfig) -> Self {
        Self {
            listen: default_listen(),
            port: DEFAULT_PORT,
            writable: false,
            store,
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] when the file cannot be read or does
    /// not parse.
    pub fn load(path: &Path) -> Result<Self, ServerError> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| ServerError::Config(format!("cannot read {}: {err}", path.display())))?;
        toml::from_str(&text)
            .map_err(|err| ServerError::Config(format!("cannot parse {}: {err}", path.display())))
    }

    /// Returns the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] when the listen address is invalid.
    pub fn bind_addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.listen, self.port)
            .parse()
            .map_err(|_| ServerError::Config(format!("invalid listen address: {}", self.listen)))
    }
}

/// Returns the default listen address.
fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

/// Returns the default listen port.
const fn default_port() -> u16 {
    DEFAULT_PORT
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        reason = "Test-only assertions use unwrap/expect for clarity."
    )]

    use std::io::Write;

    use super::ServerConfig;

    #[test]
    fn minimal_toml_fills_defaults() {
        let config: ServerConfig = toml::from_str("[store]\npath = \"catalog.db\"\n").unwrap();
        assert_eq!(config.listen, "127.0.0.1");
        assert_eq!(config.port, 4853);
        assert!(!config.writable);
        assert_eq!(config.store.busy_timeout_ms, 5_000);
        assert_eq!(config.bind_addr().unwrap().port(), 4853);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let text = "listen = \"0.0.0.0\"\nport = 8080\nwritable = true\n\
                    [store]\npath = \"catalog.db\"\nbusy_timeout_ms = 250\n";
        let config: ServerConfig = toml::from_str(text).unwrap();
        assert_eq!(config.listen, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.writable);
        assert_eq!(config.store.busy_timeout_ms, 250);
    }

    #[test]
    fn load_reports_unreadable_files() {
        let missing = ServerConfig::load(std::path::Path::new("/nonexistent/satcat.toml"));
        assert!(missing.is_err());
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("satcat.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "not toml at all [").unwrap();
        assert!(ServerConfig::load(&path).is_err());
    }

    #[test]
    fn bad_listen_address_is_a_config_error() {
        let mut config: ServerConfig =
            toml::from_str("[store]\npath = \"catalog.db\"\n").unwrap();
        config.listen = "not an address".to_string();
        assert!(config.bind_addr().is_err());
    }
}
