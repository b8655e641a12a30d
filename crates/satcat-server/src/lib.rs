// crates/satcat-server/src/lib.rs
// ============================================================================
// Module: Satcat Server
// Description: HTTP query and ingestion surface for the satellite catalog.
// Purpose: Export the server entry point, its configuration, and the
//          static route registry.
// Dependencies: satcat-core, satcat-store-sqlite, axum, tokio
// ============================================================================

//! ## Overview
//! An axum front end over [`satcat_store_sqlite::SqliteCatalogStore`].
//! Catalog inputs are untrusted: bodies are parsed from raw bytes, filter
//! tokens are validated against a fixed allow-list before any SQL is built,
//! and every rejection carries a distinct status. See [`server::run`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use routes::ROUTE_TABLE;
pub use routes::RouteEntry;
pub use routes::route_listing;
pub use server::ServerContext;
pub use server::ServerError;
pub use server::build_router;
pub use server::run;
