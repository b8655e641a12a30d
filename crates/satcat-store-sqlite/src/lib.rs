// crates/satcat-store-sqlite/src/lib.rs
// ============================================================================
// Module: Satcat SQLite Store
// Description: Durable catalog store backed by SQLite.
// Purpose: Export the store, its configuration, and batch-ingest types.
// Dependencies: rusqlite, satcat-core, serde, tracing
// ============================================================================

//! ## Overview
//! Constraint-enforcing persistence for [`satcat_core::SatelliteRecord`]
//! rows. The schema's CHECK constraints are generated from the core
//! constraint table, so the store and the diagnostic validator can never
//! drift apart. See [`store::SqliteCatalogStore`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

pub use store::ColumnRange;
pub use store::IngestFailure;
pub use store::IngestSummary;
pub use store::SqliteCatalogConfig;
pub use store::SqliteCatalogStore;
pub use store::SqliteJournalMode;
pub use store::SqliteSyncMode;
pub use store::schema_sql;
