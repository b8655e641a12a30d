// crates/satcat-core/src/lib.rs
// ============================================================================
// Module: Satcat Core
// Description: Domain model for the satellite orbital-element catalog.
// Purpose: Parse element sets, derive orbital parameters, define the
//          constraint model and the search-query vocabulary.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! Core types for the satcat catalog: the [`SatelliteRecord`] row model, the
//! element-set parser, orbital-parameter derivation, the constraint table
//! shared by the storage schema and the diagnostic validator, and the typed
//! search-filter vocabulary compiled by the store. This crate performs no
//! I/O; catalog inputs are untrusted text and every parse path returns an
//! explicit error.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod constraints;
pub mod elements;
pub mod error;
pub mod orbit;
pub mod query;
pub mod record;

pub use constraints::ColumnDef;
pub use constraints::MINIMUM_ORBIT_KM;
pub use constraints::MINIMUM_PERIOD_MINUTES;
pub use constraints::TABLE_COLUMNS;
pub use constraints::UNIQUE_TOKEN;
pub use constraints::violated_constraints;
pub use elements::ElementSet;
pub use elements::TLE_LINE_LENGTH;
pub use elements::TleFields;
pub use elements::parse_elements;
pub use error::CatalogError;
pub use orbit::OrbitalProperties;
pub use orbit::build_record;
pub use orbit::orbital_properties;
pub use query::CompareOp;
pub use query::FilterExpr;
pub use query::SearchFilter;
pub use query::SearchValue;
pub use record::ColumnKind;
pub use record::DeleteKey;
pub use record::SatelliteRecord;
pub use record::SEARCH_COLUMNS;
pub use record::SearchColumn;
