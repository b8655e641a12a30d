// crates/satcat-core/src/error.rs
// ============================================================================
// Module: Catalog Error Taxonomy
// Description: Discriminated error type shared by every catalog layer.
// Purpose: Replace exception-style control flow with explicit results.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! One taxonomy covers the whole pipeline: parse failures are per-record and
//! non-fatal during ingest, constraint violations carry the violated rule
//! names, uniqueness conflicts are kept distinct because they require store
//! state, input errors are rejected before touching storage, and `NotFound`
//! covers deletes of absent keys. Store-internal failures are wrapped as
//! messages only so raw engine errors never leak through the API surface.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog errors.
///
/// # Invariants
/// - `Constraint` carries the violated rule names and is never raised for a
///   partially applied write.
/// - `Uniqueness` is distinct from `Constraint`: it can only be established
///   by consulting existing store state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Malformed element set; skips only the offending record in a batch.
    #[error("malformed element set: {0}")]
    Parse(String),
    /// One or more plausibility constraints failed.
    #[error("constraint violation: [{}]", .0.join(", "))]
    Constraint(Vec<String>),
    /// Primary or unique key already present in the store.
    #[error("uniqueness conflict: {0}")]
    Uniqueness(String),
    /// Unknown column/operator or malformed query value.
    #[error("unacceptable input: {0}")]
    Input(String),
    /// Delete or lookup on an absent key.
    #[error("not found: {0}")]
    NotFound(String),
    /// Underlying storage failure.
    #[error("store error: {0}")]
    Store(String),
}
