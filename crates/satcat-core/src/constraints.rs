// crates/satcat-core/src/constraints.rs
// ============================================================================
// Module: Constraint Table
// Description: Single source of truth for schema checks and diagnostics.
// Purpose: Drive both the store's declared CHECK constraints and the
//          diagnostic validator from one table so they cannot drift.
// Dependencies: none beyond satcat-core internals
// ============================================================================

//! ## Overview
//! Each catalog column is declared once, with its SQL column declaration and
//! an optional in-memory predicate mirroring the declared CHECK. The store's
//! schema generator renders the declarations; [`violated_constraints`] runs
//! the predicates independently (never short-circuited) to explain a
//! rejected insert.
//!
//! The apogee/perigee pair is the one deliberate asymmetry: the schema
//! enforces the joint floor (`apogee>=100 or perigee>=100`, tolerating
//! decaying and highly elliptical orbits), while the diagnostic predicate
//! reports each altitude individually so the explanation names the low side.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::record::SatelliteRecord;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum physically stable orbital period, in minutes, for a circular
/// orbit at Earth's surface.
pub const MINIMUM_PERIOD_MINUTES: f64 = 84.47;

/// Minimum orbit altitude floor in km; roughly where atmospheric drag makes
/// a circular orbit decay rapidly.
pub const MINIMUM_ORBIT_KM: f64 = 100.0;

/// Token reported when no declared check is violated: the only remaining
/// possible rejection cause is a uniqueness conflict, which cannot be
/// evaluated without consulting the store.
pub const UNIQUE_TOKEN: &str = "UNIQUE";

// ============================================================================
// SECTION: Column Table
// ============================================================================

/// One catalog column: its SQL declaration and diagnostic predicate.
pub struct ColumnDef {
    /// Column name, also the constraint name reported by diagnostics.
    pub name: &'static str,
    /// SQL declaration rendered after the column name.
    pub decl: &'static str,
    /// In-memory mirror of the declared CHECK; `None` for columns whose only
    /// declared constraint is NOT NULL or a default.
    pub check: Option<fn(&SatelliteRecord) -> bool>,
}

/// Every catalog column in declaration order.
pub const TABLE_COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        name: "norad_catalog",
        decl: "INTEGER NOT NULL CHECK(norad_catalog>0) UNIQUE",
        check: Some(|record| record.norad_catalog > 0),
    },
    ColumnDef {
        name: "classified",
        decl: "INTEGER NOT NULL DEFAULT 0 CHECK(classified==0 or classified==1)",
        check: Some(|record| record.classified == 0 || record.classified == 1),
    },
    ColumnDef {
        name: "inclination",
        decl: "REAL NOT NULL CHECK(inclination>=-180 and inclination<=180)",
        check: Some(|record| (-180.0..=180.0).contains(&record.inclination)),
    },
    ColumnDef {
        name: "period",
        decl: "REAL NOT NULL CHECK(period>=84.47)",
        check: Some(|record| record.period >= MINIMUM_PERIOD_MINUTES),
    },
    ColumnDef {
        name: "apogee",
        decl: "REAL NOT NULL CHECK(apogee>=100 or perigee>=100)",
        check: Some(|record| record.apogee >= MINIMUM_ORBIT_KM),
    },
    ColumnDef {
        name: "perigee",
        decl: "REAL NOT NULL CHECK(apogee>=100 or perigee>=100)",
        check: Some(|record| record.perigee >= MINIMUM_ORBIT_KM),
    },
    ColumnDef {
        name: "mean_motion",
        decl: "REAL NOT NULL CHECK(mean_motion>0)",
        check: Some(|record| record.mean_motion > 0.0),
    },
    ColumnDef {
        name: "eccentricity",
        decl: "REAL NOT NULL CHECK(eccentricity>=0)",
        check: Some(|record| record.eccentricity >= 0.0),
    },
    ColumnDef {
        name: "semimajor_axis",
        decl: "REAL NOT NULL CHECK(semimajor_axis>=0)",
        check: Some(|record| record.semimajor_axis >= 0.0),
    },
    ColumnDef {
        name: "epoch",
        decl: "TIMESTAMP NOT NULL",
        check: None,
    },
    ColumnDef {
        name: "intldes",
        decl: "VARCHAR(8) NOT NULL CHECK(length(intldes)>=6 and length(intldes)<=8) UNIQUE",
        check: Some(|record| (6..=8).contains(&record.intldes.len())),
    },
    ColumnDef {
        name: "name",
        decl: "VARCHAR(80) NOT NULL DEFAULT ''",
        check: None,
    },
    ColumnDef {
        name: "line1",
        decl: "TEXT NOT NULL CHECK(length(line1)==69)",
        check: Some(|record| record.line1.len() == crate::elements::TLE_LINE_LENGTH),
    },
    ColumnDef {
        name: "line2",
        decl: "TEXT NOT NULL CHECK(length(line2)==69)",
        check: Some(|record| record.line2.len() == crate::elements::TLE_LINE_LENGTH),
    },
];

// ============================================================================
// SECTION: Diagnostic Validator
// ============================================================================

/// Returns the names of every declared constraint a candidate record
/// violates, evaluated independently.
///
/// When nothing is violated the result is `[UNIQUE_TOKEN]`: the record is
/// plausible, so a store rejection can only have been a uniqueness conflict.
/// This function is diagnostic only and never gates inserts; the store's
/// declared constraints do.
#[must_use]
pub fn violated_constraints(record: &SatelliteRecord) -> Vec<&'static str> {
    let mut violated: Vec<&'static str> = Vec::new();
    for column in TABLE_COLUMNS {
        if let Some(check) = column.check
            && !check(record)
        {
            violated.push(column.name);
        }
    }
    if violated.is_empty() {
        violated.push(UNIQUE_TOKEN);
    }
    violated
}

// ============================================================================
// SECTION: Tests
// ============================================================================
