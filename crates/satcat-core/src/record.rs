// crates/satcat-core/src/record.rs
// ============================================================================
// Module: Satellite Record Model
// Description: Row model and the column allow-list for the catalog.
// Purpose: Define the record type, searchable columns, and delete keys.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`SatelliteRecord`] is one row per tracked object. Records are immutable
//! once derived: the only mutation the store supports is a whole-row replace
//! (upsert) or a physical delete keyed by `norad_catalog` or `intldes`.
//! [`SearchColumn`] is the fixed, alphabetically ordered allow-list exposed
//! to the filter engine and the range reporter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Record
// ============================================================================

/// One catalog row per tracked object.
///
/// # Invariants
/// - `norad_catalog` and `intldes` are each globally unique.
/// - `line1`/`line2` retain the canonical 69-character TLE width.
/// - `apogee`/`perigee` jointly satisfy the 100 km minimum-orbit floor;
///   either may individually be low as long as the other clears it, which
///   tolerates decaying and highly elliptical orbits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteRecord {
    /// NORAD catalog number; positive, primary key.
    pub norad_catalog: i64,
    /// Restricted-origin flag; 0 or 1.
    pub classified: i64,
    /// Orbital inclination in degrees, within [-180, 180].
    pub inclination: f64,
    /// Orbital period in minutes; at least 84.47.
    pub period: f64,
    /// Apogee altitude in km above the surface.
    pub apogee: f64,
    /// Perigee altitude in km above the surface.
    pub perigee: f64,
    /// Mean motion in revolutions per day; positive.
    pub mean_motion: f64,
    /// Orbit eccentricity; non-negative, 0 = circular.
    pub eccentricity: f64,
    /// Semimajor axis in km; non-negative.
    pub semimajor_axis: f64,
    /// Element-set epoch as an RFC 3339 UTC timestamp.
    pub epoch: String,
    /// International designator; 6 to 8 characters, unique.
    pub intldes: String,
    /// Free-text object name; at most 80 characters, default empty.
    pub name: String,
    /// First element line, exactly 69 characters.
    pub line1: String,
    /// Second element line, exactly 69 characters.
    pub line2: String,
}

// ============================================================================
// SECTION: Columns
// ============================================================================

/// Storage kind of a searchable column.
///
/// # Invariants
/// - Query values are parsed against the column's kind before any SQL is
///   built; a value that does not parse is rejected as unacceptable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Integer-affinity column.
    Integer,
    /// Real-affinity column.
    Real,
    /// Text-affinity column.
    Text,
}

/// A member of the fixed search-column allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchColumn {
    /// Apogee altitude (km).
    Apogee,
    /// Classified flag.
    Classified,
    /// Orbit eccentricity.
    Eccentricity,
    /// Element-set epoch.
    Epoch,
    /// Orbital inclination (degrees).
    Inclination,
    /// International designator.
    Intldes,
    /// Mean motion (rev/day).
    MeanMotion,
    /// Object name.
    Name,
    /// NORAD catalog number.
    NoradCatalog,
    /// Perigee altitude (km).
    Perigee,
    /// Orbital period (minutes).
    Period,
    /// Semimajor axis (km).
    SemimajorAxis,
}

/// Every searchable column, in alphabetical order.
pub const SEARCH_COLUMNS: &[SearchColumn] = &[
    SearchColumn::Apogee,
    SearchColumn::Classified,
    SearchColumn::Eccentricity,
    SearchColumn::Epoch,
    SearchColumn::Inclination,
    SearchColumn::Intldes,
    SearchColumn::MeanMotion,
    SearchColumn::Name,
    SearchColumn::NoradCatalog,
    SearchColumn::Perigee,
    SearchColumn::Period,
    SearchColumn::SemimajorAxis,
];

impl SearchColumn {
    /// Returns the column's SQL identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apogee => "apogee",
            Self::Classified => "classified",
            Self::Eccentricity => "eccentricity",
            Self::Epoch => "epoch",
            Self::Inclination => "inclination",
            Self::Intldes => "intldes",
            Self::MeanMotion => "mean_motion",
            Self::Name => "name",
            Self::NoradCatalog => "norad_catalog",
            Self::Perigee => "perigee",
            Self::Period => "period",
            Self::SemimajorAxis => "semimajor_axis",
        }
    }

    /// Returns the column's storage kind.
    #[must_use]
    pub const fn kind(self) -> ColumnKind {
        match self {
            Self::Classified | Self::NoradCatalog => ColumnKind::Integer,
            Self::Epoch | Self::Intldes | Self::Name => ColumnKind::Text,
            Self::Apogee
            | Self::Eccentricity
            | Self::Inclination
            | Self::MeanMotion
            | Self::Perigee
            | Self::Period
            | Self::SemimajorAxis => ColumnKind::Real,
        }
    }

    /// Looks up a column by its lowercased SQL identifier.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        SEARCH_COLUMNS.iter().copied().find(|column| column.as_str() == token)
    }
}

// ============================================================================
// SECTION: Delete Keys
// ============================================================================

/// Key column accepted by the store's delete operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteKey {
    /// Delete by NORAD catalog number.
    NoradCatalog,
    /// Delete by international designator.
    Intldes,
}

impl DeleteKey {
    /// Returns the key column's SQL identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoradCatalog => "norad_catalog",
            Self::Intldes => "intldes",
        }
    }

    /// Looks up a key column by its lowercased SQL identifier.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "norad_catalog" => Some(Self::NoradCatalog),
            "intldes" => Some(Self::Intldes),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::SEARCH_COLUMNS;
    use super::SearchColumn;

    #[test]
    fn allow_list_is_alphabetical() {
        let labels: Vec<&str> = SEARCH_COLUMNS.iter().map(|column| column.as_str()).collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(labels, sorted);
        assert_eq!(labels.len(), 12);
    }

    #[test]
    fn parse_rejects_unknown_columns() {
        assert_eq!(SearchColumn::parse("apogee"), Some(SearchColumn::Apogee));
        assert_eq!(SearchColumn::parse("drop table"), None);
        assert_eq!(SearchColumn::parse("APOGEE"), None);
    }
}
