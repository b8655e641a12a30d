// crates/satcat-core/src/orbit.rs
// ============================================================================
// Module: Orbital Derivation
// Description: Derives catalog metadata from mean motion and eccentricity.
// Purpose: Compute semimajor axis, apogee, perigee, and period, and build
//          fully populated candidate records from parsed element sets.
// Dependencies: none beyond satcat-core internals
// ============================================================================

//! ## Overview
//! The four derived values follow the space-track.org FAQ formulas: every
//! element set already carries mean motion `n` and eccentricity `e`, from
//! which period, semimajor axis, apogee, and perigee follow directly. This
//! is catalog metadata derivation only; no propagation happens here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::elements::ElementSet;
use crate::elements::TleFields;
use crate::error::CatalogError;
use crate::record::SatelliteRecord;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Earth equatorial radius in km.
pub const EARTH_RADIUS_KM: f64 = 6378.135;
/// Standard gravitational parameter for Earth, km^3/s^2.
pub const EARTH_MU: f64 = 398_600.441_8;
/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Minutes per day.
pub const MINUTES_PER_DAY: f64 = 1_440.0;

// ============================================================================
// SECTION: Derivation
// ============================================================================

/// Orbital parameters derived from mean motion and eccentricity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalProperties {
    /// Semimajor axis in km.
    pub semimajor_axis: f64,
    /// Apogee altitude in km above the surface.
    pub apogee: f64,
    /// Perigee altitude in km above the surface.
    pub perigee: f64,
    /// Orbital period in minutes.
    pub period: f64,
}

/// Derives the four catalog metadata values.
///
/// With mean angular rate `w = n * 2 * pi / 86400` (rad/s):
///
/// ```text
/// semimajor_axis = (mu / w^2)^(1/3)
/// apogee         = semimajor_axis * (1 + e) - 6378.135
/// perigee        = semimajor_axis * (1 - e) - 6378.135
/// period         = 1440 / n
/// ```
#[must_use]
pub fn orbital_properties(mean_motion: f64, eccentricity: f64) -> OrbitalProperties {
    let angular_rate = mean_motion * 2.0 * std::f64::consts::PI / SECONDS_PER_DAY;
    let semimajor_axis = (EARTH_MU / (angular_rate * angular_rate)).cbrt();
    OrbitalProperties {
        semimajor_axis,
        apogee: semimajor_axis * (1.0 + eccentricity) - EARTH_RADIUS_KM,
        perigee: semimajor_axis * (1.0 - eccentricity) - EARTH_RADIUS_KM,
        period: MINUTES_PER_DAY / mean_motion,
    }
}

/// Builds a fully populated, unpersisted candidate record from a parsed
/// element set.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] when the element lines fail fixed-width
/// decoding or their checksums.
pub fn build_record(set: &ElementSet, classified: bool) -> Result<SatelliteRecord, CatalogError> {
    let fields = TleFields::parse(&set.line1, &set.line2)?;
    let derived = orbital_properties(fields.mean_motion, fields.eccentricity);
    Ok(SatelliteRecord {
        norad_catalog: fields.norad_catalog,
        classified: i64::from(classified),
        inclination: fields.inclination,
        period: derived.period,
        apogee: derived.apogee,
        perigee: derived.perigee,
        mean_motion: fields.mean_motion,
        eccentricity: fields.eccentricity,
        semimajor_axis: derived.semimajor_axis,
        epoch: fields.epoch,
        intldes: fields.intldes,
        name: set.name.clone(),
        line1: set.line1.clone(),
        line2: set.line2.clone(),
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
