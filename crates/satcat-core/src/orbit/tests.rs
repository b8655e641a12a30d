// crates/satcat-core/src/orbit/tests.rs
// ============================================================================
// Module: Orbital Derivation Tests
// Description: Unit and property tests for the derivation formulas.
// Purpose: Pin the period identity, the apogee/perigee ordering, and the
//          ISS worked example.
// Dependencies: satcat-core, proptest
// ============================================================================

//! ## Overview
//! Checks the exact derivation formulas against the ISS worked example and
//! property-tests the identities that hold for every physical input:
//! `period == 1440 / n` and `apogee >= perigee` whenever `e >= 0`.

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

use proptest::proptest;

use super::build_record;
use super::orbital_properties;
use crate::elements::ElementSet;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Builds the ISS example element set.
fn iss_set() -> ElementSet {
    ElementSet {
        name: "ISS".to_string(),
        line1: "1 25544U 98067A   19128.56248153  .00016717  00000-0  10270-3 0  9002"
            .to_string(),
        line2: "2 25544  51.6390 198.1271 0001239 315.7000  44.4052 15.52641749  9097"
            .to_string(),
    }
}

// ============================================================================
// SECTION: Worked Example
// ============================================================================

#[test]
fn iss_example_derives_expected_metadata() {
    let record = build_record(&iss_set(), false).unwrap();
    assert_eq!(record.norad_catalog, 25544);
    assert_eq!(record.intldes, "98067A");
    assert_eq!(record.classified, 0);
    assert!((record.mean_motion - 15.526_417_49).abs() < 1e-9);
    assert!((record.period - 92.746).abs() < 0.05);
    assert!(record.apogee >= 100.0);
    assert!(record.perigee >= 100.0);
    assert!(record.apogee >= record.perigee);
    assert_eq!(record.name, "ISS");
    assert_eq!(record.line1.len(), 69);
    assert_eq!(record.line2.len(), 69);
}

#[test]
fn classified_flag_is_recorded() {
    let record = build_record(&iss_set(), true).unwrap();
    assert_eq!(record.classified, 1);
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn period_is_minutes_per_day_over_mean_motion(n in 0.1_f64..20.0) {
        let derived = orbital_properties(n, 0.0);
        assert!((derived.period - 1_440.0 / n).abs() < 1e-9);
    }

    #[test]
    fn apogee_never_below_perigee(n in 0.1_f64..20.0, e in 0.0_f64..0.99) {
        let derived = orbital_properties(n, e);
        assert!(derived.apogee >= derived.perigee);
        // Both altitudes share the same semimajor axis term.
        let mid = f64::midpoint(derived.apogee, derived.perigee);
        assert!((mid - (derived.semimajor_axis - super::EARTH_RADIUS_KM)).abs() < 1e-6);
    }
}
