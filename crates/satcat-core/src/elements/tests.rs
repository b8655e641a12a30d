// crates/satcat-core/src/elements/tests.rs
// ============================================================================
// Module: Element Parser Tests
// Description: Unit tests for the element-set scanner and field decoder.
// Purpose: Validate the three-line pattern, name dedup, checksums, and the
//          TLE epoch conversion.
// Dependencies: satcat-core
// ============================================================================

//! ## Overview
//! Covers the scanner's three-line pattern recognition, the name-keyed
//! last-occurrence-wins dedup policy, the fixed-width field decoder against
//! the ISS example set, and the rejection paths for malformed lines.

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

use super::ElementSet;
use super::TLE_LINE_LENGTH;
use super::TleFields;
use super::parse_elements;
use crate::error::CatalogError;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// NASA-published ISS element set used across the test suite.
const ISS_NAME: &str = "ISS";
/// ISS line 1.
const ISS_LINE1: &str = "1 25544U 98067A   19128.56248153  .00016717  00000-0  10270-3 0  9002";
/// ISS line 2.
const ISS_LINE2: &str = "2 25544  51.6390 198.1271 0001239 315.7000  44.4052 15.52641749  9097";

/// Replaces the final column of a 69-character line with its modulo-10
/// checksum.
fn with_checksum(line: &str) -> String {
    assert_eq!(line.len(), TLE_LINE_LENGTH);
    let mut sum: u32 = 0;
    for character in line.chars().take(TLE_LINE_LENGTH - 1) {
        if let Some(digit) = character.to_digit(10) {
            sum += digit;
        } else if character == '-' {
            sum += 1;
        }
    }
    let mut fixed = line[..TLE_LINE_LENGTH - 1].to_string();
    fixed.push(char::from_digit(sum % 10, 10).unwrap());
    fixed
}

// ============================================================================
// SECTION: Scanner Tests
// ============================================================================

#[test]
fn scans_named_and_unnamed_sets() {
    let blob = format!("{ISS_NAME}\n{ISS_LINE1}\n{ISS_LINE2}\n{ISS_LINE1}\n{ISS_LINE2}\n");
    let sets = parse_elements(&blob);
    // The second set has no name line available: its predecessor was already
    // consumed as the first set's line 2.
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].name, "ISS");
    assert_eq!(sets[1].name, "");
    assert_eq!(sets[1].line1, ISS_LINE1);
}

#[test]
fn dedup_by_name_keeps_last_occurrence() {
    let stale_line1 = with_checksum(
        "1 25544U 98067A   19100.50000000  .00016717  00000-0  10270-3 0  9000",
    );
    let blob =
        format!("{ISS_NAME}\n{stale_line1}\n{ISS_LINE2}\n{ISS_NAME}\n{ISS_LINE1}\n{ISS_LINE2}\n");
    let sets = parse_elements(&blob);
    assert_eq!(sets.len(), 1);
    assert_eq!(
        sets[0],
        ElementSet {
            name: "ISS".to_string(),
            line1: ISS_LINE1.to_string(),
            line2: ISS_LINE2.to_string(),
        }
    );
}

#[test]
fn empty_blob_yields_no_sets() {
    assert!(parse_elements("").is_empty());
    assert!(parse_elements("just some text\nwith no elements\n").is_empty());
}

#[test]
fn fields_are_trimmed() {
    let blob = format!("  {ISS_NAME}  \n{ISS_LINE1}  \n{ISS_LINE2}  \n");
    let sets = parse_elements(&blob);
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].name, "ISS");
    assert_eq!(sets[0].line1, ISS_LINE1);
    assert_eq!(sets[0].line2, ISS_LINE2);
}

// ============================================================================
// SECTION: Decoder Tests
// ============================================================================

#[test]
fn decodes_iss_fields() {
    let fields = TleFields::parse(ISS_LINE1, ISS_LINE2).unwrap();
    assert_eq!(fields.norad_catalog, 25544);
    assert_eq!(fields.intldes, "98067A");
    assert!((fields.inclination - 51.639).abs() < 1e-9);
    assert!((fields.eccentricity - 0.000_123_9).abs() < 1e-12);
    assert!((fields.mean_motion - 15.526_417_49).abs() < 1e-9);
    assert!(fields.epoch.starts_with("2019-05-08T13:29:58"));
}

#[test]
fn rejects_checksum_mismatch() {
    let mut corrupt = ISS_LINE1.to_string();
    corrupt.replace_range(68..69, "3");
    let result = TleFields::parse(&corrupt, ISS_LINE2);
    assert!(matches!(result, Err(CatalogError::Parse(_))));
}

#[test]
fn rejects_short_lines() {
    let result = TleFields::parse("1 25544U", ISS_LINE2);
    assert!(matches!(result, Err(CatalogError::Parse(_))));
}

#[test]
fn epoch_year_pivot_maps_old_years_to_1900s() {
    let mut line1 = ISS_LINE1.to_string();
    line1.replace_range(18..32, "99001.00000000");
    let fields = TleFields::parse(&with_checksum(&line1), ISS_LINE2).unwrap();
    assert!(fields.epoch.starts_with("1999-01-01T00:00:00"));
}
