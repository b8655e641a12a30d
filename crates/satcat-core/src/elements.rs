// crates/satcat-core/src/elements.rs
// ============================================================================
// Module: Element Set Parser
// Description: Extracts (name, line1, line2) triples from raw archive text.
// Purpose: Recognize the three-line element pattern and decode the
//          fixed-width fields needed for record derivation.
// Dependencies: time
// ============================================================================

//! ## Overview
//! A decompressed archive blob contains zero or more element sets, each
//! optionally preceded by a free-text name line and followed by two
//! fixed-prefix lines beginning `1 ` and `2 `. The scanner yields trimmed
//! triples; sets with no name line yield an empty name.
//!
//! Within one blob, sets are deduplicated **by name**, last occurrence
//! winning. Two distinct objects sharing a name string therefore collide and
//! only the last-parsed one survives this stage. That mirrors the upstream
//! feed behavior (duplicate-sighting suppression); deduplicating by the
//! catalog number carried in the lines would be the safer key.
//!
//! Field extraction follows the canonical TLE layout: every line is 69 ASCII
//! characters and carries a modulo-10 checksum in its final column. Any
//! malformed field or checksum mismatch is a [`CatalogError::Parse`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use time::Date;
use time::Duration;
use time::format_description::well_known::Rfc3339;

use crate::error::CatalogError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Canonical width of a TLE line, checksum column included.
pub const TLE_LINE_LENGTH: usize = 69;

/// Two-digit TLE years at or above this value belong to the 1900s.
const TLE_YEAR_PIVOT: i32 = 57;

// ============================================================================
// SECTION: Element Sets
// ============================================================================

/// One parsed element set: optional name plus the two element lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSet {
    /// Free-text object name; empty when the set had no name line.
    pub name: String,
    /// First element line, trimmed.
    pub line1: String,
    /// Second element line, trimmed.
    pub line2: String,
}

/// Extracts element sets from a raw multi-record text blob.
///
/// Recognizes the newline-delimited three-line pattern and trims all three
/// fields. Sets are deduplicated by name with the last occurrence winning;
/// the first occurrence's position in the blob is kept so output order stays
/// stable.
#[must_use]
pub fn parse_elements(blob: &str) -> Vec<ElementSet> {
    let lines: Vec<&str> = blob.lines().collect();
    let mut sets: Vec<ElementSet> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();
    // Index one past the last line consumed by an emitted set; a line already
    // consumed as line2 can never double as the next set's name line.
    let mut consumed = 0usize;
    let mut index = 0usize;
    while index < lines.len() {
        if lines[index].starts_with("1 ")
            && index + 1 < lines.len()
            && lines[index + 1].starts_with("2 ")
        {
            let name = if index > consumed { lines[index - 1].trim() } else { "" };
            let set = ElementSet {
                name: name.to_string(),
                line1: lines[index].trim().to_string(),
                line2: lines[index + 1].trim().to_string(),
            };
            if let Some(position) = by_name.get(&set.name) {
                sets[*position] = set;
            } else {
                by_name.insert(set.name.clone(), sets.len());
                sets.push(set);
            }
            index += 2;
            consumed = index;
        } else {
            index += 1;
        }
    }
    sets
}

// ============================================================================
// SECTION: Field Extraction
// ============================================================================

/// Fields decoded from a trimmed element-line pair.
#[derive(Debug, Clone, PartialEq)]
pub struct TleFields {
    /// NORAD catalog number (line 1, columns 3-7).
    pub norad_catalog: i64,
    /// International designator (line 1, columns 10-17, trimmed).
    pub intldes: String,
    /// Element-set epoch as an RFC 3339 UTC timestamp.
    pub epoch: String,
    /// Inclination in degrees (line 2, columns 9-16).
    pub inclination: f64,
    /// Eccentricity with its implied leading decimal point (line 2,
    /// columns 27-33).
    pub eccentricity: f64,
    /// Mean motion in revolutions per day (line 2, columns 53-63).
    pub mean_motion: f64,
}

impl TleFields {
    /// Decodes the fixed-width fields from a trimmed element-line pair.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] when either line has the wrong width
    /// or prefix, fails its modulo-10 checksum, or carries a field that does
    /// not decode.
    pub fn parse(line1: &str, line2: &str) -> Result<Self, CatalogError> {
        check_line(line1, "1 ")?;
        check_line(line2, "2 ")?;
        let norad_catalog = field(line1, 2, 7)?
            .trim()
            .parse::<i64>()
            .map_err(|_| malformed("catalog number", line1))?;
        let intldes = field(line1, 9, 17)?.trim().to_string();
        let epoch = epoch_to_rfc3339(field(line1, 18, 32)?.trim())?;
        let inclination = field(line2, 8, 16)?
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed("inclination", line2))?;
        let eccentricity = format!("0.{}", field(line2, 26, 33)?.trim())
            .parse::<f64>()
            .map_err(|_| malformed("eccentricity", line2))?;
        let mean_motion = field(line2, 52, 63)?
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed("mean motion", line2))?;
        Ok(Self {
            norad_catalog,
            intldes,
            epoch,
            inclination,
            eccentricity,
            mean_motion,
        })
    }
}

/// Builds a parse error naming the field that failed to decode.
fn malformed(what: &str, line: &str) -> CatalogError {
    CatalogError::Parse(format!("bad {what} in element line: {line}"))
}

/// Returns the byte range `[start, end)` of a verified-ASCII element line.
fn field<'a>(line: &'a str, start: usize, end: usize) -> Result<&'a str, CatalogError> {
    line.get(start..end)
        .ok_or_else(|| CatalogError::Parse(format!("element line truncated: {line}")))
}

/// Verifies width, prefix, character set, and checksum of one element line.
fn check_line(line: &str, prefix: &str) -> Result<(), CatalogError> {
    if !line.is_ascii() || line.len() != TLE_LINE_LENGTH {
        return Err(CatalogError::Parse(format!(
            "element line is not {TLE_LINE_LENGTH} ASCII characters: {line}"
        )));
    }
    if !line.starts_with(prefix) {
        return Err(CatalogError::Parse(format!("element line missing '{prefix}' prefix: {line}")));
    }
    let mut sum: u32 = 0;
    for character in line.chars().take(TLE_LINE_LENGTH - 1) {
        if let Some(digit) = character.to_digit(10) {
            sum += digit;
        } else if character == '-' {
            sum += 1;
        }
    }
    let declared = line
        .chars()
        .nth(TLE_LINE_LENGTH - 1)
        .and_then(|character| character.to_digit(10))
        .ok_or_else(|| CatalogError::Parse(format!("element line checksum missing: {line}")))?;
    if sum % 10 == declared {
        Ok(())
    } else {
        Err(CatalogError::Parse(format!("element line checksum mismatch: {line}")))
    }
}

/// Converts a TLE epoch field (`YYDDD.DDDDDDDD`) to an RFC 3339 timestamp.
fn epoch_to_rfc3339(raw: &str) -> Result<String, CatalogError> {
    let bad = || CatalogError::Parse(format!("bad epoch field: {raw}"));
    let (whole, fraction) = raw.split_once('.').ok_or_else(bad)?;
    let whole = whole.trim();
    if whole.len() < 4 || !fraction.chars().all(|character| character.is_ascii_digit()) {
        return Err(bad());
    }
    let split = whole.len() - 3;
    let two_digit_year = whole[..split].trim().parse::<i32>().map_err(|_| bad())?;
    let ordinal_day = whole[split..].parse::<u16>().map_err(|_| bad())?;
    let day_fraction = format!("0.{fraction}").parse::<f64>().map_err(|_| bad())?;
    let year = if two_digit_year >= TLE_YEAR_PIVOT {
        1900 + two_digit_year
    } else {
        2000 + two_digit_year
    };
    let date = Date::from_ordinal_date(year, ordinal_day).map_err(|_| bad())?;
    let timestamp =
        date.midnight().assume_utc() + Duration::seconds_f64(day_fraction * 86_400.0);
    timestamp.format(&Rfc3339).map_err(|_| bad())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
