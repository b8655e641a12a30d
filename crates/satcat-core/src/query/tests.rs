// crates/satcat-core/src/query/tests.rs
// ============================================================================
// Module: Search Query Tests
// Description: Unit and property tests for filter validation.
// Purpose: Validate operator decoding, wildcard promotion, bound
//          normalization, and input rejection.
// Dependencies: satcat-core, proptest
// ============================================================================

//! ## Overview
//! Exercises the four-token validation path: the operator vocabulary with
//! its `n`-prefixed negations, the `eq`-to-`LIKE` wildcard promotion, typed
//! value parsing per column kind, and the bound-normalization guarantee that
//! reversed range bounds are equivalent to ordered ones.

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

use super::CompareOp;
use super::FilterExpr;
use super::SearchFilter;
use super::SearchValue;
use crate::error::CatalogError;
use crate::record::SearchColumn;

// ============================================================================
// SECTION: Operator Decoding
// ============================================================================

#[test]
fn decodes_all_operators_and_negations() {
    for (token, op) in [
        ("eq", CompareOp::Eq),
        ("gt", CompareOp::Gt),
        ("lt", CompareOp::Lt),
        ("ge", CompareOp::Ge),
        ("le", CompareOp::Le),
    ] {
        let plain = SearchFilter::new("apogee", token, "500", None).unwrap();
        assert!(!plain.negated);
        assert_eq!(plain.expr, FilterExpr::Compare(op, SearchValue::Real(500.0)));
        let negated = SearchFilter::new("apogee", &format!("n{token}"), "500", None).unwrap();
        assert!(negated.negated);
        assert_eq!(negated.expr, plain.expr);
    }
}

#[test]
fn tokens_are_case_insensitive() {
    let filter = SearchFilter::new("APOGEE", "GE", "500", None).unwrap();
    assert_eq!(filter.column, SearchColumn::Apogee);
}

#[test]
fn unknown_column_and_operator_are_input_errors() {
    assert!(matches!(
        SearchFilter::new("altitude", "ge", "500", None),
        Err(CatalogError::Input(_))
    ));
    assert!(matches!(
        SearchFilter::new("apogee", "between", "500", None),
        Err(CatalogError::Input(_))
    ));
    assert!(matches!(
        SearchFilter::new("apogee", "n", "500", None),
        Err(CatalogError::Input(_))
    ));
}

#[test]
fn stray_second_value_is_rejected() {
    let result = SearchFilter::new("apogee", "ge", "500", Some("600"));
    assert!(matches!(result, Err(CatalogError::Input(_))));
    assert!(SearchFilter::new("apogee", "in", "500", Some("600")).is_ok());
    assert!(SearchFilter::new("apogee", "nin", "500", Some("600")).is_ok());
}

// ============================================================================
// SECTION: Values and Wildcards
// ============================================================================

#[test]
fn wildcard_equality_becomes_pattern_match() {
    let filter = SearchFilter::new("name", "eq", "ISS%", None).unwrap();
    assert_eq!(filter.expr, FilterExpr::Like("ISS%".to_string()));
    let negated = SearchFilter::new("name", "neq", "ISS_", None).unwrap();
    assert!(negated.negated);
    assert_eq!(negated.expr, FilterExpr::Like("ISS_".to_string()));
    // Plain equality stays exact.
    let exact = SearchFilter::new("name", "eq", "ISS", None).unwrap();
    assert_eq!(
        exact.expr,
        FilterExpr::Compare(CompareOp::Eq, SearchValue::Text("ISS".to_string()))
    );
}

#[test]
fn values_parse_against_column_kind() {
    let integer = SearchFilter::new("norad_catalog", "eq", "25544", None).unwrap();
    assert_eq!(
        integer.expr,
        FilterExpr::Compare(CompareOp::Eq, SearchValue::Integer(25544))
    );
    assert!(matches!(
        SearchFilter::new("norad_catalog", "eq", "iss", None),
        Err(CatalogError::Input(_))
    ));
    assert!(matches!(
        SearchFilter::new("apogee", "ge", "not-a-number", None),
        Err(CatalogError::Input(_))
    ));
    assert!(matches!(
        SearchFilter::new("apogee", "ge", "NaN", None),
        Err(CatalogError::Input(_))
    ));
}

// ============================================================================
// SECTION: Range Normalization
// ============================================================================

#[test]
fn numeric_bounds_normalize_numerically() {
    // Lexicographic order would put "10" before "2"; typed parsing must not.
    let filter = SearchFilter::new("apogee", "in", "10", Some("2")).unwrap();
    assert_eq!(
        filter.expr,
        FilterExpr::Between(SearchValue::Real(2.0), SearchValue::Real(10.0))
    );
}

#[test]
fn missing_upper_bound_defaults_to_single_point() {
    let filter = SearchFilter::new("period", "in", "92.5", None).unwrap();
    assert_eq!(
        filter.expr,
        FilterExpr::Between(SearchValue::Real(92.5), SearchValue::Real(92.5))
    );
}

#[test]
fn text_bounds_normalize_lexicographically() {
    let filter = SearchFilter::new("intldes", "in", "99067A", Some("98067A")).unwrap();
    assert_eq!(
        filter.expr,
        FilterExpr::Between(
            SearchValue::Text("98067A".to_string()),
            SearchValue::Text("99067A".to_string())
        )
    );
}

proptest! {
    #[test]
    fn reversed_bounds_are_equivalent(a in -1.0e6_f64..1.0e6, b in -1.0e6_f64..1.0e6) {
        let forward =
            SearchFilter::new("apogee", "in", &a.to_string(), Some(&b.to_string())).unwrap();
        let reversed =
            SearchFilter::new("apogee", "in", &b.to_string(), Some(&a.to_string())).unwrap();
        assert_eq!(forward, reversed);
    }
}
