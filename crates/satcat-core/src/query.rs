// crates/satcat-core/src/query.rs
// ============================================================================
// Module: Search Query Vocabulary
// Description: Typed filter built from the four-token query surface.
// Purpose: Validate (column, operator, value[, value]) tuples before any
//          storage is touched and normalize range bounds.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A search arrives as four tokens: column, operator, and one or two values.
//! [`SearchFilter::new`] validates the tuple against the column allow-list
//! and the operator vocabulary (`eq, gt, lt, ge, le, in` plus `n`-prefixed
//! negations), parses the values against the column's storage kind, and
//! normalizes range bounds so the smaller value is always the lower bound.
//! Anything malformed is an unacceptable-input error raised before the store
//! sees the query.
//!
//! Equality with a `%` or `_` wildcard in the value compiles to a pattern
//! match rather than exact equality; that is a convenience of `eq`/`neq`,
//! not a separate operator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::error::CatalogError;
use crate::record::ColumnKind;
use crate::record::SearchColumn;

// ============================================================================
// SECTION: Operators
// ============================================================================

/// Comparison operator usable in a single-value predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Exact equality.
    Eq,
    /// Strictly greater.
    Gt,
    /// Strictly less.
    Lt,
    /// Greater or equal.
    Ge,
    /// Less or equal.
    Le,
}

impl CompareOp {
    /// Returns the SQL comparison symbol.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
        }
    }
}

/// Base operator decoded from an operator token, negation stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseOp {
    /// One of the five comparison operators.
    Compare(CompareOp),
    /// Inclusive range (`between`).
    In,
}

/// Decodes an operator token into its base form and negation flag.
fn parse_op(token: &str) -> Option<(BaseOp, bool)> {
    let (negated, base) = token.strip_prefix('n').map_or((false, token), |rest| (true, rest));
    let base = match base {
        "eq" => BaseOp::Compare(CompareOp::Eq),
        "gt" => BaseOp::Compare(CompareOp::Gt),
        "lt" => BaseOp::Compare(CompareOp::Lt),
        "ge" => BaseOp::Compare(CompareOp::Ge),
        "le" => BaseOp::Compare(CompareOp::Le),
        "in" => BaseOp::In,
        _ => return None,
    };
    Some((base, negated))
}

// ============================================================================
// SECTION: Values
// ============================================================================

/// A query value parsed against its column's storage kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchValue {
    /// Integer-affinity value.
    Integer(i64),
    /// Real-affinity value; always finite.
    Real(f64),
    /// Text-affinity value.
    Text(String),
}

impl SearchValue {
    /// Parses a raw token against a column kind.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Input`] when the token does not parse as the
    /// column's kind, or parses to a non-finite number.
    pub fn parse(kind: ColumnKind, raw: &str) -> Result<Self, CatalogError> {
        match kind {
            ColumnKind::Integer => raw
                .parse::<i64>()
                .map(Self::Integer)
                .map_err(|_| CatalogError::Input(format!("expected an integer value: {raw}"))),
            ColumnKind::Real => match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Self::Real(value)),
                _ => Err(CatalogError::Input(format!("expected a numeric value: {raw}"))),
            },
            ColumnKind::Text => Ok(Self::Text(raw.to_string())),
        }
    }

    /// Orders two values of the same kind; used only for bound
    /// normalization, where both sides were parsed against one column.
    fn ranks_below(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(left), Self::Integer(right)) => left < right,
            (Self::Real(left), Self::Real(right)) => left < right,
            (Self::Text(left), Self::Text(right)) => left < right,
            _ => false,
        }
    }
}

// ============================================================================
// SECTION: Filters
// ============================================================================

/// Predicate compiled from the operator and value tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Single-value comparison.
    Compare(CompareOp, SearchValue),
    /// Pattern match; chosen when `eq`/`neq` sees a wildcard metacharacter.
    Like(String),
    /// Inclusive range with normalized bounds (lower first).
    Between(SearchValue, SearchValue),
}

/// A validated, ready-to-compile search filter.
///
/// # Invariants
/// - `column` is a member of the allow-list.
/// - `Between` bounds are ordered: the lower bound never ranks above the
///   upper bound, regardless of caller order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    /// Queried column; results are ordered ascending by it.
    pub column: SearchColumn,
    /// Whether the predicate is the logical complement of `expr`.
    pub negated: bool,
    /// The base predicate.
    pub expr: FilterExpr,
}

impl SearchFilter {
    /// Validates a four-token query tuple.
    ///
    /// Column and operator tokens are lowercased before matching. A second
    /// value is only accepted for `in`/`nin`; a missing second value for
    /// those operators defaults to the first (degenerate single-point
    /// range).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Input`] for an unknown column or operator, a
    /// stray second value, or a value that does not parse against the
    /// column's kind.
    pub fn new(
        column: &str,
        op: &str,
        first: &str,
        second: Option<&str>,
    ) -> Result<Self, CatalogError> {
        let column = SearchColumn::parse(&column.to_ascii_lowercase())
            .ok_or_else(|| CatalogError::Input(format!("column not in allowed set: {column}")))?;
        let (base, negated) = parse_op(&op.to_ascii_lowercase())
            .ok_or_else(|| CatalogError::Input(format!("unknown operator: {op}")))?;
        if second.is_some() && base != BaseOp::In {
            return Err(CatalogError::Input(
                "a second value is only valid for the in/nin operators".to_string(),
            ));
        }
        let expr = match base {
            BaseOp::Compare(CompareOp::Eq)
                if first.contains('%') || first.contains('_') =>
            {
                FilterExpr::Like(first.to_string())
            }
            BaseOp::Compare(op) => {
                FilterExpr::Compare(op, SearchValue::parse(column.kind(), first)?)
            }
            BaseOp::In => {
                let lower = SearchValue::parse(column.kind(), first)?;
                let upper = SearchValue::parse(column.kind(), second.unwrap_or(first))?;
                if upper.ranks_below(&lower) {
                    FilterExpr::Between(upper, lower)
                } else {
                    FilterExpr::Between(lower, upper)
                }
            }
        };
        Ok(Self {
            column,
            negated,
            expr,
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
