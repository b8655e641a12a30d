// crates/satcat-server/src/routes.rs
// ============================================================================
// Module: Route Registry
// Description: Explicitly authored table of every served route.
// Purpose: Drive the help listing from one table filtered by write mode.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The help routes serve this table instead of introspecting the router, so
//! the listing is authored, reviewable, and filtered by the read-only flag.
//! Listing order is handler then path, regardless of authoring order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// One served route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    /// Handler family name.
    pub handler: &'static str,
    /// Route path template.
    pub path: &'static str,
    /// One-line description served by the help routes.
    pub summary: &'static str,
    /// Whether the route mutates the catalog.
    pub writable: bool,
}

/// Every served route.
pub const ROUTE_TABLE: &[RouteEntry] = &[
    RouteEntry {
        handler: "help",
        path: "/",
        summary: "list available routes",
        writable: false,
    },
    RouteEntry {
        handler: "help",
        path: "/help",
        summary: "list available routes",
        writable: false,
    },
    RouteEntry {
        handler: "help",
        path: "/list",
        summary: "list available routes",
        writable: false,
    },
    RouteEntry {
        handler: "add",
        path: "/add",
        summary: "POST a [name, line1, line2] element set",
        writable: true,
    },
    RouteEntry {
        handler: "add",
        path: "/add/classified",
        summary: "POST an element set flagged classified",
        writable: true,
    },
    RouteEntry {
        handler: "update",
        path: "/update",
        summary: "POST an element set, replacing any existing record",
        writable: true,
    },
    RouteEntry {
        handler: "update",
        path: "/update/classified",
        summary: "POST a classified element set, replacing any existing record",
        writable: true,
    },
    RouteEntry {
        handler: "delete",
        path: "/delete/{key}/{value}",
        summary: "DELETE one record by norad_catalog or intldes",
        writable: true,
    },
    RouteEntry {
        handler: "search",
        path: "/search/{column}/{op}/{value}",
        summary: "filter records by column and operator",
        writable: false,
    },
    RouteEntry {
        handler: "search",
        path: "/search/{column}/{op}/{value}/{value2}",
        summary: "filter records by column over a value range",
        writable: false,
    },
    RouteEntry {
        handler: "range",
        path: "/range",
        summary: "min and max of every searchable column",
        writable: false,
    },
    RouteEntry {
        handler: "range",
        path: "/range/{column}",
        summary: "min and max of one searchable column",
        writable: false,
    },
    RouteEntry {
        handler: "count",
        path: "/count",
        summary: "total record count",
        writable: false,
    },
    RouteEntry {
        handler: "columns",
        path: "/columns",
        summary: "the searchable-column allow-list",
        writable: false,
    },
    RouteEntry {
        handler: "schema",
        path: "/schema",
        summary: "declared storage schema",
        writable: false,
    },
];

/// Returns the routes visible in the given write mode, sorted by handler
/// then path.
#[must_use]
pub fn route_listing(writable: bool) -> Vec<RouteEntry> {
    let mut listing: Vec<RouteEntry> = ROUTE_TABLE
        .iter()
        .filter(|entry| writable || !entry.writable)
        .copied()
        .collect();
    listing.sort_by_key(|entry| (entry.handler, entry.path));
    listing
}

// ============================================================================
// SECTION: Tests
// ============================================================================
