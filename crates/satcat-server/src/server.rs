// crates/satcat-server/src/server.rs
// ============================================================================
// Module: Catalog HTTP Server
// Description: Query and ingestion surface for the satellite catalog.
// Purpose: Map catalog operations onto routes with distinct statuses.
// Dependencies: satcat-core, satcat-store-sqlite, axum, tokio
// ============================================================================

//! ## Overview
//! The server threads one explicit [`ServerContext`] through axum state; no
//! globals. Mutating routes are enabled only in writable mode and answer
//! `403` otherwise. Request bodies are read as raw bytes so content-type
//! and payload problems both map to `406` instead of the framework default.
//! Every error response is JSON `{"error": ...}` with a status drawn from
//! the catalog error taxonomy, never a generic failure.
//!
//! Handlers stay thin: each wraps a synchronous dispatch function that is
//! unit-tested against a real on-disk store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use satcat_core::CatalogError;
use satcat_core::DeleteKey;
use satcat_core::ElementSet;
use satcat_core::SEARCH_COLUMNS;
use satcat_core::SatelliteRecord;
use satcat_core::SearchColumn;
use satcat_core::SearchFilter;
use satcat_core::build_record;
use satcat_store_sqlite::ColumnRange;
use satcat_store_sqlite::SqliteCatalogStore;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::routes::route_listing;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Example element set served by the `/add` help payload.
const EXAMPLE_NAME: &str = "ISS (ZARYA)";

/// Example element line 1.
const EXAMPLE_LINE1: &str =
    "1 25544U 98067A   19128.56248153  .00016717  00000-0  10270-3 0  9002";

/// Example element line 2.
const EXAMPLE_LINE2: &str =
    "2 25544  51.6390 198.1271 0001239 315.7000  44.4052 15.52641749  9097";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
    /// Binding or serving failed.
    #[error("transport error: {0}")]
    Transport(String),
    /// The catalog store failed to open.
    #[error("store error: {0}")]
    Store(String),
}

/// One JSON error response with its status.
#[derive(Debug, PartialEq, Eq)]
struct ApiError {
    /// Response status.
    status: StatusCode,
    /// Human-readable cause, serialized as `{"error": ...}`.
    message: String,
}

impl ApiError {
    /// Builds an error response.
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(error: CatalogError) -> Self {
        let status = match &error {
            CatalogError::Parse(_) | CatalogError::Constraint(_) | CatalogError::Input(_) => {
                StatusCode::NOT_ACCEPTABLE
            }
            CatalogError::Uniqueness(_) => StatusCode::CONFLICT,
            CatalogError::NotFound(_) => StatusCode::GONE,
            CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

// ============================================================================
// SECTION: Context
// ============================================================================

/// Shared state threaded through every handler.
#[derive(Clone)]
pub struct ServerContext {
    /// The catalog store.
    pub store: SqliteCatalogStore,
    /// Whether mutating routes are enabled.
    pub writable: bool,
}

/// Response payload for a successful add or update.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct AddResponse {
    /// Object name from the submitted set.
    name: String,
    /// NORAD catalog number of the stored record.
    norad_catalog: i64,
    /// International designator of the stored record.
    intldes: String,
    /// Whether the record was stored as classified.
    classified: bool,
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Rejects the request unless mutating routes are enabled.
fn require_writable(context: &ServerContext) -> Result<(), ApiError> {
    if context.writable {
        Ok(())
    } else {
        Err(ApiError::new(StatusCode::FORBIDDEN, "catalog is not writable"))
    }
}

/// Rejects the request unless the body is declared as JSON.
fn require_json(headers: &HeaderMap) -> Result<(), ApiError> {
    let declared = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if declared {
        Ok(())
    } else {
        Err(ApiError::new(StatusCode::NOT_ACCEPTABLE, "content type must be application/json"))
    }
}

/// Stores one submitted element set.
fn dispatch_add(
    context: &ServerContext,
    headers: &HeaderMap,
    body: &[u8],
    classified: bool,
    update: bool,
) -> Result<AddResponse, ApiError> {
    require_writable(context)?;
    require_json(headers)?;
    let (name, line1, line2): (String, String, String) = serde_json::from_slice(body)
        .map_err(|_| {
            ApiError::new(StatusCode::NOT_ACCEPTABLE, "body must be a [name, line1, line2] array")
        })?;
    let set = ElementSet {
        name: name.trim().to_string(),
        line1: line1.trim().to_string(),
        line2: line2.trim().to_string(),
    };
    let record = build_record(&set, classified)?;
    if update {
        context.store.upsert(&record)?;
    } else {
        context.store.insert(&record)?;
    }
    Ok(AddResponse {
        name: record.name,
        norad_catalog: record.norad_catalog,
        intldes: record.intldes,
        classified,
    })
}

/// Deletes one record by key column and value.
fn dispatch_delete(
    context: &ServerContext,
    key: &str,
    value: &str,
) -> Result<serde_json::Value, ApiError> {
    require_writable(context)?;
    let key = DeleteKey::parse(key).ok_or_else(|| {
        ApiError::new(
            StatusCode::NOT_ACCEPTABLE,
            format!("delete key must be norad_catalog or intldes, not {key}"),
        )
    })?;
    context.store.delete(key, value)?;
    Ok(json!({ "deleted": { key.as_str(): value } }))
}

/// Runs one validated filter query.
fn dispatch_search(
    context: &ServerContext,
    column: &str,
    op: &str,
    value: &str,
    second: Option<&str>,
) -> Result<Vec<SatelliteRecord>, ApiError> {
    let filter = SearchFilter::new(column, op, value, second)?;
    Ok(context.store.search(&filter)?)
}

/// Reports the min/max of one searchable column.
fn dispatch_range(context: &ServerContext, column: &str) -> Result<ColumnRange, ApiError> {
    let column = SearchColumn::parse(&column.to_lowercase()).ok_or_else(|| {
        ApiError::new(StatusCode::NOT_ACCEPTABLE, format!("unknown column: {column}"))
    })?;
    Ok(context.store.range(column)?)
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Serves the route listing filtered by write mode.
async fn handle_help(State(context): State<Arc<ServerContext>>) -> Response {
    Json(route_listing(context.writable)).into_response()
}

/// Serves the `/add` usage payload on GET.
async fn handle_add_help() -> Response {
    let payload = json!({
        "error": "POST a JSON [name, line1, line2] array to this route",
        "example": [EXAMPLE_NAME, EXAMPLE_LINE1, EXAMPLE_LINE2],
    });
    (StatusCode::METHOD_NOT_ALLOWED, Json(payload)).into_response()
}

/// Handles `POST /add`.
async fn handle_add(
    State(context): State<Arc<ServerContext>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let response = dispatch_add(&context, &headers, &body, false, false)?;
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Handles `POST /add/classified`.
async fn handle_add_classified(
    State(context): State<Arc<ServerContext>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let response = dispatch_add(&context, &headers, &body, true, false)?;
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Handles `POST /update`.
async fn handle_update(
    State(context): State<Arc<ServerContext>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let response = dispatch_add(&context, &headers, &body, false, true)?;
    Ok(Json(response).into_response())
}

/// Handles `POST /update/classified`.
async fn handle_update_classified(
    State(context): State<Arc<ServerContext>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let response = dispatch_add(&context, &headers, &body, true, true)?;
    Ok(Json(response).into_response())
}

/// Handles `DELETE /delete/{key}/{value}`.
async fn handle_delete(
    State(context): State<Arc<ServerContext>>,
    Path((key, value)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let response = dispatch_delete(&context, &key, &value)?;
    Ok(Json(response).into_response())
}

/// Handles `GET /search/{column}/{op}/{value}`.
async fn handle_search(
    State(context): State<Arc<ServerContext>>,
    Path((column, op, value)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    let records = dispatch_search(&context, &column, &op, &value, None)?;
    Ok(Json(records).into_response())
}

/// Handles `GET /search/{column}/{op}/{value}/{value2}`.
async fn handle_search_range(
    State(context): State<Arc<ServerContext>>,
    Path((column, op, value, second)): Path<(String, String, String, String)>,
) -> Result<Response, ApiError> {
    let records = dispatch_search(&context, &column, &op, &value, Some(&second))?;
    Ok(Json(records).into_response())
}

/// Handles `GET /range`.
async fn handle_range_all(
    State(context): State<Arc<ServerContext>>,
) -> Result<Response, ApiError> {
    let ranges = context.store.range_all().map_err(ApiError::from)?;
    Ok(Json(ranges).into_response())
}

/// Handles `GET /range/{column}`.
async fn handle_range(
    State(context): State<Arc<ServerContext>>,
    Path(column): Path<String>,
) -> Result<Response, ApiError> {
    let range = dispatch_range(&context, &column)?;
    Ok(Json(range).into_response())
}

/// Handles `GET /count`.
async fn handle_count(State(context): State<Arc<ServerContext>>) -> Result<Response, ApiError> {
    let count = context.store.count().map_err(ApiError::from)?;
    Ok(Json(json!({ "count": count })).into_response())
}

/// Handles `GET /columns`.
async fn handle_columns() -> Response {
    let columns: Vec<&str> = SEARCH_COLUMNS.iter().map(|column| column.as_str()).collect();
    Json(columns).into_response()
}

/// Handles `GET /schema`.
async fn handle_schema(State(context): State<Arc<ServerContext>>) -> Response {
    context.store.schema_text().into_response()
}

// ============================================================================
// SECTION: Router and Entry Point
// ============================================================================

/// Builds the route table onto the shared context.
#[must_use]
pub fn build_router(context: Arc<ServerContext>) -> Router {
    Router::new()
        .route("/", get(handle_help))
        .route("/help", get(handle_help))
        .route("/list", get(handle_help))
        .route("/add", post(handle_add).get(handle_add_help))
        .route("/add/classified", post(handle_add_classified))
        .route("/update", post(handle_update))
        .route("/update/classified", post(handle_update_classified))
        .route("/delete/{key}/{value}", delete(handle_delete))
        .route("/search/{column}/{op}/{value}", get(handle_search))
        .route("/search/{column}/{op}/{value}/{value2}", get(handle_search_range))
        .route("/range", get(handle_range_all))
        .route("/range/{column}", get(handle_range))
        .route("/count", get(handle_count))
        .route("/columns", get(handle_columns))
        .route("/schema", get(handle_schema))
        .with_state(context)
}

/// Opens the store and serves requests until shutdown.
///
/// # Errors
///
/// Returns [`ServerError`] when the store cannot be opened, the listen
/// address is invalid, or serving fails.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let store = SqliteCatalogStore::open(&config.store)
        .map_err(|err| ServerError::Store(err.to_string()))?;
    let addr = config.bind_addr()?;
    let context = Arc::new(ServerContext {
        store,
        writable: config.writable,
    });
    let app = build_router(context);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| ServerError::Transport(format!("cannot bind {addr}: {err}")))?;
    tracing::info!(%addr, writable = config.writable, "catalog server listening");
    axum::serve(listener, app)
        .await
        .map_err(|err| ServerError::Transport(format!("server failed: {err}")))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
