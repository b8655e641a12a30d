// crates/satcat-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Catalog Store
// Description: Durable satellite-record storage with declared constraints.
// Purpose: Persist records, enforce plausibility/uniqueness rules, and
//          answer filter, range, and count queries.
// Dependencies: rusqlite, satcat-core, serde, tracing
// ============================================================================

//! ## Overview
//! The store owns the `tles` table. Its CHECK constraints and column
//! declarations are rendered from [`satcat_core::TABLE_COLUMNS`], and every
//! allow-listed search column carries an index so range, equality, and
//! between queries stay cheap. Two write modes exist: `insert` fails on any
//! constraint or key conflict and leaves the existing row untouched;
//! `upsert` atomically replaces the whole conflicting row. Batch ingestion
//! commits once per batch; per-record failures are logged and summarized,
//! never fatal for the batch.
//!
//! Single logical writer: connection access is serialized through a mutex
//! and the atomic replace-on-conflict is the only concurrency primitive
//! relied upon (last writer wins at row granularity).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use rusqlite::Connection;
use rusqlite::ErrorCode;
use rusqlite::OpenFlags;
use rusqlite::params;
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use satcat_core::CatalogError;
use satcat_core::ColumnKind;
use satcat_core::DeleteKey;
use satcat_core::FilterExpr;
use satcat_core::SEARCH_COLUMNS;
use satcat_core::SatelliteRecord;
use satcat_core::SearchColumn;
use satcat_core::SearchFilter;
use satcat_core::SearchValue;
use satcat_core::TABLE_COLUMNS;
use satcat_core::build_record;
use satcat_core::parse_elements;
use satcat_core::violated_constraints;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Catalog table name.
const TABLE_NAME: &str = "tles";

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteJournalMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteJournalMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` catalog store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteCatalogConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteJournalMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
    /// Drop and recreate the catalog table before initializing the schema.
    /// Schema initialization is otherwise idempotent.
    #[serde(default)]
    pub reinitialize: bool,
}

impl SqliteCatalogConfig {
    /// Builds a config with defaults for the given database path.
    #[must_use]
    pub fn for_path(path: PathBuf) -> Self {
        Self {
            path,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteJournalMode::default(),
            sync_mode: SqliteSyncMode::default(),
            reinitialize: false,
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Renders the declared schema from the core constraint table.
///
/// The text returned here is both executed at initialization and served by
/// schema introspection; there is no second copy of the constraints.
#[must_use]
pub fn schema_sql() -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS \"{TABLE_NAME}\" (\n");
    for column in TABLE_COLUMNS {
        sql.push_str(&format!("  \"{}\" {},\n", column.name, column.decl));
    }
    sql.push_str("  PRIMARY KEY(\"norad_catalog\")\n) WITHOUT ROWID;\n");
    for column in SEARCH_COLUMNS {
        // The primary key needs no extra index.
        if *column != SearchColumn::NoradCatalog {
            sql.push_str(&format!(
                "CREATE INDEX IF NOT EXISTS ix_{0} ON {TABLE_NAME} ({0});\n",
                column.as_str()
            ));
        }
    }
    sql
}

/// Renders the comma-separated catalog column list in declaration order.
fn column_list() -> String {
    TABLE_COLUMNS.iter().map(|column| column.name).collect::<Vec<_>>().join(", ")
}

/// Renders the insert statement for the chosen write mode.
fn insert_sql(replace: bool) -> String {
    let placeholders = (1..=TABLE_COLUMNS.len())
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ");
    let conflict_clause = if replace { "OR REPLACE " } else { "" };
    format!("INSERT {conflict_clause}INTO {TABLE_NAME} ({}) VALUES ({placeholders})", column_list())
}

// ============================================================================
// SECTION: Result Types
// ============================================================================

/// Minimum and maximum of one column; both `None` on an empty store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRange {
    /// Smallest stored value.
    pub min: Option<SearchValue>,
    /// Largest stored value.
    pub max: Option<SearchValue>,
}

/// One rejected record from a batch ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestFailure {
    /// Object name from the element set (possibly empty).
    pub name: String,
    /// The rejection cause.
    pub error: CatalogError,
}

/// Outcome of one batch ingest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestSummary {
    /// Element sets recognized in the blob after name dedup.
    pub parsed: usize,
    /// Records durably written.
    pub loaded: usize,
    /// Per-record rejections; never fatal for the batch.
    pub failures: Vec<IngestFailure>,
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed catalog store.
///
/// # Invariants
/// - Connection access is serialized through a mutex.
/// - Schema text and CHECK constraints derive from the core constraint
///   table.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    /// Shared connection guarded by a mutex (single logical writer).
    connection: Arc<Mutex<Connection>>,
}

impl SqliteCatalogStore {
    /// Opens (and if needed creates) the catalog database.
    ///
    /// Initialization is idempotent; opening an existing catalog is a no-op
    /// unless `reinitialize` asks for a drop-and-recreate first.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] when the database cannot be opened or
    /// the schema cannot be applied.
    pub fn open(config: &SqliteCatalogConfig) -> Result<Self, CatalogError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
        let connection = Connection::open_with_flags(&config.path, flags).map_err(db_error)?;
        apply_pragmas(&connection, config)?;
        if config.reinitialize {
            connection
                .execute_batch(&format!("DROP TABLE IF EXISTS {TABLE_NAME};"))
                .map_err(db_error)?;
        }
        connection.execute_batch(&schema_sql()).map_err(db_error)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Returns the declared schema text.
    #[must_use]
    pub fn schema_text(&self) -> String {
        schema_sql()
    }

    /// Inserts a record; any constraint or uniqueness conflict fails the
    /// write and leaves the existing row untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Uniqueness`] on a key conflict,
    /// [`CatalogError::Constraint`] with the violated rule names on a CHECK
    /// failure, or [`CatalogError::Store`] for engine failures.
    pub fn insert(&self, record: &SatelliteRecord) -> Result<(), CatalogError> {
        let guard = self.lock()?;
        execute_write(&guard, record, false)
    }

    /// Inserts a record, atomically replacing the whole existing row on a
    /// primary-key or unique-key conflict (no partial merge).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Constraint`] on a CHECK failure or
    /// [`CatalogError::Store`] for engine failures.
    pub fn upsert(&self, record: &SatelliteRecord) -> Result<(), CatalogError> {
        let guard = self.lock()?;
        execute_write(&guard, record, true)
    }

    /// Deletes at most one row by key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no row matched, or
    /// [`CatalogError::Store`] for engine failures.
    pub fn delete(&self, key: DeleteKey, value: &str) -> Result<(), CatalogError> {
        let guard = self.lock()?;
        let affected = guard
            .execute(
                &format!("DELETE FROM {TABLE_NAME} WHERE {} = ?1", key.as_str()),
                params![value],
            )
            .map_err(db_error)?;
        if affected == 0 {
            return Err(CatalogError::NotFound(format!("{} {value}", key.as_str())));
        }
        Ok(())
    }

    /// Returns the total row count.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] for engine failures.
    pub fn count(&self) -> Result<i64, CatalogError> {
        let guard = self.lock()?;
        guard
            .query_row(&format!("SELECT COUNT(*) FROM {TABLE_NAME}"), params![], |row| row.get(0))
            .map_err(db_error)
    }

    /// Runs a validated filter and returns matching records ordered
    /// ascending by the queried column (ties left in storage order).
    ///
    /// Negated filters compile to `NOT (...)` and are evaluated by the
    /// engine, never by post-filtering in memory.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] for engine failures.
    pub fn search(&self, filter: &SearchFilter) -> Result<Vec<SatelliteRecord>, CatalogError> {
        let column = filter.column.as_str();
        let (predicate, values) = match &filter.expr {
            FilterExpr::Compare(op, value) => {
                (format!("{column} {} ?1", op.as_sql()), vec![bind_value(value)])
            }
            FilterExpr::Like(pattern) => {
                (format!("{column} LIKE ?1"), vec![Value::Text(pattern.clone())])
            }
            FilterExpr::Between(lower, upper) => (
                format!("{column} BETWEEN ?1 AND ?2"),
                vec![bind_value(lower), bind_value(upper)],
            ),
        };
        let predicate =
            if filter.negated { format!("NOT ({predicate})") } else { predicate };
        let sql = format!(
            "SELECT {} FROM {TABLE_NAME} WHERE {predicate} ORDER BY {column}",
            column_list()
        );
        let guard = self.lock()?;
        let mut statement = guard.prepare(&sql).map_err(db_error)?;
        let rows = statement
            .query_map(params_from_iter(values), record_from_row)
            .map_err(db_error)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(db_error)?);
        }
        Ok(records)
    }

    /// Returns the min/max of one allow-listed column; both are `None` on
    /// an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] for engine failures.
    pub fn range(&self, column: SearchColumn) -> Result<ColumnRange, CatalogError> {
        let guard = self.lock()?;
        column_range(&guard, column)
    }

    /// Returns the min/max of every allow-listed column.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] for engine failures.
    pub fn range_all(&self) -> Result<BTreeMap<&'static str, ColumnRange>, CatalogError> {
        let guard = self.lock()?;
        let mut ranges = BTreeMap::new();
        for column in SEARCH_COLUMNS {
            ranges.insert(column.as_str(), column_range(&guard, *column)?);
        }
        Ok(ranges)
    }

    /// Ingests one decompressed archive blob as a single batch.
    ///
    /// Parses element sets, derives candidate records, and writes them under
    /// the chosen mode (`update` selects upsert). The batch commits once at
    /// the end; parse failures, constraint violations, and uniqueness
    /// conflicts skip only the offending record and are collected in the
    /// summary.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] when the transaction itself cannot be
    /// opened or committed.
    pub fn ingest(
        &self,
        blob: &str,
        classified: bool,
        update: bool,
    ) -> Result<IngestSummary, CatalogError> {
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(db_error)?;
        let sets = parse_elements(blob);
        let mut summary = IngestSummary {
            parsed: sets.len(),
            ..IngestSummary::default()
        };
        for set in sets {
            let outcome = build_record(&set, classified)
                .and_then(|record| execute_write(&tx, &record, update));
            match outcome {
                Ok(()) => summary.loaded += 1,
                Err(error) => {
                    tracing::warn!(name = %set.name, %error, "record rejected");
                    summary.failures.push(IngestFailure {
                        name: set.name,
                        error,
                    });
                }
            }
        }
        tx.commit().map_err(db_error)?;
        tracing::info!(
            parsed = summary.parsed,
            loaded = summary.loaded,
            failed = summary.failures.len(),
            "batch ingested"
        );
        Ok(summary)
    }

    /// Locks the shared connection.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, CatalogError> {
        self.connection
            .lock()
            .map_err(|_| CatalogError::Store("store mutex poisoned".to_string()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Applies the pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteCatalogConfig,
) -> Result<(), CatalogError> {
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(db_error)?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(db_error)?;
    connection
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(db_error)?;
    Ok(())
}

/// Wraps an engine failure as a store error.
fn db_error(error: rusqlite::Error) -> CatalogError {
    CatalogError::Store(error.to_string())
}

/// Executes one row write in the chosen mode and classifies failures.
fn execute_write(
    connection: &Connection,
    record: &SatelliteRecord,
    replace: bool,
) -> Result<(), CatalogError> {
    connection
        .execute(
            &insert_sql(replace),
            params![
                record.norad_catalog,
                record.classified,
                record.inclination,
                record.period,
                record.apogee,
                record.perigee,
                record.mean_motion,
                record.eccentricity,
                record.semimajor_axis,
                record.epoch,
                record.intldes,
                record.name,
                record.line1,
                record.line2,
            ],
        )
        .map(|_| ())
        .map_err(|error| classify_write_error(error, record))
}

/// Distinguishes key conflicts from CHECK failures on a rejected write.
///
/// Uniqueness cannot be diagnosed from the candidate record alone, so the
/// extended result code decides; everything else gets the diagnostic
/// validator's violated-rule names attached.
fn classify_write_error(error: rusqlite::Error, record: &SatelliteRecord) -> CatalogError {
    if let rusqlite::Error::SqliteFailure(code, _) = &error
        && code.code == ErrorCode::ConstraintViolation
    {
        if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            || code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        {
            return CatalogError::Uniqueness(format!(
                "norad_catalog {} / intldes {}",
                record.norad_catalog, record.intldes
            ));
        }
        let violated =
            violated_constraints(record).iter().map(ToString::to_string).collect();
        return CatalogError::Constraint(violated);
    }
    db_error(error)
}

/// Converts a typed search value into an `SQLite` binding.
fn bind_value(value: &SearchValue) -> Value {
    match value {
        SearchValue::Integer(value) => Value::Integer(*value),
        SearchValue::Real(value) => Value::Real(*value),
        SearchValue::Text(value) => Value::Text(value.clone()),
    }
}

/// Maps one result row to a record; column order follows the declaration
/// order rendered by [`column_list`].
fn record_from_row(row: &rusqlite::Row<'_>) -> Result<SatelliteRecord, rusqlite::Error> {
    Ok(SatelliteRecord {
        norad_catalog: row.get(0)?,
        classified: row.get(1)?,
        inclination: row.get(2)?,
        period: row.get(3)?,
        apogee: row.get(4)?,
        perigee: row.get(5)?,
        mean_motion: row.get(6)?,
        eccentricity: row.get(7)?,
        semimajor_axis: row.get(8)?,
        epoch: row.get(9)?,
        intldes: row.get(10)?,
        name: row.get(11)?,
        line1: row.get(12)?,
        line2: row.get(13)?,
    })
}

/// Reads the min/max of one column with kind-appropriate decoding.
fn column_range(
    connection: &Connection,
    column: SearchColumn,
) -> Result<ColumnRange, CatalogError> {
    let sql =
        format!("SELECT MIN({0}), MAX({0}) FROM {TABLE_NAME}", column.as_str());
    connection
        .query_row(&sql, params![], |row| {
            let (min, max) = match column.kind() {
                ColumnKind::Integer => (
                    row.get::<_, Option<i64>>(0)?.map(SearchValue::Integer),
                    row.get::<_, Option<i64>>(1)?.map(SearchValue::Integer),
                ),
                ColumnKind::Real => (
                    row.get::<_, Option<f64>>(0)?.map(SearchValue::Real),
                    row.get::<_, Option<f64>>(1)?.map(SearchValue::Real),
                ),
                ColumnKind::Text => (
                    row.get::<_, Option<String>>(0)?.map(SearchValue::Text),
                    row.get::<_, Option<String>>(1)?.map(SearchValue::Text),
                ),
            };
            Ok(ColumnRange {
                min,
                max,
            })
        })
        .map_err(db_error)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
