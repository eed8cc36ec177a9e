// crates/aura-shield-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Rule Store
// Description: Durable RuleStore backed by SQLite WAL.
// Purpose: Persist per-(package, profile) rules with keyed overwrites.
// Dependencies: aura-shield-core, rusqlite, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This module implements a durable [`RuleStore`] using `SQLite`. Each rule
//! occupies one row keyed by `(package_name, profile_id)`; tag and keyword
//! sets are JSON-encoded. Opens validate the schema version and fail closed
//! on mismatch. Database contents are untrusted; decode failures surface as
//! corruption, never as silent defaults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use aura_shield_core::PackageName;
use aura_shield_core::ProfileId;
use aura_shield_core::Rule;
use aura_shield_core::RuleStore;
use aura_shield_core::ShieldLevel;
use aura_shield_core::StoreError;
use aura_shield_core::TagId;
use aura_shield_core::Timestamp;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// Configuration for the `SQLite` rule store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
}

impl SqliteStoreConfig {
    /// Creates a config with defaults for the given database path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
///
/// # Invariants
/// - Error messages avoid embedding raw rule payloads.
#[derive(Debug, Error, Clone)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Stored row fails decoding.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Store(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
        }
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed rule store with WAL support.
///
/// # Invariants
/// - `SQLite` connection access is serialized through a mutex.
/// - Row decode failures fail closed as corruption errors.
#[derive(Clone)]
pub struct SqliteRuleStore {
    /// Shared connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteRuleStore {
    /// Opens (or creates) the rule database at the configured path.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or the
    /// schema version is incompatible.
    pub fn open(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        let mut connection = open_connection(config)?;
        initialize_schema(&mut connection)?;
        tracing::debug!(path = %config.path.display(), "opened rule database");
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Locks the connection, mapping poisoning to a store error.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection
            .lock()
            .map_err(|_| SqliteStoreError::Db("rule store mutex poisoned".to_string()))
    }
}

impl RuleStore for SqliteRuleStore {
    fn get(
        &self,
        package_name: &PackageName,
        profile_id: &ProfileId,
    ) -> Result<Option<Rule>, StoreError> {
        let guard = self.lock()?;
        let row: Option<RuleRow> = guard
            .query_row(
                "SELECT package_name, profile_id, shield_level, active_categories, \
                 custom_keywords, last_updated FROM rules WHERE package_name = ?1 AND \
                 profile_id = ?2",
                params![package_name.as_str(), profile_id.as_str()],
                RuleRow::from_row,
            )
            .optional()
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        row.map(RuleRow::decode).transpose().map_err(StoreError::from)
    }

    fn upsert(&self, rule: &Rule) -> Result<(), StoreError> {
        let active_categories = encode_json(&rule.active_categories)?;
        let custom_keywords = encode_json(&rule.custom_keywords)?;
        let last_updated = encode_json(&rule.last_updated)?;
        let guard = self.lock()?;
        guard
            .execute(
                "INSERT INTO rules (package_name, profile_id, shield_level, active_categories, \
                 custom_keywords, last_updated) VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
                 ON CONFLICT(package_name, profile_id) DO UPDATE SET \
                 shield_level = excluded.shield_level, \
                 active_categories = excluded.active_categories, \
                 custom_keywords = excluded.custom_keywords, \
                 last_updated = excluded.last_updated",
                params![
                    rule.package_name.as_str(),
                    rule.profile_id.as_str(),
                    rule.shield_level.as_str(),
                    active_categories,
                    custom_keywords,
                    last_updated,
                ],
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        tracing::debug!(
            package = %rule.package_name,
            profile = %rule.profile_id,
            "persisted rule"
        );
        Ok(())
    }

    fn delete(
        &self,
        package_name: &PackageName,
        profile_id: &ProfileId,
    ) -> Result<(), StoreError> {
        let guard = self.lock()?;
        guard
            .execute(
                "DELETE FROM rules WHERE package_name = ?1 AND profile_id = ?2",
                params![package_name.as_str(), profile_id.as_str()],
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        Ok(())
    }

    fn list_by_profile(&self, profile_id: &ProfileId) -> Result<Vec<Rule>, StoreError> {
        let guard = self.lock()?;
        let mut statement = guard
            .prepare(
                "SELECT package_name, profile_id, shield_level, active_categories, \
                 custom_keywords, last_updated FROM rules WHERE profile_id = ?1 \
                 ORDER BY package_name",
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let rows = statement
            .query_map(params![profile_id.as_str()], RuleRow::from_row)
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let mut rules = Vec::new();
        for row in rows {
            let row = row.map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            rules.push(row.decode()?);
        }
        Ok(rules)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        let guard = self.lock()?;
        guard
            .query_row("SELECT 1", params![], |_| Ok(()))
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Row Decoding
// ============================================================================

/// Raw rule row as stored in `SQLite`.
struct RuleRow {
    /// Package key column.
    package_name: String,
    /// Profile key column.
    profile_id: String,
    /// Shield level label column.
    shield_level: String,
    /// JSON-encoded tag set column.
    active_categories: String,
    /// JSON-encoded keyword set column.
    custom_keywords: String,
    /// JSON-encoded timestamp column.
    last_updated: String,
}

impl RuleRow {
    /// Maps a query row into the raw row shape.
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            package_name: row.get(0)?,
            profile_id: row.get(1)?,
            shield_level: row.get(2)?,
            active_categories: row.get(3)?,
            custom_keywords: row.get(4)?,
            last_updated: row.get(5)?,
        })
    }

    /// Decodes the raw row into a rule, failing closed on bad data.
    fn decode(self) -> Result<Rule, SqliteStoreError> {
        let shield_level = match self.shield_level.as_str() {
            "open" => ShieldLevel::Open,
            "smart" => ShieldLevel::Smart,
            "fortress" => ShieldLevel::Fortress,
            other => {
                return Err(SqliteStoreError::Corrupt(format!("unknown shield level: {other}")));
            }
        };
        let active_categories: BTreeSet<TagId> = decode_json(&self.active_categories)?;
        let custom_keywords: BTreeSet<String> = decode_json(&self.custom_keywords)?;
        let last_updated: Timestamp = decode_json(&self.last_updated)?;
        Ok(Rule {
            package_name: PackageName::new(self.package_name),
            profile_id: ProfileId::new(self.profile_id),
            shield_level,
            active_categories,
            custom_keywords,
            last_updated,
        })
    }
}

/// Encodes a value to JSON for storage.
fn encode_json<T: serde::Serialize>(value: &T) -> Result<String, SqliteStoreError> {
    serde_json::to_string(value).map_err(|err| SqliteStoreError::Invalid(err.to_string()))
}

/// Decodes a stored JSON column, failing closed on corruption.
fn decode_json<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, SqliteStoreError> {
    serde_json::from_str(raw).map_err(|err| SqliteStoreError::Corrupt(err.to_string()))
}

// ============================================================================
// SECTION: Connection Setup
// ============================================================================

/// Opens an `SQLite` connection with secure defaults.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS rules (
                    package_name TEXT NOT NULL,
                    profile_id TEXT NOT NULL,
                    shield_level TEXT NOT NULL,
                    active_categories TEXT NOT NULL,
                    custom_keywords TEXT NOT NULL,
                    last_updated TEXT NOT NULL,
                    PRIMARY KEY (package_name, profile_id)
                );
                CREATE INDEX IF NOT EXISTS idx_rules_profile ON rules (profile_id);",
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        }
        Some(SCHEMA_VERSION) => {}
        Some(found) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported store schema version: {found} (expected {SCHEMA_VERSION})"
            )));
        }
    }
    tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}
