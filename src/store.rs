use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::AppError;
use crate::model::{FilterState, SortOption};

pub const FILTER_STATE_KEY: &str = "token_filter_state";
pub const SORT_OPTION_KEY: &str = "token_sort_option";

/// Seam to the device key-value store. The production implementation is
/// SQLite-backed; tests may substitute an in-memory connection or a failing
/// stub.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Single-table key-value store over rusqlite.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at_ms INTEGER NOT NULL
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let conn = self.conn.lock().expect("preferences connection poisoned");
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let conn = self.conn.lock().expect("preferences connection poisoned");
        conn.execute(
            r#"
            INSERT INTO preferences (key, value, updated_at_ms)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at_ms = excluded.updated_at_ms
            "#,
            params![key, value, now_ms],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let conn = self.conn.lock().expect("preferences connection poisoned");
        conn.execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Filter and sort preference persistence.
///
/// Load failures degrade to defaults so the screen always renders; save
/// failures are logged and swallowed (in-memory state stays authoritative);
/// clear/reset failures propagate, since the user explicitly asked for a
/// reset and deserves confirmation it happened.
pub struct PreferenceStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn default_filters(&self) -> FilterState {
        FilterState::default()
    }

    pub fn load_filters(&self) -> FilterState {
        match self.store.get(FILTER_STATE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<FilterState>(&raw) {
                // Partial shapes already merged over defaults by serde(default).
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(error = %e, "discarding malformed persisted filter state");
                    FilterState::default()
                }
            },
            Ok(None) => FilterState::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted filter state");
                FilterState::default()
            }
        }
    }

    pub fn save_filters(&self, filters: &FilterState) {
        let payload = match serde_json::to_string(filters) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize filter state");
                return;
            }
        };
        if let Err(e) = self.store.set(FILTER_STATE_KEY, &payload) {
            tracing::warn!(error = %e, "failed to persist filter state");
        }
    }

    pub fn clear_filters(&self) -> Result<()> {
        self.store
            .remove(FILTER_STATE_KEY)
            .context("failed to clear persisted filter state")
    }

    pub fn load_sort(&self) -> SortOption {
        match self.store.get(SORT_OPTION_KEY) {
            Ok(Some(raw)) => match raw.parse::<SortOption>() {
                Ok(option) => option,
                Err(()) => {
                    tracing::warn!(value = %raw, "discarding unknown persisted sort option");
                    SortOption::default()
                }
            },
            Ok(None) => SortOption::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted sort option");
                SortOption::default()
            }
        }
    }

    pub fn save_sort(&self, option: SortOption) {
        if let Err(e) = self.store.set(SORT_OPTION_KEY, option.as_str()) {
            tracing::warn!(error = %e, "failed to persist sort option");
        }
    }

    pub fn reset_sort(&self) -> Result<()> {
        self.store
            .remove(SORT_OPTION_KEY)
            .context("failed to clear persisted sort option")
    }
}
