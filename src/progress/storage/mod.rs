//! Durable storage for progress records
//!
//! Progress is kept as one JSON document under a well-known key in a simple
//! key-value backend. `ProgressStore` owns the key and the (de)serialization;
//! backends only move strings around.

mod file;
mod memory;
mod sqlite;

pub use file::FileKv;
pub use memory::MemoryKv;
pub use sqlite::SqliteKv;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::models::ProgressState;

/// Default key the progress record is stored under
pub const DEFAULT_PROGRESS_KEY: &str = "studentProgress";

/// Errors from the storage layer
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Malformed progress data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Minimal string key-value storage
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads and writes the progress record of one learner
pub struct ProgressStore {
    backend: Box<dyn KvStore>,
    key: String,
}

impl ProgressStore {
    pub fn new(backend: Box<dyn KvStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Store backed by process memory, for tests and throwaway sessions
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryKv::new()), DEFAULT_PROGRESS_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted record, falling back to defaults.
    ///
    /// Stored fields are merged one by one over the defaults: a missing or
    /// unreadable field keeps its default and the rest of the record survives.
    /// A record that is not a JSON object is logged and replaced by defaults.
    pub fn load(&self) -> ProgressState {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No saved progress, starting fresh");
                return ProgressState::default();
            }
            Err(e) => {
                warn!(key = %self.key, "Failed to read progress, using defaults: {}", e);
                return ProgressState::default();
            }
        };

        match parse_object(&raw) {
            Ok(fields) => self.merge_over_defaults(fields),
            Err(e) => {
                warn!(key = %self.key, "Saved progress is corrupt, using defaults: {}", e);
                ProgressState::default()
            }
        }
    }

    fn merge_over_defaults(&self, fields: Map<String, Value>) -> ProgressState {
        let mut merged = match serde_json::to_value(ProgressState::default()) {
            Ok(Value::Object(defaults)) => defaults,
            _ => Map::new(),
        };

        for (name, value) in fields {
            let previous = merged.insert(name.clone(), value);
            let readable =
                serde_json::from_value::<ProgressState>(Value::Object(merged.clone())).is_ok();
            if readable {
                continue;
            }

            warn!(key = %self.key, field = %name, "Ignoring unreadable field in saved progress");
            match previous {
                Some(previous) => merged.insert(name, previous),
                None => merged.remove(&name),
            };
        }

        let mut state: ProgressState =
            serde_json::from_value(Value::Object(merged)).unwrap_or_default();
        state.normalize();
        state
    }

    pub fn save(&self, state: &ProgressState) -> Result<(), StoreError> {
        let json = serde_json::to_string(state)?;
        self.backend.put(&self.key, &json)
    }

    /// Remove the persisted record and return fresh defaults.
    ///
    /// A failed delete is logged; the returned state is the default either way.
    pub fn reset(&self) -> ProgressState {
        if let Err(e) = self.backend.delete(&self.key) {
            warn!(key = %self.key, "Failed to clear saved progress: {}", e);
        }
        ProgressState::default()
    }

    /// Pretty-printed snapshot suitable for `import`
    pub fn export(&self, state: &ProgressState) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(state)?)
    }

    /// Parse a snapshot produced by `export` (or an older record).
    ///
    /// Missing fields default; anything that is not an object, or a field of
    /// the wrong type, rejects the whole snapshot.
    pub fn import(&self, data: &str) -> Result<ProgressState, StoreError> {
        let fields = parse_object(data)?;
        let mut state: ProgressState = serde_json::from_value(Value::Object(fields))?;
        state.normalize();
        Ok(state)
    }
}

/// Progress records are always JSON objects; serde would also read arrays
fn parse_object(data: &str) -> Result<Map<String, Value>, StoreError> {
    match serde_json::from_str(data)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(StoreError::Malformed(serde::de::Error::custom(
            "expected a JSON object",
        ))),
    }
}
