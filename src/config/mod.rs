//! Configuration loading and management

mod io;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::progress::achievements::DayBoundary;
use crate::progress::storage::DEFAULT_PROGRESS_KEY;

/// Default configuration content written by `edustem init`
pub const DEFAULT_CONFIG: &str = r#"# EduSTEM Configuration
# =====================

# ============================================================================
# STORAGE - Where learner progress is persisted
# ============================================================================
#
# Available options:
#   backend - "sqlite" (default), "file" (one JSON file per learner) or "memory"
#   path    - Database file (sqlite) or directory (file)
#             Defaults: ~/.edustem/progress.db and ~/.edustem/data/

[storage]
backend = "sqlite"
# path = "/path/to/progress.db"

# ============================================================================
# PROGRESS - Tracking behaviour
# ============================================================================
#
# Available options:
#   key          - Record key the progress is stored under (default: "studentProgress")
#   day_boundary - Which midnight ends a day for streaks: "local" (default) or "utc"

[progress]
key = "studentProgress"
day_boundary = "local"
"#;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where progress is persisted
    #[serde(default)]
    pub storage: StorageSettings,

    /// Progress tracking behaviour
    #[serde(default)]
    pub progress: ProgressSettings,
}

/// Available storage backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    File,
    /// Nothing survives the process; useful for demos and tests
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database file (sqlite) or directory (file). Defaults under `~/.edustem/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StorageSettings {
    pub fn sqlite_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| Config::global_config_dir().join("progress.db"))
    }

    pub fn file_dir(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| Config::global_config_dir().join("data"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSettings {
    /// Key the progress record is stored under
    #[serde(default = "default_progress_key")]
    pub key: String,

    /// Where one calendar day ends for streaks and the daily log
    #[serde(default)]
    pub day_boundary: DayBoundary,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            key: default_progress_key(),
            day_boundary: DayBoundary::default(),
        }
    }
}

fn default_progress_key() -> String {
    DEFAULT_PROGRESS_KEY.to_string()
}
