//! Learner progress tracking for EduSTEM
//!
//! Turns activity events (videos watched, games played, time spent) into
//! persisted progress: XP and levels, per-subject progress, daily streaks and
//! one-time achievements.
//!
//! # Architecture
//!
//! ```text
//!  video player / games / UI
//!             │  record_activity, add_xp
//!             ▼
//!   ┌────────────────────┐   events   ┌──────────────┐
//!   │  ProgressManager   │──────────▶│  listeners   │
//!   └─────────┬──────────┘            └──────────────┘
//!             │ recorder → levels → streaks → checker (pure)
//!             ▼
//!       ProgressStore ──▶ KvStore (sqlite | file | memory)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let manager = ProgressManager::from_config(&Config::load()?)?;
//! let events = manager.record_activity(
//!     ActivityKind::VideoWatched,
//!     ActivityDetails::for_subject("science"),
//! );
//! ```

pub mod achievements;
mod events;
mod manager;
mod models;
mod recorder;
pub mod storage;
mod summary;

pub use events::{LevelUp, ProgressEvent};
pub use manager::ProgressManager;
pub use models::{
    ActivityDetails, ActivityKind, ActivityRecord, DailyActivity, ProgressState, Subject,
    SubjectProgress, Subjects, DAILY_ACTIVITY_RETENTION, MAX_SUBJECT_PROGRESS,
};
pub use recorder::{record_activity, ActivityRewards};
pub use storage::{KvStore, ProgressStore, StoreError};
pub use summary::{
    achievement_board, activity_calendar, overall_progress, recent_achievements,
    AchievementStatus, ProgressSummary, DEFAULT_CALENDAR_DAYS, RECENT_ACHIEVEMENTS,
};

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::{Config, StorageBackend};
use achievements::SystemClock;
use storage::{FileKv, MemoryKv, SqliteKv};

impl ProgressManager {
    /// Build a manager with the storage backend and day boundary from `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend: Box<dyn KvStore> = match config.storage.backend {
            StorageBackend::Sqlite => {
                let path = config.storage.sqlite_path();
                Box::new(SqliteKv::open(&path).with_context(|| {
                    format!("Failed to open progress db: {}", path.display())
                })?)
            }
            StorageBackend::File => Box::new(FileKv::new(config.storage.file_dir())),
            StorageBackend::Memory => Box::new(MemoryKv::new()),
        };

        let store = ProgressStore::new(backend, config.progress.key.clone());
        let clock = Arc::new(SystemClock::new(config.progress.day_boundary));
        Ok(Self::new(store, clock))
    }
}
