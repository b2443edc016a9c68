//! Shared test utilities for progress integration tests

use std::sync::Arc;

use chrono::NaiveDate;
use edustem::progress::achievements::FixedClock;
use edustem::progress::storage::{MemoryKv, DEFAULT_PROGRESS_KEY};
use edustem::progress::ProgressStore;
use edustem::ProgressManager;

/// First day used by scenario tests
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 2).expect("valid date")
}

/// Manager over a shared in-memory store, driven by a manual clock
pub struct TestHarness {
    pub kv: MemoryKv,
    pub clock: Arc<FixedClock>,
    pub manager: ProgressManager,
}

impl TestHarness {
    pub fn new() -> Self {
        let kv = MemoryKv::new();
        let clock = Arc::new(FixedClock::on(start_date()));
        let manager = Self::manager_for(&kv, &clock);
        Self { kv, clock, manager }
    }

    /// A second manager reading the same storage, as a new session would
    pub fn reopen(&self) -> ProgressManager {
        Self::manager_for(&self.kv, &self.clock)
    }

    fn manager_for(kv: &MemoryKv, clock: &Arc<FixedClock>) -> ProgressManager {
        let store = ProgressStore::new(Box::new(kv.clone()), DEFAULT_PROGRESS_KEY);
        ProgressManager::new(store, clock.clone())
    }
}
