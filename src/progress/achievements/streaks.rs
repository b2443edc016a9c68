//! Streak tracking system
//!
//! Tracks consecutive days with at least one recorded activity, plus the
//! `Clock` that decides what "today" is.

use std::sync::Mutex;

use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::progress::events::ProgressEvent;
use crate::progress::models::ProgressState;

/// Which clock boundary separates one calendar day from the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// Midnight in the machine's local time zone
    #[default]
    Local,
    Utc,
}

/// Source of the current instant and calendar day
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
    fn today(&self) -> NaiveDate;
}

/// Wall clock with a configurable day boundary
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    boundary: DayBoundary,
}

impl SystemClock {
    pub fn new(boundary: DayBoundary) -> Self {
        Self { boundary }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        match self.boundary {
            DayBoundary::Local => Local::now().date_naive(),
            DayBoundary::Utc => Utc::now().date_naive(),
        }
    }
}

/// Manually driven clock; days follow UTC
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock set to noon UTC on the given date
    pub fn on(date: NaiveDate) -> Self {
        match date.and_hms_opt(12, 0, 0) {
            Some(noon) => Self::new(noon.and_utc()),
            None => Self::new(Utc::now()),
        }
    }

    pub fn advance_days(&self, days: u64) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = now.checked_add_days(Days::new(days)) {
            *now = next;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Update the daily streak for activity on `today`.
///
/// Returns `StreakUpdated` when this is the first activity of the day; a
/// second activity on the same day leaves the streak alone and emits nothing.
pub fn update_streak(state: &mut ProgressState, today: NaiveDate) -> Option<ProgressEvent> {
    let yesterday = today.pred_opt();

    let event = match state.last_active_date {
        Some(last) if last == today => None,
        Some(last) if Some(last) == yesterday => {
            state.current_streak = state.current_streak.saturating_add(1);
            Some(state.current_streak)
        }
        // First activity ever, a gap of more than a day, or a clock that went backwards
        _ => {
            state.current_streak = 1;
            Some(1)
        }
    };

    state.last_active_date = Some(today);

    event.map(|count| {
        debug!(count, %today, "Streak updated");
        ProgressEvent::StreakUpdated { count }
    })
}
