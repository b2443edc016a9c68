//! Read-only views derived from progress state
//!
//! These back the dashboard displays: level bar, overall subject progress,
//! recent achievements, the achievement board and the activity calendar.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::achievements::{Achievement, LevelProgress, ACHIEVEMENTS};
use super::models::{ProgressState, Subject, SubjectProgress};

/// How many achievements count as "recent"
pub const RECENT_ACHIEVEMENTS: usize = 3;

/// Default span of the activity calendar
pub const DEFAULT_CALENDAR_DAYS: u32 = 14;

/// Dashboard summary of a learner's progress
#[derive(Debug, Clone)]
pub struct ProgressSummary {
    pub level: LevelProgress,
    pub videos_watched: u32,
    pub games_played: u32,
    pub time_spent: u32,
    pub current_streak: u32,
    pub subjects: Vec<(Subject, SubjectProgress)>,
    /// Mean of the four subject percentages
    pub overall_progress: f32,
    pub unlocked_count: usize,
    pub recent_achievements: Vec<&'static Achievement>,
}

impl ProgressSummary {
    pub fn new(state: &ProgressState) -> Self {
        Self {
            level: LevelProgress::new(state.total_xp),
            videos_watched: state.videos_watched,
            games_played: state.games_played,
            time_spent: state.time_spent,
            current_streak: state.current_streak,
            subjects: state.subjects.iter().map(|(s, sp)| (s, *sp)).collect(),
            overall_progress: overall_progress(state),
            unlocked_count: state.unlocked_achievements.len(),
            recent_achievements: recent_achievements(state),
        }
    }

    /// Overall progress rounded to a whole percentage
    pub fn overall_percent(&self) -> u32 {
        self.overall_progress.round() as u32
    }
}

pub fn overall_progress(state: &ProgressState) -> f32 {
    let total: u32 = state.subjects.iter().map(|(_, sp)| sp.progress).sum();
    total as f32 / Subject::ALL.len() as f32
}

/// Last few unlocked achievements, oldest first.
///
/// Ids that are not in the catalog (e.g. from a newer version) are skipped.
pub fn recent_achievements(state: &ProgressState) -> Vec<&'static Achievement> {
    let known: Vec<&'static Achievement> = state
        .unlocked_achievements
        .iter()
        .filter_map(|id| Achievement::find(id))
        .collect();
    let skip = known.len().saturating_sub(RECENT_ACHIEVEMENTS);
    known.into_iter().skip(skip).collect()
}

/// One row of the achievement board
#[derive(Debug, Clone, Serialize)]
pub struct AchievementStatus {
    pub achievement: &'static Achievement,
    pub unlocked: bool,
    pub current: u32,
    pub target: u32,
}

/// Every catalog achievement with its unlock state and progress
pub fn achievement_board(state: &ProgressState) -> Vec<AchievementStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|achievement| {
            let unlocked = state.is_unlocked(achievement.id.as_str());
            let (current, target) = achievement.rule.progress(state);
            AchievementStatus {
                achievement,
                unlocked,
                current: if unlocked { target } else { current },
                target,
            }
        })
        .collect()
}

/// Whether each of the last `days` days (ending `today`, oldest first) had activity
pub fn activity_calendar(
    state: &ProgressState,
    today: NaiveDate,
    days: u32,
) -> Vec<(NaiveDate, bool)> {
    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset as u64)))
        .map(|date| {
            let active = state.daily_activity.iter().any(|d| d.date == date);
            (date, active)
        })
        .collect()
}
