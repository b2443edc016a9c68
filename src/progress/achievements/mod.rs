//! Gamification system: Achievements, XP, Levels and Streaks
//!
//! Pure state transitions over `ProgressState`. Nothing in here touches
//! storage; each function mutates the state it is given and returns the events
//! it produced.

mod checker;
mod definitions;
mod levels;
mod streaks;

pub use checker::check_achievements;
pub use definitions::{Achievement, AchievementId, Metric, Rule, ACHIEVEMENTS};
pub use levels::{grant_xp, level_for_xp, LevelProgress, XP_PER_LEVEL};
pub use streaks::{update_streak, Clock, DayBoundary, FixedClock, SystemClock};
