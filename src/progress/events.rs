//! Events emitted by progress transitions
//!
//! Transitions return these instead of touching presentation; the caller (or a
//! listener registered on the manager) decides how to show them.

use super::achievements::Achievement;

/// A level up event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
}

/// Events that can happen while progress is updated
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    XpGained { amount: u32, total_xp: u32 },
    LevelUp(LevelUp),
    AchievementUnlocked(&'static Achievement),
    StreakUpdated { count: u32 },
    /// The in-memory change stands but could not be written to storage
    PersistFailed { reason: String },
}

impl ProgressEvent {
    /// Short human-readable line, used by the CLI
    pub fn describe(&self) -> String {
        match self {
            Self::XpGained { amount, .. } => format!("+{} XP", amount),
            Self::LevelUp(lu) => format!("Level up! Level {}", lu.new_level),
            Self::AchievementUnlocked(a) => format!(
                "{} Achievement unlocked: {} - {} (+{} XP)",
                a.icon, a.name, a.description, a.xp_reward
            ),
            Self::StreakUpdated { count } => format!("Streak: {} day(s)", count),
            Self::PersistFailed { reason } => format!("Progress not saved: {}", reason),
        }
    }
}
