//! XP and Level system
//!
//! Levels are flat 100 XP bands: level 1 covers 0-99 XP, level 2 covers
//! 100-199, and so on.

use tracing::info;

use crate::progress::events::{LevelUp, ProgressEvent};
use crate::progress::models::ProgressState;

/// XP needed per level
pub const XP_PER_LEVEL: u32 = 100;

/// Calculate level for given XP
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// Add XP, recompute the level and report what happened.
///
/// Emits one `XpGained`, followed by a single `LevelUp` carrying the final
/// level when one or more level boundaries were crossed.
pub fn grant_xp(state: &mut ProgressState, amount: u32) -> Vec<ProgressEvent> {
    let old_level = state.current_level;
    state.total_xp = state.total_xp.saturating_add(amount);
    state.current_level = level_for_xp(state.total_xp);

    let mut events = vec![ProgressEvent::XpGained {
        amount,
        total_xp: state.total_xp,
    }];

    if state.current_level > old_level {
        info!(old_level, new_level = state.current_level, "Level up");
        events.push(ProgressEvent::LevelUp(LevelUp {
            old_level,
            new_level: state.current_level,
        }));
    }

    events
}

/// Level position derived from total XP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub total_xp: u32,
    pub level: u32,
    /// XP at which the current level starts
    pub current_level_xp: u32,
    /// XP at which the next level starts
    pub next_level_xp: u32,
}

impl LevelProgress {
    pub fn new(total_xp: u32) -> Self {
        let level = level_for_xp(total_xp);
        let current_level_xp = (level - 1) * XP_PER_LEVEL;
        Self {
            total_xp,
            level,
            current_level_xp,
            next_level_xp: current_level_xp.saturating_add(XP_PER_LEVEL),
        }
    }

    /// XP still needed to reach the next level
    pub fn xp_to_next(&self) -> u32 {
        self.next_level_xp.saturating_sub(self.total_xp)
    }

    /// Calculate progress percentage to next level (0.0 - 1.0)
    pub fn progress_to_next(&self) -> f32 {
        let xp_in_level = self.total_xp - self.current_level_xp;
        xp_in_level as f32 / XP_PER_LEVEL as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_xp() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(250), 3);
        assert_eq!(level_for_xp(999), 10);
    }

    #[test]
    fn test_grant_without_level_up() {
        let mut state = ProgressState::default();
        let events = grant_xp(&mut state, 99);
        assert_eq!(state.current_level, 1);
        assert_eq!(
            events,
            vec![ProgressEvent::XpGained {
                amount: 99,
                total_xp: 99
            }]
        );
    }

    #[test]
    fn test_multi_tier_grant_fires_one_level_up() {
        let mut state = ProgressState::default();
        let events = grant_xp(&mut state, 250);
        assert_eq!(state.current_level, 3);
        let level_ups: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::LevelUp(lu) => Some(lu.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            level_ups,
            vec![LevelUp {
                old_level: 1,
                new_level: 3
            }]
        );
    }

    #[test]
    fn test_zero_grant() {
        let mut state = ProgressState::default();
        let events = grant_xp(&mut state, 0);
        assert_eq!(state.total_xp, 0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_level_progress() {
        let progress = LevelProgress::new(175);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.current_level_xp, 100);
        assert_eq!(progress.next_level_xp, 200);
        assert_eq!(progress.xp_to_next(), 25);
        assert!((progress.progress_to_next() - 0.75).abs() < 0.001);
    }
}
