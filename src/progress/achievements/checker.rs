//! Achievement checking logic

use tracing::info;

use super::definitions::ACHIEVEMENTS;
use super::levels::grant_xp;
use crate::progress::events::ProgressEvent;
use crate::progress::models::ProgressState;

/// Unlock every achievement whose rule now holds.
///
/// One pass in catalog order. Each unlock records the id and grants its reward
/// straight away, so later entries in the same pass (e.g. `knowledge_seeker`)
/// see XP granted by earlier ones. Already unlocked achievements are skipped and
/// never revoked.
pub fn check_achievements(state: &mut ProgressState) -> Vec<ProgressEvent> {
    let mut events = Vec::new();

    for achievement in ACHIEVEMENTS {
        let id = achievement.id.as_str();
        if state.is_unlocked(id) || !achievement.rule.is_satisfied(state) {
            continue;
        }

        state.unlocked_achievements.push(id.to_string());
        info!(achievement = id, xp = achievement.xp_reward, "Achievement unlocked");

        events.push(ProgressEvent::AchievementUnlocked(achievement));
        events.extend(grant_xp(state, achievement.xp_reward));
    }

    events
}
