//! Activity recorder - turns learner activity into progress changes
//!
//! `record_activity` is a pure transition: the caller supplies the state and
//! the current time, and persists the result.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use super::achievements::{check_achievements, grant_xp, update_streak};
use super::events::ProgressEvent;
use super::models::{ActivityDetails, ActivityKind, ActivityRecord, ProgressState, Subject};

/// XP rewards and subject increments for activities
pub struct ActivityRewards;

impl ActivityRewards {
    pub const VIDEO_XP: u32 = 10;
    pub const VIDEO_SUBJECT_PROGRESS: u32 = 5;
    pub const GAME_XP: u32 = 20;
    pub const GAME_SUBJECT_PROGRESS: u32 = 10;
    pub const DEFAULT_MINUTES: u32 = 1;
}

/// Apply one activity to `state`.
///
/// Type-specific changes first (counters, subject progress, XP), then the
/// streak and daily log for `today`, then a single achievement pass.
pub fn record_activity(
    state: &mut ProgressState,
    kind: &ActivityKind,
    details: &ActivityDetails,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Vec<ProgressEvent> {
    let mut events = Vec::new();

    match kind {
        ActivityKind::VideoWatched => {
            state.videos_watched = state.videos_watched.saturating_add(1);
            advance_subject(state, details, ActivityRewards::VIDEO_SUBJECT_PROGRESS);
            events.extend(grant_xp(state, ActivityRewards::VIDEO_XP));
        }
        ActivityKind::GamePlayed => {
            state.games_played = state.games_played.saturating_add(1);
            advance_subject(state, details, ActivityRewards::GAME_SUBJECT_PROGRESS);
            let xp = details.xp.unwrap_or(ActivityRewards::GAME_XP);
            events.extend(grant_xp(state, xp));
        }
        ActivityKind::TimeSpent => {
            let minutes = details.minutes.unwrap_or(ActivityRewards::DEFAULT_MINUTES);
            state.time_spent = state.time_spent.saturating_add(minutes);
        }
        ActivityKind::Other(name) => {
            debug!(activity = %name, "Unknown activity type, bookkeeping only");
        }
    }

    events.extend(update_streak(state, today));
    state.push_daily_activity(
        today,
        ActivityRecord {
            kind: kind.clone(),
            timestamp: now,
        },
    );

    events.extend(check_achievements(state));
    events
}

fn advance_subject(state: &mut ProgressState, details: &ActivityDetails, amount: u32) {
    let Some(name) = details.subject.as_deref() else {
        return;
    };
    match Subject::from_str(name) {
        Some(subject) => state.subjects.get_mut(subject).advance(amount),
        None => debug!(subject = name, "Unknown subject, skipping subject progress"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    fn now() -> DateTime<Utc> {
        today().and_hms_opt(9, 30, 0).unwrap().and_utc()
    }

    fn record(
        state: &mut ProgressState,
        kind: ActivityKind,
        details: ActivityDetails,
    ) -> Vec<ProgressEvent> {
        record_activity(state, &kind, &details, today(), now())
    }

    #[test]
    fn test_first_video_end_to_end() {
        let mut state = ProgressState::default();
        let events = record(
            &mut state,
            ActivityKind::VideoWatched,
            ActivityDetails::for_subject("science"),
        );

        assert_eq!(state.videos_watched, 1);
        assert_eq!(state.subjects.science.progress, 5);
        assert_eq!(state.subjects.science.xp, 5);
        assert!(state.is_unlocked("first_video"));
        assert_eq!(state.total_xp, 20);
        assert_eq!(state.current_level, 1);
        assert_eq!(state.current_streak, 1);

        assert_eq!(
            events[0],
            ProgressEvent::XpGained {
                amount: 10,
                total_xp: 10
            }
        );
        assert!(events.contains(&ProgressEvent::StreakUpdated { count: 1 }));
    }

    #[test]
    fn test_game_uses_xp_override() {
        let mut state = ProgressState::default();
        record(
            &mut state,
            ActivityKind::GamePlayed,
            ActivityDetails::for_subject("mathematics").with_xp(35),
        );
        assert_eq!(state.games_played, 1);
        assert_eq!(state.subjects.mathematics.progress, 10);
        // 35 from the game, 15 from first_game
        assert_eq!(state.total_xp, 50);
    }

    #[test]
    fn test_game_default_xp() {
        let mut state = ProgressState::default();
        record(&mut state, ActivityKind::GamePlayed, ActivityDetails::default());
        assert_eq!(state.total_xp, 20 + 15);
    }

    #[test]
    fn test_fifteen_games_clamp_subject() {
        let mut state = ProgressState::default();
        for _ in 0..15 {
            record(
                &mut state,
                ActivityKind::GamePlayed,
                ActivityDetails::for_subject("science"),
            );
        }
        assert_eq!(state.subjects.science.progress, 100);
        assert_eq!(state.subjects.science.xp, 150);
        assert!(state.is_unlocked("science_explorer"));
    }

    #[test]
    fn test_unknown_subject_still_grants_xp() {
        let mut state = ProgressState::default();
        record(
            &mut state,
            ActivityKind::VideoWatched,
            ActivityDetails::for_subject("history"),
        );
        assert_eq!(state.total_xp, 20);
        assert!(state.subjects.iter().all(|(_, sp)| sp.progress == 0));
    }

    #[test]
    fn test_time_spent() {
        let mut state = ProgressState::default();
        record(&mut state, ActivityKind::TimeSpent, ActivityDetails::default());
        record(
            &mut state,
            ActivityKind::TimeSpent,
            ActivityDetails::default().with_minutes(25),
        );
        assert_eq!(state.time_spent, 26);
        assert_eq!(state.total_xp, 0);
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.daily_activity[0].activities.len(), 2);
    }

    #[test]
    fn test_unknown_activity_only_does_bookkeeping() {
        let mut state = ProgressState::default();
        let events = record(
            &mut state,
            ActivityKind::from("quiz_taken"),
            ActivityDetails::for_subject("science").with_xp(100),
        );
        assert_eq!(events, vec![ProgressEvent::StreakUpdated { count: 1 }]);
        assert_eq!(state.total_xp, 0);
        assert_eq!(state.last_active_date, Some(today()));
        assert_eq!(
            state.daily_activity[0].activities[0].kind,
            ActivityKind::Other("quiz_taken".to_string())
        );
    }
}
