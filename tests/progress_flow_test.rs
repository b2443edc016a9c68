//! End-to-end tests for activity recording, streaks and achievements

mod common;

use common::{start_date, TestHarness};
use edustem::progress::{AchievementStatus, DAILY_ACTIVITY_RETENTION};
use edustem::{ActivityDetails, ActivityKind, ProgressEvent};

fn unlocked(events: &[ProgressEvent]) -> Vec<&'static str> {
    events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::AchievementUnlocked(a) => Some(a.id.as_str()),
            _ => None,
        })
        .collect()
}

fn watch(harness: &TestHarness, subject: &str) -> Vec<ProgressEvent> {
    harness
        .manager
        .record_activity(ActivityKind::VideoWatched, ActivityDetails::for_subject(subject))
}

#[test]
fn test_first_video_unlocks_first_achievement() {
    let harness = TestHarness::new();
    let events = watch(&harness, "science");

    let state = harness.manager.get_progress();
    assert_eq!(state.videos_watched, 1);
    assert_eq!(state.total_xp, 20);
    assert_eq!(state.current_level, 1);
    assert_eq!(state.unlocked_achievements, vec!["first_video".to_string()]);
    assert_eq!(unlocked(&events), vec!["first_video"]);
    assert!(!events.iter().any(|e| matches!(e, ProgressEvent::LevelUp(_))));
}

#[test]
fn test_streak_scenario_across_days() {
    let harness = TestHarness::new();

    watch(&harness, "science");
    assert_eq!(harness.manager.get_progress().current_streak, 1);

    watch(&harness, "science");
    assert_eq!(harness.manager.get_progress().current_streak, 1);

    harness.clock.advance_days(1);
    watch(&harness, "science");
    assert_eq!(harness.manager.get_progress().current_streak, 2);

    harness.clock.advance_days(2);
    watch(&harness, "science");
    let state = harness.manager.get_progress();
    assert_eq!(state.current_streak, 1);
    assert_eq!(
        state.last_active_date,
        start_date().checked_add_days(chrono::Days::new(3))
    );
}

#[test]
fn test_three_day_streak_unlocks_once() {
    let harness = TestHarness::new();
    let mut streak_unlocks = 0;

    for _ in 0..4 {
        let events = harness
            .manager
            .record_activity(ActivityKind::TimeSpent, ActivityDetails::default().with_minutes(10));
        streak_unlocks += unlocked(&events).iter().filter(|id| **id == "streak_3").count();
        harness.clock.advance_days(1);
    }

    let state = harness.manager.get_progress();
    assert_eq!(state.current_streak, 4);
    assert_eq!(state.time_spent, 40);
    assert_eq!(streak_unlocks, 1);
    assert_eq!(state.total_xp, 30);
}

#[test]
fn test_subject_progress_clamps_after_fifteen_games() {
    let harness = TestHarness::new();
    for _ in 0..15 {
        harness.manager.record_activity(
            ActivityKind::GamePlayed,
            ActivityDetails::for_subject("science"),
        );
    }

    let state = harness.manager.get_progress();
    assert_eq!(state.subjects.science.progress, 100);
    assert_eq!(state.games_played, 15);
    for id in ["first_game", "game_master", "science_explorer"] {
        assert!(state.is_unlocked(id), "{id} should be unlocked");
    }
}

#[test]
fn test_unlocked_set_never_shrinks() {
    let harness = TestHarness::new();
    let mut previous = 0;

    for day in 0..8 {
        watch(&harness, if day % 2 == 0 { "technology" } else { "engineering" });
        harness.manager.add_xp(15);
        let count = harness.manager.get_progress().unlocked_achievements.len();
        assert!(count >= previous);
        previous = count;
        harness.clock.advance_days(1);
    }

    assert!(harness.manager.check_achievements().is_empty());
    assert_eq!(harness.manager.get_progress().unlocked_achievements.len(), previous);
}

#[test]
fn test_stem_champion_after_mastering_all_subjects() {
    let harness = TestHarness::new();
    for subject in ["science", "mathematics", "technology", "engineering"] {
        for _ in 0..8 {
            harness
                .manager
                .record_activity(ActivityKind::GamePlayed, ActivityDetails::for_subject(subject));
        }
    }

    let state = harness.manager.get_progress();
    assert!(state.is_unlocked("stem_champion"));
    assert!(state.is_unlocked("knowledge_seeker"));
    assert_eq!(state.current_level, state.total_xp / 100 + 1);
}

#[test]
fn test_large_bonus_reports_single_level_up() {
    let harness = TestHarness::new();
    let events = harness.manager.add_xp(320);

    let level_ups: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::LevelUp(lu) => Some((lu.old_level, lu.new_level)),
            _ => None,
        })
        .collect();
    assert_eq!(level_ups, vec![(1, 4)]);
    assert_eq!(harness.manager.get_progress().current_level, 4);
}

#[test]
fn test_daily_activity_keeps_last_thirty_days() {
    let harness = TestHarness::new();
    for _ in 0..31 {
        harness
            .manager
            .record_activity(ActivityKind::TimeSpent, ActivityDetails::default());
        harness.clock.advance_days(1);
    }

    let state = harness.manager.get_progress();
    assert_eq!(state.daily_activity.len(), DAILY_ACTIVITY_RETENTION);
    assert_eq!(
        state.daily_activity[0].date,
        start_date().checked_add_days(chrono::Days::new(1)).unwrap()
    );
    assert_eq!(state.current_streak, 31);
    assert!(state.is_unlocked("streak_7"));
}

#[test]
fn test_export_import_round_trip() {
    let harness = TestHarness::new();
    watch(&harness, "mathematics");
    harness.clock.advance_days(1);
    harness.manager.record_activity(
        ActivityKind::GamePlayed,
        ActivityDetails::for_subject("technology").with_xp(45),
    );
    harness.manager.complete_content("fractions-101");

    let before = harness.manager.get_progress();
    let snapshot = harness.manager.export_progress().unwrap();

    harness.manager.reset_progress();
    assert_eq!(harness.manager.get_progress().total_xp, 0);

    harness.manager.import_progress(&snapshot).unwrap();
    assert_eq!(harness.manager.get_progress(), before);
    assert_eq!(harness.reopen().get_progress(), before);
}

#[test]
fn test_malformed_import_keeps_state() {
    let harness = TestHarness::new();
    watch(&harness, "science");
    let before = harness.manager.get_progress();

    assert!(harness.manager.import_progress("{\"totalXP\": \"lots\"").is_err());
    assert!(harness.manager.import_progress("not json at all").is_err());

    assert_eq!(harness.manager.get_progress(), before);
    assert_eq!(harness.reopen().get_progress(), before);
}

#[test]
fn test_reset_clears_storage() {
    let harness = TestHarness::new();
    watch(&harness, "science");
    harness.manager.reset_progress();

    let reopened = harness.reopen().get_progress();
    assert_eq!(reopened.total_xp, 0);
    assert!(reopened.unlocked_achievements.is_empty());
    assert_eq!(reopened.last_active_date, None);
}

#[test]
fn test_unavailable_storage_does_not_block_progress() {
    let harness = TestHarness::new();
    harness.kv.set_unavailable(true);

    let events = watch(&harness, "science");
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::PersistFailed { .. })));
    assert_eq!(harness.manager.get_progress().total_xp, 20);

    harness.kv.set_unavailable(false);
    watch(&harness, "science");
    assert_eq!(harness.reopen().get_progress().videos_watched, 2);
}

#[test]
fn test_summary_views() {
    let harness = TestHarness::new();
    watch(&harness, "science");
    harness
        .manager
        .record_activity(ActivityKind::GamePlayed, ActivityDetails::for_subject("mathematics"));

    let summary = harness.manager.summary();
    assert_eq!(summary.level.total_xp, 55);
    assert_eq!(summary.level.xp_to_next(), 45);
    assert_eq!(summary.overall_percent(), 4);
    let recent: Vec<&str> = summary
        .recent_achievements
        .iter()
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(recent, vec!["first_video", "first_game"]);

    let board: Vec<AchievementStatus> =
        edustem::progress::achievement_board(&harness.manager.get_progress());
    assert_eq!(board.iter().filter(|s| s.unlocked).count(), 2);
}
