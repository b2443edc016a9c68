//! Data models for learner progress
//!
//! `ProgressState` is persisted as a single JSON record. Field names follow the
//! stored layout (`totalXP`, `videosWatched`, ...), and every field defaults on
//! its own so records written by older versions still load.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::achievements::level_for_xp;

/// Maximum number of distinct days kept in `daily_activity`
pub const DAILY_ACTIVITY_RETENTION: usize = 30;

/// Upper bound for a subject's progress percentage
pub const MAX_SUBJECT_PROGRESS: u32 = 100;

/// One of the four tracked STEM subjects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Science,
    Mathematics,
    Technology,
    Engineering,
}

impl Subject {
    pub const ALL: [Subject; 4] = [
        Subject::Science,
        Subject::Mathematics,
        Subject::Technology,
        Subject::Engineering,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Science => "science",
            Self::Mathematics => "mathematics",
            Self::Technology => "technology",
            Self::Engineering => "engineering",
        }
    }

    /// Parse a subject identifier, `None` for anything outside the fixed set
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "science" => Some(Self::Science),
            "mathematics" => Some(Self::Mathematics),
            "technology" => Some(Self::Technology),
            "engineering" => Some(Self::Engineering),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Science => "Science",
            Self::Mathematics => "Mathematics",
            Self::Technology => "Technology",
            Self::Engineering => "Engineering",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress within a single subject
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectProgress {
    /// Percentage, 0..=100
    pub progress: u32,
    pub xp: u32,
}

impl SubjectProgress {
    /// Add progress and subject XP, clamping progress at 100
    pub fn advance(&mut self, amount: u32) {
        self.progress = self.progress.saturating_add(amount).min(MAX_SUBJECT_PROGRESS);
        self.xp = self.xp.saturating_add(amount);
    }
}

/// Per-subject progress for all four subjects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subjects {
    pub science: SubjectProgress,
    pub mathematics: SubjectProgress,
    pub technology: SubjectProgress,
    pub engineering: SubjectProgress,
}

impl Subjects {
    pub fn get(&self, subject: Subject) -> &SubjectProgress {
        match subject {
            Subject::Science => &self.science,
            Subject::Mathematics => &self.mathematics,
            Subject::Technology => &self.technology,
            Subject::Engineering => &self.engineering,
        }
    }

    pub fn get_mut(&mut self, subject: Subject) -> &mut SubjectProgress {
        match subject {
            Subject::Science => &mut self.science,
            Subject::Mathematics => &mut self.mathematics,
            Subject::Technology => &mut self.technology,
            Subject::Engineering => &mut self.engineering,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Subject, &SubjectProgress)> {
        Subject::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

/// Kind of recorded activity
///
/// Stored as its string name. Unrecognized names are kept verbatim in `Other`
/// so they still count for streak and daily bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    VideoWatched,
    GamePlayed,
    TimeSpent,
    Other(String),
}

impl ActivityKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::VideoWatched => "video_watched",
            Self::GamePlayed => "game_played",
            Self::TimeSpent => "time_spent",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ActivityKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "video_watched" => Self::VideoWatched,
            "game_played" => Self::GamePlayed,
            "time_spent" => Self::TimeSpent,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for ActivityKind {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional details accompanying an activity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityDetails {
    /// Subject identifier; unknown identifiers leave subject progress untouched
    pub subject: Option<String>,
    /// XP override for `game_played`
    pub xp: Option<u32>,
    /// Minutes for `time_spent`
    pub minutes: Option<u32>,
}

impl ActivityDetails {
    pub fn for_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            ..Self::default()
        }
    }

    pub fn with_xp(mut self, xp: u32) -> Self {
        self.xp = Some(xp);
        self
    }

    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.minutes = Some(minutes);
        self
    }
}

/// A single timestamped activity within a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub timestamp: DateTime<Utc>,
}

/// All activities recorded on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    #[serde(default)]
    pub activities: Vec<ActivityRecord>,
}

/// Complete persisted progress of one learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressState {
    #[serde(rename = "totalXP")]
    pub total_xp: u32,
    pub current_level: u32,
    pub videos_watched: u32,
    pub games_played: u32,
    /// Minutes
    pub time_spent: u32,
    pub current_streak: u32,
    pub last_active_date: Option<NaiveDate>,
    pub subjects: Subjects,
    pub daily_activity: Vec<DailyActivity>,
    pub completed_content: Vec<String>,
    pub unlocked_achievements: Vec<String>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            total_xp: 0,
            current_level: 1,
            videos_watched: 0,
            games_played: 0,
            time_spent: 0,
            current_streak: 0,
            last_active_date: None,
            subjects: Subjects::default(),
            daily_activity: Vec::new(),
            completed_content: Vec::new(),
            unlocked_achievements: Vec::new(),
        }
    }
}

impl ProgressState {
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked_achievements.iter().any(|u| u == id)
    }

    /// Append an activity to today's entry, evicting the oldest day past retention
    pub fn push_daily_activity(&mut self, date: NaiveDate, record: ActivityRecord) {
        match self.daily_activity.iter_mut().find(|d| d.date == date) {
            Some(day) => day.activities.push(record),
            None => self.daily_activity.push(DailyActivity {
                date,
                activities: vec![record],
            }),
        }

        if self.daily_activity.len() > DAILY_ACTIVITY_RETENTION {
            let excess = self.daily_activity.len() - DAILY_ACTIVITY_RETENTION;
            self.daily_activity.drain(..excess);
        }
    }

    /// Re-establish invariants on state that came from outside (storage, import).
    ///
    /// Level is re-derived from XP, subject progress clamped, duplicate dates
    /// folded into their first occurrence, retention applied, and duplicate ids
    /// removed from the id sets (first occurrence wins). A state that already
    /// satisfies the invariants is left unchanged.
    pub fn normalize(&mut self) {
        self.current_level = level_for_xp(self.total_xp);

        for subject in Subject::ALL {
            let entry = self.subjects.get_mut(subject);
            entry.progress = entry.progress.min(MAX_SUBJECT_PROGRESS);
        }

        let mut days: Vec<DailyActivity> = Vec::with_capacity(self.daily_activity.len());
        for day in self.daily_activity.drain(..) {
            match days.iter_mut().find(|d| d.date == day.date) {
                Some(existing) => existing.activities.extend(day.activities),
                None => days.push(day),
            }
        }
        if days.len() > DAILY_ACTIVITY_RETENTION {
            let excess = days.len() - DAILY_ACTIVITY_RETENTION;
            days.drain(..excess);
        }
        self.daily_activity = days;

        dedup_in_order(&mut self.completed_content);
        dedup_in_order(&mut self.unlocked_achievements);
    }
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
