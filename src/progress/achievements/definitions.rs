//! Achievement definitions and metadata
//!
//! All achievements are defined here with their unlock rules and rewards.
//! Rules are plain data so the catalog can be listed, serialized and tested
//! without running any code.

use serde::Serialize;

use crate::progress::models::{ProgressState, Subject};

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstVideo,
    VideoEnthusiast,
    FirstGame,
    GameMaster,
    #[serde(rename = "streak_3")]
    Streak3,
    #[serde(rename = "streak_7")]
    Streak7,
    ScienceExplorer,
    MathGenius,
    TechSavvy,
    EngineerMind,
    StemChampion,
    KnowledgeSeeker,
}

impl AchievementId {
    /// Get the string ID for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstVideo => "first_video",
            Self::VideoEnthusiast => "video_enthusiast",
            Self::FirstGame => "first_game",
            Self::GameMaster => "game_master",
            Self::Streak3 => "streak_3",
            Self::Streak7 => "streak_7",
            Self::ScienceExplorer => "science_explorer",
            Self::MathGenius => "math_genius",
            Self::TechSavvy => "tech_savvy",
            Self::EngineerMind => "engineer_mind",
            Self::StemChampion => "stem_champion",
            Self::KnowledgeSeeker => "knowledge_seeker",
        }
    }

    /// Parse from storage string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_video" => Some(Self::FirstVideo),
            "video_enthusiast" => Some(Self::VideoEnthusiast),
            "first_game" => Some(Self::FirstGame),
            "game_master" => Some(Self::GameMaster),
            "streak_3" => Some(Self::Streak3),
            "streak_7" => Some(Self::Streak7),
            "science_explorer" => Some(Self::ScienceExplorer),
            "math_genius" => Some(Self::MathGenius),
            "tech_savvy" => Some(Self::TechSavvy),
            "engineer_mind" => Some(Self::EngineerMind),
            "stem_champion" => Some(Self::StemChampion),
            "knowledge_seeker" => Some(Self::KnowledgeSeeker),
            _ => None,
        }
    }
}

/// A numeric quantity read from progress state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "metric", content = "subject")]
pub enum Metric {
    VideosWatched,
    GamesPlayed,
    CurrentStreak,
    TotalXp,
    SubjectProgress(Subject),
}

impl Metric {
    pub fn value(&self, state: &ProgressState) -> u32 {
        match self {
            Self::VideosWatched => state.videos_watched,
            Self::GamesPlayed => state.games_played,
            Self::CurrentStreak => state.current_streak,
            Self::TotalXp => state.total_xp,
            Self::SubjectProgress(subject) => state.subjects.get(*subject).progress,
        }
    }
}

/// Unlock condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum Rule {
    /// `metric >= threshold`
    AtLeast { metric: Metric, threshold: u32 },
    /// Every subject's progress `>= threshold`
    AllSubjectsAtLeast { threshold: u32 },
}

impl Rule {
    pub fn is_satisfied(&self, state: &ProgressState) -> bool {
        match self {
            Self::AtLeast { metric, threshold } => metric.value(state) >= *threshold,
            Self::AllSubjectsAtLeast { threshold } => state
                .subjects
                .iter()
                .all(|(_, sp)| sp.progress >= *threshold),
        }
    }

    /// Current value and target, for progress display.
    ///
    /// For `AllSubjectsAtLeast` this counts subjects that already meet the
    /// threshold out of four.
    pub fn progress(&self, state: &ProgressState) -> (u32, u32) {
        match self {
            Self::AtLeast { metric, threshold } => {
                (metric.value(state).min(*threshold), *threshold)
            }
            Self::AllSubjectsAtLeast { threshold } => {
                let done = state
                    .subjects
                    .iter()
                    .filter(|(_, sp)| sp.progress >= *threshold)
                    .count() as u32;
                (done, Subject::ALL.len() as u32)
            }
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub xp_reward: u32,
    pub rule: Rule,
}

const fn at_least(metric: Metric, threshold: u32) -> Rule {
    Rule::AtLeast { metric, threshold }
}

/// All achievement definitions, in evaluation order
pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: AchievementId::FirstVideo,
        name: "Video Watcher",
        description: "Watch your first STEM video",
        icon: "🎬",
        xp_reward: 10,
        rule: at_least(Metric::VideosWatched, 1),
    },
    Achievement {
        id: AchievementId::VideoEnthusiast,
        name: "Video Enthusiast",
        description: "Watch 10 STEM videos",
        icon: "📺",
        xp_reward: 50,
        rule: at_least(Metric::VideosWatched, 10),
    },
    Achievement {
        id: AchievementId::FirstGame,
        name: "Game Starter",
        description: "Play your first learning game",
        icon: "🎮",
        xp_reward: 15,
        rule: at_least(Metric::GamesPlayed, 1),
    },
    Achievement {
        id: AchievementId::GameMaster,
        name: "Gamemaster",
        description: "Complete 10 learning games",
        icon: "🎯",
        xp_reward: 100,
        rule: at_least(Metric::GamesPlayed, 10),
    },
    Achievement {
        id: AchievementId::Streak3,
        name: "3-Day Streak",
        description: "Learn for 3 consecutive days",
        icon: "🔥",
        xp_reward: 30,
        rule: at_least(Metric::CurrentStreak, 3),
    },
    Achievement {
        id: AchievementId::Streak7,
        name: "Week Warrior",
        description: "Learn for 7 consecutive days",
        icon: "🗓️",
        xp_reward: 70,
        rule: at_least(Metric::CurrentStreak, 7),
    },
    Achievement {
        id: AchievementId::ScienceExplorer,
        name: "Science Explorer",
        description: "Complete 50% of science content",
        icon: "🔬",
        xp_reward: 75,
        rule: at_least(Metric::SubjectProgress(Subject::Science), 50),
    },
    Achievement {
        id: AchievementId::MathGenius,
        name: "Math Genius",
        description: "Complete 50% of mathematics content",
        icon: "🧮",
        xp_reward: 75,
        rule: at_least(Metric::SubjectProgress(Subject::Mathematics), 50),
    },
    Achievement {
        id: AchievementId::TechSavvy,
        name: "Tech Savvy",
        description: "Complete 50% of technology content",
        icon: "💻",
        xp_reward: 75,
        rule: at_least(Metric::SubjectProgress(Subject::Technology), 50),
    },
    Achievement {
        id: AchievementId::EngineerMind,
        name: "Engineering Mind",
        description: "Complete 50% of engineering content",
        icon: "⚙️",
        xp_reward: 75,
        rule: at_least(Metric::SubjectProgress(Subject::Engineering), 50),
    },
    Achievement {
        id: AchievementId::StemChampion,
        name: "STEM Champion",
        description: "Master all four STEM subjects",
        icon: "🏆",
        xp_reward: 200,
        rule: Rule::AllSubjectsAtLeast { threshold: 75 },
    },
    Achievement {
        id: AchievementId::KnowledgeSeeker,
        name: "Knowledge Seeker",
        description: "Earn 500 XP",
        icon: "📚",
        xp_reward: 50,
        rule: at_least(Metric::TotalXp, 500),
    },
];

impl Achievement {
    /// Look up a definition by id; the catalog is laid out in variant order
    pub fn get(id: AchievementId) -> &'static Achievement {
        &ACHIEVEMENTS[id as usize]
    }

    /// Look up a definition by its stored string id
    pub fn find(id: &str) -> Option<&'static Achievement> {
        AchievementId::from_str(id).map(Self::get)
    }
}
