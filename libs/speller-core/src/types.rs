//! Core types for the spelling practice application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Difficulty tier a word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Tier1,
    Tier2,
    Tier3,
    Custom,
}

impl Level {
    /// All levels in display order.
    pub const ALL: [Level; 4] = [Self::Tier1, Self::Tier2, Self::Tier3, Self::Custom];

    /// Get the level name as stored and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tier1 => "tier1",
            Self::Tier2 => "tier2",
            Self::Tier3 => "tier3",
            Self::Custom => "custom",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "tier1" => Some(Self::Tier1),
            "tier2" => Some(Self::Tier2),
            "tier3" => Some(Self::Tier3),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    /// Learner-facing title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Tier1 => "One Bee",
            Self::Tier2 => "Two Bee",
            Self::Tier3 => "Three Bee",
            Self::Custom => "Custom",
        }
    }
}

/// Learning status of a word for one learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    New,
    Trouble,
    Mastered,
}

impl Default for ProgressStatus {
    fn default() -> Self {
        Self::New
    }
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Trouble => "trouble",
            Self::Mastered => "mastered",
        }
    }

    /// Parse from string. Unknown values are treated as `new`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "trouble" => Self::Trouble,
            "mastered" => Self::Mastered,
            _ => Self::New,
        }
    }
}

/// Result of a single practice attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The learner spelled the word incorrectly.
    Trouble,
    /// The learner confirmed they know the word.
    Mastered,
}

impl Outcome {
    /// Status a record ends up in after this outcome.
    pub fn status(self) -> ProgressStatus {
        match self {
            Self::Trouble => ProgressStatus::Trouble,
            Self::Mastered => ProgressStatus::Mastered,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.status().as_str()
    }
}

/// Word in the catalog.
///
/// System words have no owner; custom words are scoped to the guardian who
/// added them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: Uuid,
    pub text: String,
    pub level: Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint_sentence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Uuid>,
}

impl Word {
    /// Whether this word is visible in the given owner scope.
    pub fn visible_to(&self, owner: Option<Uuid>) -> bool {
        self.owner_id.is_none() || self.owner_id == owner
    }
}

/// Word to be added to the catalog (no ID yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWord {
    pub text: String,
    pub level: Level,
    pub hint_sentence: Option<String>,
    pub owner_id: Option<Uuid>,
}

/// Progress of one learner on one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: Uuid,
    pub learner_id: Uuid,
    pub word_id: Uuid,
    pub status: ProgressStatus,
    pub attempts: u32,
    pub last_practiced_at: DateTime<Utc>,
}

/// Word joined with the learner's progress, ready for ranking and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyItem {
    pub word_id: Uuid,
    pub text: String,
    pub level: Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint_sentence: Option<String>,
    pub status: ProgressStatus,
    pub attempts: u32,
    /// `None` when the word was never practiced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_practiced_at: Option<DateTime<Utc>>,
}

impl StudyItem {
    /// Join a word with its (optional) progress record.
    pub fn from_parts(word: &Word, progress: Option<&ProgressRecord>) -> Self {
        Self {
            word_id: word.id,
            text: word.text.clone(),
            level: word.level,
            hint_sentence: word.hint_sentence.clone(),
            status: progress.map(|p| p.status).unwrap_or_default(),
            attempts: progress.map(|p| p.attempts).unwrap_or(0),
            last_practiced_at: progress.map(|p| p.last_practiced_at),
        }
    }
}

/// Entry of a catalog seeding batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedWord {
    pub text: String,
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_sentence: Option<String>,
}

/// Outcome of a catalog seeding batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    /// Words inserted plus existing words that received a hint.
    pub inserted: usize,
    pub skipped: usize,
}
