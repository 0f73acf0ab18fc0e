//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use uuid::Uuid;

// Re-export shared types from speller-core
pub use speller_core::types::{
    Level, Outcome, ProgressRecord, ProgressStatus, SeedReport, SeedWord, StudyItem, Word,
};
pub use speller_core::GuessResult;

// === Database Entity Types ===

/// Guardian account (parent or teacher)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Guardian {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Learner practicing spelling, owned by a guardian
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Learner {
    pub id: Uuid,
    pub guardian_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Word stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWord {
    pub id: Uuid,
    pub text: String,
    pub level: String,
    pub hint_sentence: Option<String>,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl DbWord {
    /// Convert to speller-core Word.
    ///
    /// Rows with an unknown level are dropped.
    pub fn to_core_word(&self) -> Option<Word> {
        Some(Word {
            id: self.id,
            text: self.text.clone(),
            level: Level::from_str(&self.level)?,
            hint_sentence: self.hint_sentence.clone(),
            owner_id: self.owner_id,
        })
    }
}

/// Progress record in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProgress {
    pub id: Uuid,
    pub learner_id: Uuid,
    pub word_id: Uuid,
    pub status: String,
    pub attempts: i32,
    pub last_practiced_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbProgress {
    /// Convert to speller-core ProgressRecord
    pub fn to_core_record(&self) -> ProgressRecord {
        ProgressRecord {
            id: self.id,
            learner_id: self.learner_id,
            word_id: self.word_id,
            status: ProgressStatus::from_str_lossy(&self.status),
            attempts: self.attempts.max(0) as u32,
            last_practiced_at: self.last_practiced_at,
        }
    }
}

/// Guardian settings in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSettings {
    pub guardian_id: Uuid,
    pub voice_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbSettings {
    /// Convert to API settings
    pub fn to_api_settings(&self) -> SettingsResponse {
        SettingsResponse {
            voice_id: self.voice_id.clone(),
        }
    }
}

// === API Request/Response Types ===

// Guardian types
#[derive(Debug, Serialize, Deserialize)]
pub struct GuardianRegisterRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GuardianRegisterResponse {
    pub guardian_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GuardianStatusResponse {
    pub guardian_id: Uuid,
    pub last_seen_at: DateTime<Utc>,
}

// Learner types
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLearnerRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearnerListResponse {
    pub learners: Vec<Learner>,
}

// Study types
#[derive(Debug, Serialize, Deserialize)]
pub struct StudyQueueQuery {
    pub level: String,
    pub learner_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudyQueueResponse {
    pub items: Vec<StudyItem>,
    pub remaining: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckGuessRequest {
    pub guess: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitOutcomeRequest {
    pub learner_id: Uuid,
    pub word_id: Uuid,
    pub outcome: Outcome,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitOutcomeResponse {
    pub progress: ProgressRecord,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NextItemQuery {
    pub level: String,
    pub learner_id: Uuid,
    pub current_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NextItemResponse {
    pub next_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MasteredQuery {
    pub level: Level,
    pub learner_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MasteredResponse {
    pub level: Level,
    pub mastered: usize,
}

// Word types
#[derive(Debug, Serialize, Deserialize)]
pub struct SeedWordsRequest {
    pub words: Vec<SeedWord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddCustomWordRequest {
    pub text: String,
    pub level: Option<Level>,
    pub hint_sentence: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordListResponse {
    pub words: Vec<Word>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordCountsResponse {
    pub counts: BTreeMap<Level, usize>,
}

// Settings types
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub voice_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateVoiceRequest {
    pub voice_id: Option<String>,
}
