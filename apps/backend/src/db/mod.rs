//! PostgreSQL database operations

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use uuid::Uuid;

use speller_core::progress::initial_attempts;
use speller_core::store::{ProgressStore, WordCatalog};
use speller_core::types::NewWord;
use speller_core::{Result as StoreResult, StoreError};

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a pool that only connects on first use
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Database(e.into()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Guardian Repository ===

    /// Create a new guardian with generated token
    pub async fn create_guardian(&self, name: Option<&str>) -> Result<Guardian> {
        let token = Uuid::new_v4().to_string();
        let guardian = sqlx::query_as::<_, Guardian>(
            r#"
            INSERT INTO guardians (id, token, name)
            VALUES ($1, $2, $3)
            RETURNING id, token, name, created_at, last_seen_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&token)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(guardian)
    }

    /// Get guardian by token
    pub async fn get_guardian_by_token(&self, token: &str) -> Result<Option<Guardian>> {
        let guardian = sqlx::query_as::<_, Guardian>(
            r#"
            SELECT id, token, name, created_at, last_seen_at
            FROM guardians
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(guardian)
    }

    /// Update guardian last_seen_at timestamp
    pub async fn update_last_seen(&self, guardian_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE guardians
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(guardian_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Learner Repository ===

    /// Create a learner for a guardian
    pub async fn create_learner(&self, guardian_id: Uuid, name: &str) -> Result<Learner> {
        let learner = sqlx::query_as::<_, Learner>(
            r#"
            INSERT INTO learners (id, guardian_id, name)
            VALUES ($1, $2, $3)
            RETURNING id, guardian_id, name, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(guardian_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(learner)
    }

    /// Get a learner, only if it belongs to the guardian
    pub async fn get_learner(&self, guardian_id: Uuid, learner_id: Uuid) -> Result<Option<Learner>> {
        let learner = sqlx::query_as::<_, Learner>(
            r#"
            SELECT id, guardian_id, name, created_at
            FROM learners
            WHERE id = $1 AND guardian_id = $2
            "#,
        )
        .bind(learner_id)
        .bind(guardian_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(learner)
    }

    /// List a guardian's learners
    pub async fn list_learners(&self, guardian_id: Uuid) -> Result<Vec<Learner>> {
        let learners = sqlx::query_as::<_, Learner>(
            r#"
            SELECT id, guardian_id, name, created_at
            FROM learners
            WHERE guardian_id = $1
            ORDER BY created_at, name
            "#,
        )
        .bind(guardian_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(learners)
    }

    // === Settings Repository ===

    /// Get settings for a guardian, if any were saved
    pub async fn get_settings(&self, guardian_id: Uuid) -> Result<Option<DbSettings>> {
        let settings = sqlx::query_as::<_, DbSettings>(
            r#"
            SELECT guardian_id, voice_id, created_at, updated_at
            FROM guardian_settings
            WHERE guardian_id = $1
            "#,
        )
        .bind(guardian_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    /// Upsert the preferred voice
    pub async fn upsert_voice(&self, guardian_id: Uuid, voice_id: Option<&str>) -> Result<DbSettings> {
        let settings = sqlx::query_as::<_, DbSettings>(
            r#"
            INSERT INTO guardian_settings (guardian_id, voice_id)
            VALUES ($1, $2)
            ON CONFLICT (guardian_id) DO UPDATE SET
                voice_id = EXCLUDED.voice_id,
                updated_at = NOW()
            RETURNING guardian_id, voice_id, created_at, updated_at
            "#,
        )
        .bind(guardian_id)
        .bind(voice_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }
}

// === Word Catalog ===

#[async_trait]
impl WordCatalog for Database {
    async fn list_words(&self, level: Level, owner: Option<Uuid>) -> StoreResult<Vec<Word>> {
        let rows = sqlx::query_as::<_, DbWord>(
            r#"
            SELECT id, text, level, hint_sentence, owner_id, created_at
            FROM words
            WHERE level = $1 AND (owner_id IS NULL OR owner_id = $2)
            ORDER BY text
            "#,
        )
        .bind(level.as_str())
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(rows.iter().filter_map(DbWord::to_core_word).collect())
    }

    async fn get_word(&self, word_id: Uuid) -> StoreResult<Option<Word>> {
        let row = sqlx::query_as::<_, DbWord>(
            r#"
            SELECT id, text, level, hint_sentence, owner_id, created_at
            FROM words
            WHERE id = $1
            "#,
        )
        .bind(word_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(row.as_ref().and_then(DbWord::to_core_word))
    }

    async fn find_word(&self, level: Level, text: &str, owner: Option<Uuid>) -> StoreResult<Option<Word>> {
        let row = sqlx::query_as::<_, DbWord>(
            r#"
            SELECT id, text, level, hint_sentence, owner_id, created_at
            FROM words
            WHERE level = $1 AND text = $2 AND owner_id IS NOT DISTINCT FROM $3
            LIMIT 1
            "#,
        )
        .bind(level.as_str())
        .bind(text)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(row.as_ref().and_then(DbWord::to_core_word))
    }

    async fn insert_word(&self, word: NewWord) -> StoreResult<Word> {
        let row = sqlx::query_as::<_, DbWord>(
            r#"
            INSERT INTO words (id, text, level, hint_sentence, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, text, level, hint_sentence, owner_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&word.text)
        .bind(word.level.as_str())
        .bind(&word.hint_sentence)
        .bind(word.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(Word {
            id: row.id,
            text: row.text,
            level: word.level,
            hint_sentence: row.hint_sentence,
            owner_id: row.owner_id,
        })
    }

    async fn set_hint(&self, word_id: Uuid, hint: &str) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE words
            SET hint_sentence = $2
            WHERE id = $1
            "#,
        )
        .bind(word_id)
        .bind(hint)
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "word",
                id: word_id,
            });
        }

        Ok(())
    }

    async fn list_owned_words(&self, owner: Uuid) -> StoreResult<Vec<Word>> {
        let rows = sqlx::query_as::<_, DbWord>(
            r#"
            SELECT id, text, level, hint_sentence, owner_id, created_at
            FROM words
            WHERE owner_id = $1
            ORDER BY level, text
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(rows.iter().filter_map(DbWord::to_core_word).collect())
    }

    async fn count_words_by_level(&self) -> StoreResult<BTreeMap<Level, usize>> {
        let rows = sqlx::query(
            r#"
            SELECT level, COUNT(*) AS count
            FROM words
            WHERE owner_id IS NULL
            GROUP BY level
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        let mut counts = BTreeMap::new();
        for row in rows {
            let level: String = row.get("level");
            let count: i64 = row.get("count");
            if let Some(level) = Level::from_str(&level) {
                counts.insert(level, count.max(0) as usize);
            }
        }

        Ok(counts)
    }
}

// === Progress Store ===

#[async_trait]
impl ProgressStore for Database {
    async fn list_progress(&self, learner_id: Uuid) -> StoreResult<Vec<ProgressRecord>> {
        let rows = sqlx::query_as::<_, DbProgress>(
            r#"
            SELECT id, learner_id, word_id, status, attempts, last_practiced_at,
                   created_at, updated_at
            FROM progress
            WHERE learner_id = $1
            "#,
        )
        .bind(learner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(rows.iter().map(DbProgress::to_core_record).collect())
    }

    async fn get_progress(&self, learner_id: Uuid, word_id: Uuid) -> StoreResult<Option<ProgressRecord>> {
        let row = sqlx::query_as::<_, DbProgress>(
            r#"
            SELECT id, learner_id, word_id, status, attempts, last_practiced_at,
                   created_at, updated_at
            FROM progress
            WHERE learner_id = $1 AND word_id = $2
            "#,
        )
        .bind(learner_id)
        .bind(word_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(row.as_ref().map(DbProgress::to_core_record))
    }

    async fn upsert_progress(&self, record: &ProgressRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO progress (id, learner_id, word_id, status, attempts, last_practiced_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (learner_id, word_id) DO UPDATE SET
                status = EXCLUDED.status,
                attempts = EXCLUDED.attempts,
                last_practiced_at = EXCLUDED.last_practiced_at,
                updated_at = NOW()
            "#,
        )
        .bind(record.id)
        .bind(record.learner_id)
        .bind(record.word_id)
        .bind(record.status.as_str())
        .bind(record.attempts.min(i32::MAX as u32) as i32)
        .bind(record.last_practiced_at)
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(())
    }

    /// Single-statement upsert: the attempt increment happens in the
    /// database, so concurrent outcomes for one pair cannot under-count.
    async fn record_outcome(
        &self,
        learner_id: Uuid,
        word_id: Uuid,
        outcome: Outcome,
        now: DateTime<Utc>,
    ) -> StoreResult<ProgressRecord> {
        let row = sqlx::query_as::<_, DbProgress>(
            r#"
            INSERT INTO progress (id, learner_id, word_id, status, attempts, last_practiced_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (learner_id, word_id) DO UPDATE SET
                status = EXCLUDED.status,
                attempts = CASE
                    WHEN EXCLUDED.status = 'trouble' THEN LEAST(progress.attempts, 2147483646) + 1
                    ELSE progress.attempts
                END,
                last_practiced_at = EXCLUDED.last_practiced_at,
                updated_at = NOW()
            RETURNING id, learner_id, word_id, status, attempts, last_practiced_at,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(learner_id)
        .bind(word_id)
        .bind(outcome.as_str())
        .bind(initial_attempts(outcome) as i32)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(row.to_core_record())
    }
}
