//! Study operations exposed to the presentation layer.
//!
//! `SpellingService` composes the catalog and progress stores with the pure
//! queue, matching and progress logic. It never retries: store failures are
//! returned to the caller, which decides whether to try again.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::matching::{compare_guess, is_correct_guess, GuessResult};
use crate::queue::{build_queue, mastered_count};
use crate::session::next_item;
use crate::store::{ProgressStore, WordCatalog};
use crate::types::{Level, NewWord, Outcome, ProgressRecord, SeedReport, SeedWord, StudyItem, Word};

/// Facade over a store implementing both collaborator traits.
pub struct SpellingService<S> {
    store: Arc<S>,
}

impl<S> Clone for SpellingService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> SpellingService<S>
where
    S: WordCatalog + ProgressStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ranked, non-mastered study queue for a learner.
    ///
    /// Unknown level names give an empty queue rather than an error.
    /// `owner` selects whose custom words are included next to system words.
    pub async fn get_study_queue(
        &self,
        level: &str,
        learner_id: Uuid,
        owner: Option<Uuid>,
    ) -> Result<Vec<StudyItem>> {
        let Some(level) = Level::from_str(level) else {
            tracing::debug!(requested_level = level, "unknown level requested, returning empty queue");
            return Ok(Vec::new());
        };

        let words = self.store.list_words(level, owner).await?;
        let progress = self.store.list_progress(learner_id).await?;
        let queue = build_queue(&words, &progress, level);

        tracing::debug!(
            level_name = level.as_str(),
            %learner_id,
            words = words.len(),
            queued = queue.len(),
            "built study queue"
        );

        Ok(queue)
    }

    /// Whether `guess` spells `answer`.
    pub fn check_guess(&self, guess: &str, answer: &str) -> bool {
        is_correct_guess(guess, answer)
    }

    /// Compare a guess, keeping the normalized forms for display.
    pub fn compare_guess(&self, guess: &str, answer: &str) -> GuessResult {
        compare_guess(guess, answer)
    }

    /// Record the outcome of a practice attempt and return the stored record.
    ///
    /// The queue should be rebuilt after this returns; a failed write leaves
    /// the previous queue valid.
    pub async fn submit_outcome(
        &self,
        learner_id: Uuid,
        word_id: Uuid,
        outcome: Outcome,
    ) -> Result<ProgressRecord> {
        let record = self
            .store
            .record_outcome(learner_id, word_id, outcome, Utc::now())
            .await?;

        tracing::info!(
            %learner_id,
            %word_id,
            outcome = outcome.as_str(),
            attempts = record.attempts,
            "recorded outcome"
        );

        Ok(record)
    }

    /// Word to show after `current` in `queue`.
    pub fn next_item(&self, queue: &[StudyItem], current: Option<Uuid>) -> Option<Uuid> {
        next_item(queue, current)
    }

    /// Number of words in `level` the learner has mastered.
    pub async fn mastered_count(
        &self,
        level: Level,
        learner_id: Uuid,
        owner: Option<Uuid>,
    ) -> Result<usize> {
        let words = self.store.list_words(level, owner).await?;
        let progress = self.store.list_progress(learner_id).await?;
        Ok(mastered_count(&words, &progress, level))
    }

    /// Add system words to the catalog.
    ///
    /// An entry matching an existing (level, text) pair only fills in a
    /// missing hint; otherwise it is skipped. Blank entries are skipped.
    pub async fn seed_words(&self, entries: Vec<SeedWord>) -> Result<SeedReport> {
        let mut report = SeedReport::default();
        let mut known: HashMap<(Level, String), Word> = HashMap::new();

        for level in Level::ALL {
            if !entries.iter().any(|e| e.level == level) {
                continue;
            }
            for word in self.store.list_words(level, None).await? {
                known.insert((word.level, word.text.clone()), word);
            }
        }

        for entry in entries {
            let text = entry.text.trim().to_string();
            if text.is_empty() {
                report.skipped += 1;
                continue;
            }
            let hint = entry.hint_sentence.filter(|h| !h.trim().is_empty());

            match known.get_mut(&(entry.level, text.clone())) {
                Some(existing) => match hint {
                    Some(hint) if existing.hint_sentence.is_none() => {
                        self.store.set_hint(existing.id, &hint).await?;
                        existing.hint_sentence = Some(hint);
                        report.inserted += 1;
                    }
                    _ => report.skipped += 1,
                },
                None => {
                    let word = self
                        .store
                        .insert_word(NewWord {
                            text: text.clone(),
                            level: entry.level,
                            hint_sentence: hint,
                            owner_id: None,
                        })
                        .await?;
                    known.insert((entry.level, text), word);
                    report.inserted += 1;
                }
            }
        }

        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "seeded word catalog"
        );

        Ok(report)
    }

    /// Add a custom word for `owner`, returning the existing one if the
    /// owner already added the same (level, text).
    pub async fn add_custom_word(
        &self,
        owner: Uuid,
        text: &str,
        level: Level,
        hint_sentence: Option<String>,
    ) -> Result<Word> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::InvalidInput("word text must not be empty".to_string()));
        }

        if let Some(existing) = self.store.find_word(level, text, Some(owner)).await? {
            return Ok(existing);
        }

        let word = self
            .store
            .insert_word(NewWord {
                text: text.to_string(),
                level,
                hint_sentence: hint_sentence.filter(|h| !h.trim().is_empty()),
                owner_id: Some(owner),
            })
            .await?;

        tracing::info!(%owner, word_id = %word.id, level_name = level.as_str(), "added custom word");

        Ok(word)
    }

    /// Custom words added by `owner`.
    pub async fn owned_words(&self, owner: Uuid) -> Result<Vec<Word>> {
        self.store.list_owned_words(owner).await
    }

    /// Number of system words per level.
    pub async fn word_counts(&self) -> Result<BTreeMap<Level, usize>> {
        self.store.count_words_by_level().await
    }
}
