//! Collaborator interface to the word catalog and the progress store.
//!
//! The core never talks to a database directly. It reads the catalog and
//! learner progress through [`WordCatalog`] and [`ProgressStore`], and writes
//! outcomes through [`ProgressStore::record_outcome`].

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::progress::apply_outcome;
use crate::types::{Level, NewWord, Outcome, ProgressRecord, Word};

/// Read/write access to the word catalog.
#[async_trait]
pub trait WordCatalog: Send + Sync {
    /// Words of `level` visible to `owner`: system words plus the owner's
    /// custom words.
    async fn list_words(&self, level: Level, owner: Option<Uuid>) -> Result<Vec<Word>>;

    async fn get_word(&self, word_id: Uuid) -> Result<Option<Word>>;

    /// Exact (level, text) lookup within a single owner scope.
    async fn find_word(&self, level: Level, text: &str, owner: Option<Uuid>) -> Result<Option<Word>>;

    async fn insert_word(&self, word: NewWord) -> Result<Word>;

    /// Set the hint sentence of an existing word.
    async fn set_hint(&self, word_id: Uuid, hint: &str) -> Result<()>;

    /// Custom words added by `owner`.
    async fn list_owned_words(&self, owner: Uuid) -> Result<Vec<Word>>;

    /// Number of system words per level.
    async fn count_words_by_level(&self) -> Result<BTreeMap<Level, usize>>;
}

/// Read/write access to learner progress.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn list_progress(&self, learner_id: Uuid) -> Result<Vec<ProgressRecord>>;

    async fn get_progress(&self, learner_id: Uuid, word_id: Uuid) -> Result<Option<ProgressRecord>>;

    /// Insert the record, or replace the record of the same (learner, word) pair.
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<()>;

    /// Apply an outcome to the (learner, word) pair and return the stored record.
    ///
    /// The default implementation reads the current record, computes the next
    /// one with [`apply_outcome`] and writes it back. The two steps are not
    /// atomic: two concurrent calls for the same pair can both see no record,
    /// or both read the same attempt count and under-count. Stores that can
    /// upsert with an atomic increment should override this method.
    async fn record_outcome(
        &self,
        learner_id: Uuid,
        word_id: Uuid,
        outcome: Outcome,
        now: DateTime<Utc>,
    ) -> Result<ProgressRecord> {
        let existing = self.get_progress(learner_id, word_id).await?;
        let next = apply_outcome(existing.as_ref(), learner_id, word_id, outcome, now);
        self.upsert_progress(&next).await?;
        Ok(next)
    }
}

#[derive(Debug, Default)]
struct Tables {
    words: Vec<Word>,
    progress: HashMap<(Uuid, Uuid), ProgressRecord>,
}

/// Process-local store, used in tests and for running without a database.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with catalog words.
    pub fn with_words(words: Vec<Word>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                words,
                progress: HashMap::new(),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl WordCatalog for InMemoryStore {
    async fn list_words(&self, level: Level, owner: Option<Uuid>) -> Result<Vec<Word>> {
        let tables = self.read()?;
        Ok(tables
            .words
            .iter()
            .filter(|w| w.level == level && w.visible_to(owner))
            .cloned()
            .collect())
    }

    async fn get_word(&self, word_id: Uuid) -> Result<Option<Word>> {
        let tables = self.read()?;
        Ok(tables.words.iter().find(|w| w.id == word_id).cloned())
    }

    async fn find_word(&self, level: Level, text: &str, owner: Option<Uuid>) -> Result<Option<Word>> {
        let tables = self.read()?;
        Ok(tables
            .words
            .iter()
            .find(|w| w.level == level && w.text == text && w.owner_id == owner)
            .cloned())
    }

    async fn insert_word(&self, word: NewWord) -> Result<Word> {
        let mut tables = self.write()?;
        let word = Word {
            id: Uuid::new_v4(),
            text: word.text,
            level: word.level,
            hint_sentence: word.hint_sentence,
            owner_id: word.owner_id,
        };
        tables.words.push(word.clone());
        Ok(word)
    }

    async fn set_hint(&self, word_id: Uuid, hint: &str) -> Result<()> {
        let mut tables = self.write()?;
        let word = tables
            .words
            .iter_mut()
            .find(|w| w.id == word_id)
            .ok_or(StoreError::NotFound {
                entity: "word",
                id: word_id,
            })?;
        word.hint_sentence = Some(hint.to_string());
        Ok(())
    }

    async fn list_owned_words(&self, owner: Uuid) -> Result<Vec<Word>> {
        let tables = self.read()?;
        Ok(tables
            .words
            .iter()
            .filter(|w| w.owner_id == Some(owner))
            .cloned()
            .collect())
    }

    async fn count_words_by_level(&self) -> Result<BTreeMap<Level, usize>> {
        let tables = self.read()?;
        let mut counts = BTreeMap::new();
        for word in tables.words.iter().filter(|w| w.owner_id.is_none()) {
            *counts.entry(word.level).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

#[async_trait]
impl ProgressStore for InMemoryStore {
    async fn list_progress(&self, learner_id: Uuid) -> Result<Vec<ProgressRecord>> {
        let tables = self.read()?;
        Ok(tables
            .progress
            .values()
            .filter(|p| p.learner_id == learner_id)
            .cloned()
            .collect())
    }

    async fn get_progress(&self, learner_id: Uuid, word_id: Uuid) -> Result<Option<ProgressRecord>> {
        let tables = self.read()?;
        Ok(tables.progress.get(&(learner_id, word_id)).cloned())
    }

    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<()> {
        let mut tables = self.write()?;
        tables
            .progress
            .insert((record.learner_id, record.word_id), record.clone());
        Ok(())
    }
}
