//! Study queue construction.
//!
//! Joins a level's words with a learner's progress, drops mastered words and
//! orders the rest:
//! 1. trouble words, then new words;
//! 2. among trouble words, most attempts first, then least recently practiced;
//! 3. word text (locale-style), then word ID.
//!
//! Pure and deterministic: identical inputs always give the same queue.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::matching::collate;
use crate::types::{Level, ProgressRecord, ProgressStatus, StudyItem, Word};

/// Priority bucket of a status. Lower sorts first.
pub fn status_rank(status: ProgressStatus) -> u8 {
    match status {
        ProgressStatus::Trouble => 0,
        ProgressStatus::New => 1,
        ProgressStatus::Mastered => 2,
    }
}

/// Build the ordered study queue for `level`.
///
/// Progress records that reference words outside `words` are ignored.
pub fn build_queue(words: &[Word], progress: &[ProgressRecord], level: Level) -> Vec<StudyItem> {
    let by_word = index_progress(progress);

    let mut items: Vec<StudyItem> = words
        .iter()
        .filter(|w| w.level == level)
        .map(|w| StudyItem::from_parts(w, by_word.get(&w.id).copied()))
        .filter(|item| item.status != ProgressStatus::Mastered)
        .collect();

    items.sort_by(compare_items);
    items
}

/// Ordering used by [`build_queue`].
pub fn compare_items(a: &StudyItem, b: &StudyItem) -> Ordering {
    status_rank(a.status)
        .cmp(&status_rank(b.status))
        .then_with(|| {
            if a.status == ProgressStatus::Trouble {
                b.attempts
                    .cmp(&a.attempts)
                    .then_with(|| a.last_practiced_at.cmp(&b.last_practiced_at))
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| collate(&a.text, &b.text))
        .then_with(|| a.word_id.cmp(&b.word_id))
}

/// Number of words in `level` the learner has mastered.
pub fn mastered_count(words: &[Word], progress: &[ProgressRecord], level: Level) -> usize {
    let level_words: HashSet<Uuid> = words
        .iter()
        .filter(|w| w.level == level)
        .map(|w| w.id)
        .collect();

    progress
        .iter()
        .filter(|p| p.status == ProgressStatus::Mastered && level_words.contains(&p.word_id))
        .count()
}

fn index_progress(progress: &[ProgressRecord]) -> HashMap<Uuid, &ProgressRecord> {
    // Duplicate records for one word should not exist; the last one wins.
    progress.iter().map(|p| (p.word_id, p)).collect()
}
