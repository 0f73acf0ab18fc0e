//! Core spelling practice library shared by the backend and its clients.
//!
//! Provides:
//! - Guess normalization and matching
//! - Progress state machine (new -> trouble -> mastered)
//! - Study queue ranking and the session cursor
//! - Collaborator traits for the word catalog and progress store
//! - `SpellingService`, the operations exposed to the presentation layer

pub mod error;
pub mod matching;
pub mod progress;
pub mod queue;
pub mod service;
pub mod session;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use matching::{collate, compare_guess, is_correct_guess, normalize_for_compare, GuessResult};
pub use progress::apply_outcome;
pub use queue::{build_queue, mastered_count, status_rank};
pub use service::SpellingService;
pub use session::{next_item, Session};
pub use store::{InMemoryStore, ProgressStore, WordCatalog};
pub use types::{
    Level, NewWord, Outcome, ProgressRecord, ProgressStatus, SeedReport, SeedWord, StudyItem, Word,
};
