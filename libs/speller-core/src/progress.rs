//! Progress state machine for one (learner, word) pair.
//!
//! ```text
//! (absent) --trouble--> trouble (attempts = 1)
//! (absent) --mastered-> mastered (attempts = 0)
//! any      --trouble--> trouble (attempts + 1)
//! any      --mastered-> mastered (attempts unchanged)
//! ```
//!
//! Mastered is terminal for active study: the queue builder drops those
//! words. A mastered word that fails again still moves back to trouble and
//! keeps counting attempts.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::{Outcome, ProgressRecord};

/// Compute the record that results from applying `outcome` to `existing`.
///
/// When no record exists yet a new one is created with a fresh ID.
pub fn apply_outcome(
    existing: Option<&ProgressRecord>,
    learner_id: Uuid,
    word_id: Uuid,
    outcome: Outcome,
    now: DateTime<Utc>,
) -> ProgressRecord {
    match existing {
        None => ProgressRecord {
            id: Uuid::new_v4(),
            learner_id,
            word_id,
            status: outcome.status(),
            attempts: initial_attempts(outcome),
            last_practiced_at: now,
        },
        Some(record) => ProgressRecord {
            status: outcome.status(),
            attempts: match outcome {
                Outcome::Trouble => record.attempts.saturating_add(1),
                Outcome::Mastered => record.attempts,
            },
            last_practiced_at: now,
            ..record.clone()
        },
    }
}

/// Attempt count of a record created by `outcome`.
pub fn initial_attempts(outcome: Outcome) -> u32 {
    match outcome {
        Outcome::Trouble => 1,
        Outcome::Mastered => 0,
    }
}
