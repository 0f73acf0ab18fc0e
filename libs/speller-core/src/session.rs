//! Cursor over a study queue.
//!
//! The cursor cycles: after the last item it wraps to the first, so a review
//! session never runs out while words remain. Mastered words leave the queue
//! only when it is rebuilt.

use uuid::Uuid;

use crate::types::StudyItem;

/// ID of the item after `current`, wrapping around.
///
/// Returns the first item when `current` is `None` or not in the queue, and
/// `None` when the queue is empty.
pub fn next_item(queue: &[StudyItem], current: Option<Uuid>) -> Option<Uuid> {
    let first = queue.first()?.word_id;

    let Some(current) = current else {
        return Some(first);
    };

    match queue.iter().position(|item| item.word_id == current) {
        Some(idx) => Some(queue[(idx + 1) % queue.len()].word_id),
        None => Some(first),
    }
}

/// Study session holding the current item over a queue.
#[derive(Debug, Clone, Default)]
pub struct Session {
    queue: Vec<StudyItem>,
    current: Option<Uuid>,
}

impl Session {
    /// Start a session on the first item of `queue`.
    pub fn new(queue: Vec<StudyItem>) -> Self {
        let current = next_item(&queue, None);
        Self { queue, current }
    }

    /// ID of the word being studied, `None` once nothing is left.
    pub fn current_id(&self) -> Option<Uuid> {
        self.current
    }

    /// The word being studied.
    pub fn current(&self) -> Option<&StudyItem> {
        let id = self.current?;
        self.queue.iter().find(|item| item.word_id == id)
    }

    pub fn queue(&self) -> &[StudyItem] {
        &self.queue
    }

    /// Number of words left in the queue.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Move to the next item (skip, correct answer or mastered word).
    pub fn advance(&mut self) -> Option<Uuid> {
        self.current = next_item(&self.queue, self.current);
        self.current
    }

    /// Replace the queue with a freshly built one.
    ///
    /// Keeps the cursor on the current word while it is still queued;
    /// otherwise moves to the first item.
    pub fn refresh(&mut self, queue: Vec<StudyItem>) {
        let still_queued = self
            .current
            .is_some_and(|id| queue.iter().any(|item| item.word_id == id));

        self.queue = queue;
        if !still_queued {
            self.current = next_item(&self.queue, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Level, ProgressStatus};
    use pretty_assertions::assert_eq;

    fn item(text: &str) -> StudyItem {
        StudyItem {
            word_id: Uuid::new_v4(),
            text: text.to_string(),
            level: Level::Tier1,
            hint_sentence: None,
            status: ProgressStatus::New,
            attempts: 0,
            last_practiced_at: None,
        }
    }

    #[test]
    fn empty_queue_has_no_next() {
        assert_eq!(next_item(&[], None), None);
        assert_eq!(next_item(&[], Some(Uuid::new_v4())), None);
    }

    #[test]
    fn starts_at_first_item() {
        let queue = vec![item("ant"), item("bee")];
        assert_eq!(next_item(&queue, None), Some(queue[0].word_id));
        assert_eq!(next_item(&queue, Some(Uuid::new_v4())), Some(queue[0].word_id));
    }

    #[test]
    fn three_item_queue_cycles() {
        let queue = vec![item("ant"), item("bee"), item("cat")];
        let start = queue[0].word_id;

        let one = next_item(&queue, Some(start));
        let two = next_item(&queue, one);
        let three = next_item(&queue, two);

        assert_eq!(one, Some(queue[1].word_id));
        assert_eq!(two, Some(queue[2].word_id));
        assert_eq!(three, Some(start));
    }

    #[test]
    fn single_item_points_to_itself() {
        let queue = vec![item("ant")];
        assert_eq!(next_item(&queue, Some(queue[0].word_id)), Some(queue[0].word_id));
    }

    #[test]
    fn session_advance_and_current() {
        let queue = vec![item("ant"), item("bee")];
        let ids: Vec<Uuid> = queue.iter().map(|i| i.word_id).collect();
        let mut session = Session::new(queue);

        assert_eq!(session.current_id(), Some(ids[0]));
        assert_eq!(session.current().map(|i| i.text.as_str()), Some("ant"));
        assert_eq!(session.advance(), Some(ids[1]));
        assert_eq!(session.advance(), Some(ids[0]));
        assert_eq!(session.remaining(), 2);
    }

    #[test]
    fn refresh_keeps_cursor_on_queued_word() {
        let queue = vec![item("ant"), item("bee"), item("cat")];
        let bee = queue[1].clone();
        let mut session = Session::new(queue.clone());
        session.advance();
        assert_eq!(session.current_id(), Some(bee.word_id));

        // "ant" was mastered and dropped from the rebuilt queue.
        session.refresh(vec![bee.clone(), queue[2].clone()]);
        assert_eq!(session.current_id(), Some(bee.word_id));
    }

    #[test]
    fn refresh_moves_to_first_when_current_is_gone() {
        let queue = vec![item("ant"), item("bee")];
        let mut session = Session::new(queue.clone());

        session.refresh(vec![queue[1].clone()]);
        assert_eq!(session.current_id(), Some(queue[1].word_id));

        session.refresh(Vec::new());
        assert_eq!(session.current_id(), None);
        assert!(session.current().is_none());
    }
}
