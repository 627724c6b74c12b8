//! Conversation context store.
//!
//! An append-only log of turns exposing a bounded trailing window. Insertion
//! order defines recency; the only ways to change the log are `append`,
//! `append_exchange` and a full `clear`.

use super::turn::Turn;

/// Ordered, append-only log of turns for one conversation.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    turns: Vec<Turn>,
    next_sequence: u64,
}

impl ConversationContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn at the end and returns its sequence index.
    pub fn append(&mut self, mut turn: Turn) -> u64 {
        let sequence = self.next_sequence;
        turn.assign_sequence(sequence);
        self.turns.push(turn);
        self.next_sequence += 1;
        sequence
    }

    /// Appends a user turn followed by its assistant turn.
    pub fn append_exchange(&mut self, user: Turn, assistant: Turn) {
        self.append(user);
        self.append(assistant);
    }

    /// Returns the trailing `2 * max_exchanges` turns, oldest first.
    ///
    /// Returns the whole log when it is shorter than the window.
    pub fn window(&self, max_exchanges: usize) -> &[Turn] {
        let size = max_exchanges.saturating_mul(2);
        let start = self.turns.len().saturating_sub(size);
        &self.turns[start..]
    }

    /// Removes all turns. Sequence indices keep increasing afterwards.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// All stored turns, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
