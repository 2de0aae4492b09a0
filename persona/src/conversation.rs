//! Conversation state: the ordered turn log of one session.

use prompt::{ConversationTurn, Role};

/// Append-only list of turns; [`ConversationState::reset`] is the only deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    turns: Vec<ConversationTurn>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(ConversationTurn::new(role, content));
    }

    /// Read-only view of every turn, oldest first.
    pub fn render(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// The last `max` turns (all of them when `max` is `None`).
    pub fn recent(&self, max: Option<usize>) -> &[ConversationTurn] {
        match max {
            Some(n) if n < self.turns.len() => &self.turns[self.turns.len() - n..],
            _ => &self.turns,
        }
    }

    /// Clears the whole history (new conversation).
    pub fn reset(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
