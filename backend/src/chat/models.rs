//! Chat data models
//!
//! Defines structures for conversations and their turns.

use serde::{Deserialize, Serialize};

use crate::emotion::EmotionState;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions for the model (never stored in a conversation)
    System,
    /// Message from the user
    User,
    /// Message from the assistant/AI
    Assistant,
}

/// One role-tagged message, in the shape the completion API expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who said it
    pub role: MessageRole,
    /// What was said
    pub content: String,
}

impl ChatTurn {
    /// Create a new turn
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A conversation thread held in memory
#[derive(Debug, Clone)]
pub struct Conversation {
    /// Unique identifier for the conversation
    pub id: String,
    /// Retained turns, oldest first
    pub turns: Vec<ChatTurn>,
    /// Emotion state after the latest turn
    pub emotion_state: EmotionState,
}

impl Conversation {
    /// Create an empty conversation at the neutral emotion state
    pub fn new(id: String) -> Self {
        Self {
            id,
            turns: Vec::new(),
            emotion_state: EmotionState::neutral(),
        }
    }

    /// Append a turn
    pub fn push_turn(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// Keep only the most recent `limit` turns
    pub fn trim_history(&mut self, limit: usize) {
        if self.turns.len() > limit {
            let excess = self.turns.len() - limit;
            self.turns.drain(..excess);
        }
    }
}
