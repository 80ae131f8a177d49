//! Bounded conversation log — oldest turns dropped in whole user+assistant pairs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of exchanges kept; the log holds at most `2 * MAX_TURNS` turns.
pub const MAX_TURNS: usize = 6;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single conversation turn. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    /// When the turn was recorded.
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// Ordered log of prior turns, bounded to `2 * MAX_TURNS` entries.
///
/// Turns are only ever recorded as complete user+assistant exchanges, so
/// trimming from the front always removes whole pairs and the log never
/// starts mid-exchange.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed exchange, trimming the oldest pair if over capacity.
    pub fn push_exchange(&mut self, user_text: &str, assistant_text: &str) {
        self.turns.push(Turn::user(user_text));
        self.turns.push(Turn::assistant(assistant_text));
        while self.turns.len() > 2 * MAX_TURNS {
            self.turns.drain(..2);
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop all recorded turns (session teardown).
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
