//! Core types and structures for geminichat
//!
//! This crate provides the foundational types used across all geminichat crates.

use serde::{Deserialize, Serialize};

pub mod error;

pub use error::{ChatError, ClipboardError, GenerationError, Operation, PersistenceError};

// ============================================================================
// Constants
// ============================================================================

/// Key under which the history is kept in the local key-value store
pub const STORAGE_KEY: &str = "chatHistory";

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Shown when there is nothing to display yet
pub const GREETING: &str = "Hi. Ask me anything you want.";

/// Shown in place of the answer while a request is pending
pub const THINKING: &str = "Thinking...";

/// Input placeholder while idle
pub const INPUT_PLACEHOLDER: &str = "Write something to start...";

/// Input placeholder while a request is pending
pub const INPUT_PLACEHOLDER_PENDING: &str = THINKING;

/// User-facing text for any failed generation. The underlying cause is logged only.
pub const GENERATION_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

// ============================================================================
// Conversation data
// ============================================================================

/// One query/response pair.
///
/// Created once a generation settles successfully and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub query: String,
    pub response: String,
}

impl Exchange {
    pub fn new(query: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
        }
    }

    /// Text placed on the clipboard by the copy affordance
    pub fn clipboard_text(&self) -> String {
        format!("Query: {}\nResponse: {}", self.query, self.response)
    }

    /// The response split into one block per line
    pub fn response_lines(&self) -> Vec<String> {
        self.response.split('\n').map(str::to_string).collect()
    }
}

/// Ordered collection of exchanges, oldest first. Duplicates are allowed.
pub type History = Vec<Exchange>;

/// Thumbs up / thumbs down marker on a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Up,
    Down,
}

impl Feedback {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "like" | "+" | "good" => Some(Self::Up),
            "down" | "dislike" | "-" | "bad" => Some(Self::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}
