use std::fmt;

use thiserror::Error;

/// Failure while asking the model for an answer
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("response contained no text")]
    EmptyResponse,
}

/// Failure while reading or writing the local store
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure while writing to the system clipboard
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard command available: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Failed(String),
}

/// Controls that exist in the interface but have no behaviour behind them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Download,
    Regenerate,
    LoadHistory,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Download => "download",
            Operation::Regenerate => "regenerate",
            Operation::LoadHistory => "load history",
        };
        f.write_str(name)
    }
}

/// Rejections and failures reported by the conversation controller
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("a request is already in progress")]
    Busy,

    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("there is no previous query to regenerate")]
    NothingToRegenerate,

    #[error("no transcript entry at index {0}")]
    NoSuchEntry(usize),

    #[error("{0} is not implemented")]
    NotImplemented(Operation),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
