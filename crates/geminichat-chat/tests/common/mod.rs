use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use geminichat_chat::{Clipboard, ConversationController, HistoryStore, KeyValueStore, MemoryStore};
use geminichat_llm_api::ModelClient;
use geminichat_types::{ClipboardError, GenerationError, PersistenceError};

/// Model client that answers from a script and records every prompt
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(answers: &[&str]) -> Self {
        Self::new(answers.iter().map(|a| Ok(a.to_string())).collect())
    }

    pub fn failing() -> Self {
        Self::new(vec![Err(GenerationError::Transport(
            "connection refused".to_string(),
        ))])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GenerationError::EmptyResponse))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Clipboard that remembers what was written, or always fails
pub struct RecordingClipboard {
    pub fail: bool,
    pub written: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn working() -> Self {
        Self {
            fail: false,
            written: Mutex::new(Vec::new()),
        }
    }

    pub fn broken() -> Self {
        Self {
            fail: true,
            written: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Failed("permission denied".to_string()));
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Controller backed by a memory store, plus a handle on that store
pub fn history_chat() -> (ConversationController, HistoryStore) {
    let raw = MemoryStore::new();
    let chat = ConversationController::with_history(HistoryStore::new(raw.clone()));
    (chat, HistoryStore::new(raw))
}

/// Store that reads as empty and refuses every write
pub struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only store").into())
    }
}
