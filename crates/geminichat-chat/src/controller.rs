use std::collections::HashMap;

use geminichat_llm_api::ModelClient;
use geminichat_types::{
    ChatError, Exchange, Feedback, GenerationError, History, Operation,
    GENERATION_FAILED_MESSAGE,
};

use crate::clipboard::Clipboard;
use crate::persistence::HistoryStore;

/// Where the current request stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Pending { regenerating: bool },
    Settled,
    Failed,
}

/// A request handed out by `begin_submit`/`begin_regenerate`, to be passed back to `complete`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    prompt: String,
    regenerating: bool,
    epoch: u64,
}

impl PendingRequest {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_regenerate(&self) -> bool {
        self.regenerating
    }
}

/// Result of applying a finished request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Settled(Exchange),
    Failed,
    /// The conversation was reset while the request was in flight
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Short message shown to the user after a copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Owns the conversation: input, request status, answer, history and error.
///
/// Without a history store the controller runs single-turn: only the latest
/// exchange is kept and regenerate/load-history are not available.
pub struct ConversationController {
    input: String,
    saved_query: String,
    status: Status,
    answer: Option<String>,
    history: History,
    error: Option<String>,
    feedback: HashMap<usize, Feedback>,
    epoch: u64,
    store: Option<HistoryStore>,
}

impl ConversationController {
    pub fn single_turn() -> Self {
        Self::build(None)
    }

    pub fn with_history(store: HistoryStore) -> Self {
        Self::build(Some(store))
    }

    fn build(store: Option<HistoryStore>) -> Self {
        Self {
            input: String::new(),
            saved_query: String::new(),
            status: Status::Idle,
            answer: None,
            history: History::new(),
            error: None,
            feedback: HashMap::new(),
            epoch: 0,
            store,
        }
    }

    // ------------------------------------------------------------------
    // State accessors
    // ------------------------------------------------------------------

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Prompt of the most recent request
    pub fn saved_query(&self) -> &str {
        &self.saved_query
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, Status::Pending { .. })
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn feedback_for(&self, index: usize) -> Option<Feedback> {
        self.feedback.get(&index).copied()
    }

    pub fn is_single_turn(&self) -> bool {
        self.store.is_none()
    }

    /// Transcript entries: the history plus the failed frame, if any
    pub fn entry_count(&self) -> usize {
        self.history.len() + usize::from(self.status == Status::Failed)
    }

    /// Replace the input text. Rejected while a request is pending.
    pub fn set_input(&mut self, text: impl Into<String>) -> Result<(), ChatError> {
        if self.is_pending() {
            return Err(ChatError::Busy);
        }
        self.input = text.into();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------

    /// Start a request for the current input.
    pub fn begin_submit(&mut self) -> Result<PendingRequest, ChatError> {
        if self.is_pending() {
            return Err(ChatError::Busy);
        }
        if self.input.trim().is_empty() {
            return Err(ChatError::EmptyPrompt);
        }

        self.saved_query = self.input.clone();
        Ok(self.enter_pending(false))
    }

    /// Start a request that repeats the saved query, ignoring the input box.
    pub fn begin_regenerate(&mut self) -> Result<PendingRequest, ChatError> {
        if self.is_single_turn() {
            return Err(ChatError::NotImplemented(Operation::Regenerate));
        }
        if self.is_pending() {
            return Err(ChatError::Busy);
        }
        if self.saved_query.is_empty() {
            return Err(ChatError::NothingToRegenerate);
        }

        Ok(self.enter_pending(true))
    }

    fn enter_pending(&mut self, regenerating: bool) -> PendingRequest {
        // the failed frame's slot is about to be taken by the next exchange
        if self.status == Status::Failed {
            self.feedback.remove(&self.history.len());
        }
        self.error = None;
        self.answer = None;
        self.status = Status::Pending { regenerating };

        PendingRequest {
            prompt: self.saved_query.clone(),
            regenerating,
            epoch: self.epoch,
        }
    }

    /// Apply the result of a request started with `begin_submit`/`begin_regenerate`.
    ///
    /// On success the exchange is in memory and the answer is set even when
    /// writing it to the store fails; that failure is returned as
    /// `ChatError::Persistence`.
    pub fn complete(
        &mut self,
        request: PendingRequest,
        result: Result<String, GenerationError>,
    ) -> Result<Outcome, ChatError> {
        if request.epoch != self.epoch || !self.is_pending() {
            log::debug!("Dropping result for stale request '{}'", request.prompt);
            return Ok(Outcome::Discarded);
        }

        self.input.clear();

        match result {
            Ok(text) => {
                let exchange = Exchange::new(request.prompt, text.clone());
                self.answer = Some(text);
                self.status = Status::Settled;

                let persisted = match &mut self.store {
                    Some(store) => {
                        self.history.push(exchange.clone());
                        store.append(exchange.clone()).map(|_| ())
                    }
                    None => {
                        self.history = vec![exchange.clone()];
                        self.feedback.clear();
                        Ok(())
                    }
                };

                if let Err(e) = persisted {
                    log::warn!("Failed to persist history: {}", e);
                    return Err(e.into());
                }
                Ok(Outcome::Settled(exchange))
            }
            Err(e) => {
                log::error!("Generation failed for '{}': {}", request.prompt, e);
                self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
                self.status = Status::Failed;
                Ok(Outcome::Failed)
            }
        }
    }

    /// Submit the current input and wait for the answer
    pub async fn submit(&mut self, client: &dyn ModelClient) -> Result<Outcome, ChatError> {
        let request = self.begin_submit()?;
        let result = client.generate(request.prompt()).await;
        self.complete(request, result)
    }

    /// Ask again with the saved query and wait for the answer
    pub async fn regenerate(&mut self, client: &dyn ModelClient) -> Result<Outcome, ChatError> {
        let request = self.begin_regenerate()?;
        let result = client.generate(request.prompt()).await;
        self.complete(request, result)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Replace the in-memory history with the stored one. Returns its length.
    pub fn load_history(&mut self) -> Result<usize, ChatError> {
        let Some(store) = &self.store else {
            return Err(ChatError::NotImplemented(Operation::LoadHistory));
        };

        self.history = store.load()?;
        self.feedback.clear();
        Ok(self.history.len())
    }

    /// Back to the initial empty state. The store is left as it is, and any
    /// request still in flight is discarded when it completes.
    pub fn reset(&mut self) {
        self.input.clear();
        self.saved_query.clear();
        self.status = Status::Idle;
        self.answer = None;
        self.history.clear();
        self.error = None;
        self.feedback.clear();
        self.epoch += 1;
    }

    // ------------------------------------------------------------------
    // Entry affordances
    // ------------------------------------------------------------------

    /// Clipboard text for a transcript entry
    pub fn copy_text(&self, index: usize) -> Result<String, ChatError> {
        if let Some(exchange) = self.history.get(index) {
            return Ok(exchange.clipboard_text());
        }

        match (&self.error, self.status) {
            (Some(message), Status::Failed) if index == self.history.len() => {
                Ok(Exchange::new(self.saved_query.clone(), message.clone()).clipboard_text())
            }
            _ => Err(ChatError::NoSuchEntry(index)),
        }
    }

    /// Copy a transcript entry and report how it went
    pub async fn copy(
        &self,
        index: usize,
        clipboard: &dyn Clipboard,
    ) -> Result<Notification, ChatError> {
        let text = self.copy_text(index)?;
        Ok(Self::write_clipboard(&text, clipboard).await)
    }

    /// Write text from `copy_text` to the clipboard and report how it went
    pub async fn write_clipboard(text: &str, clipboard: &dyn Clipboard) -> Notification {
        match clipboard.write_text(text).await {
            Ok(()) => Notification::success("Copied to clipboard!"),
            Err(e) => {
                log::warn!("Copy failed: {}", e);
                Notification::error(format!("Failed to copy: {}", e))
            }
        }
    }

    /// Download has no implementation behind it
    pub fn download(&self, _index: usize) -> Result<(), ChatError> {
        Err(ChatError::NotImplemented(Operation::Download))
    }

    /// Set a feedback marker; giving the same marker twice clears it.
    /// Returns the marker now in place.
    pub fn feedback(
        &mut self,
        index: usize,
        feedback: Feedback,
    ) -> Result<Option<Feedback>, ChatError> {
        if index >= self.entry_count() {
            return Err(ChatError::NoSuchEntry(index));
        }

        if self.feedback.get(&index) == Some(&feedback) {
            self.feedback.remove(&index);
            Ok(None)
        } else {
            self.feedback.insert(index, feedback);
            Ok(Some(feedback))
        }
    }
}
