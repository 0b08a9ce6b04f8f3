//! Conversation management for geminichat
//!
//! This crate holds the conversation controller, the local history store it
//! persists to, and the view model both front ends render from.

pub mod clipboard;
pub mod controller;
pub mod persistence;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use clipboard::{ArboardClipboard, Clipboard, CommandClipboard};
pub use controller::{
    ConversationController, Notification, NotificationKind, Outcome, PendingRequest, Status,
};
pub use persistence::HistoryStore;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use view::{render, Affordances, ChatView, FormView, LiveFrame, TranscriptEntry};
