//! View model rendered by the terminal and web front ends.
//!
//! `render` is a pure function of controller state. Front ends format the
//! resulting `ChatView` and never look at the controller directly.

use geminichat_types::{
    Feedback, GREETING, INPUT_PLACEHOLDER, INPUT_PLACEHOLDER_PENDING, THINKING,
};

use crate::controller::{ConversationController, Status};

/// Which controls an entry offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub copy: bool,
    /// Shown, but reports "not implemented" when used
    pub download: bool,
    pub regenerate: bool,
    pub feedback: bool,
}

/// One answered exchange in the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub index: usize,
    pub query: String,
    pub answer_lines: Vec<String>,
    pub feedback: Option<Feedback>,
    pub affordances: Affordances,
}

/// What is shown after the transcript for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveFrame {
    Greeting {
        message: &'static str,
    },
    /// Query typed but not sent yet
    Echo {
        query: String,
    },
    Thinking {
        query: String,
        placeholder: &'static str,
        regenerating: bool,
    },
    Failed {
        index: usize,
        query: String,
        message: String,
        feedback: Option<Feedback>,
        affordances: Affordances,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub value: String,
    pub placeholder: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    pub entries: Vec<TranscriptEntry>,
    pub live: Option<LiveFrame>,
    pub form: FormView,
}

pub fn render(chat: &ConversationController) -> ChatView {
    let pending = chat.is_pending();
    let affordances = Affordances {
        copy: true,
        download: true,
        regenerate: !chat.is_single_turn() && !pending,
        feedback: true,
    };

    let entries = chat
        .history()
        .iter()
        .enumerate()
        .map(|(index, exchange)| TranscriptEntry {
            index,
            query: exchange.query.clone(),
            answer_lines: exchange.response_lines(),
            feedback: chat.feedback_for(index),
            affordances,
        })
        .collect();

    ChatView {
        entries,
        live: live_frame(chat, affordances),
        form: FormView {
            value: chat.input().to_string(),
            placeholder: if pending {
                INPUT_PLACEHOLDER_PENDING
            } else {
                INPUT_PLACEHOLDER
            },
            disabled: pending,
        },
    }
}

fn live_frame(chat: &ConversationController, affordances: Affordances) -> Option<LiveFrame> {
    match chat.status() {
        Status::Pending { regenerating } => Some(LiveFrame::Thinking {
            query: chat.saved_query().to_string(),
            placeholder: THINKING,
            regenerating,
        }),
        Status::Failed => {
            let index = chat.history().len();
            Some(LiveFrame::Failed {
                index,
                query: chat.saved_query().to_string(),
                message: chat.error().unwrap_or_default().to_string(),
                feedback: chat.feedback_for(index),
                affordances,
            })
        }
        // A settled answer is already the last transcript entry
        Status::Idle | Status::Settled => {
            if chat.answer().is_some() {
                None
            } else if !chat.input().is_empty() {
                Some(LiveFrame::Echo {
                    query: chat.input().to_string(),
                })
            } else if chat.history().is_empty() {
                Some(LiveFrame::Greeting { message: GREETING })
            } else {
                None
            }
        }
    }
}
