use colored::Colorize;

use geminichat_chat::{Affordances, ChatView, LiveFrame, Notification, NotificationKind};
use geminichat_types::Feedback;

use crate::navigation::Page;

const ANSWER_INDENT: &str = "        ";

/// Format a chat view for the terminal
pub fn format_view(view: &ChatView) -> String {
    let mut out = String::new();

    for entry in &view.entries {
        push_query(&mut out, Some(entry.index), &entry.query);
        push_answer(&mut out, &entry.answer_lines);
        push_actions(&mut out, entry.index, entry.feedback, entry.affordances);
    }

    match &view.live {
        Some(LiveFrame::Greeting { message }) => {
            out.push_str(&format!("{} {}\n", "🤖".bright_cyan(), message.bright_cyan()));
        }
        Some(LiveFrame::Echo { query }) => push_query(&mut out, None, query),
        Some(LiveFrame::Thinking {
            query,
            placeholder,
            regenerating,
        }) => {
            push_query(&mut out, None, query);
            let label = if *regenerating { "Regenerating" } else { "Gemini" };
            out.push_str(&format!(
                "    {}: {}\n",
                label.bright_magenta().bold(),
                placeholder.bright_black().italic()
            ));
        }
        Some(LiveFrame::Failed {
            index,
            query,
            message,
            feedback,
            affordances,
        }) => {
            push_query(&mut out, Some(*index), query);
            out.push_str(&format!("    {}: {}\n", "Error".red().bold(), message.red()));
            push_actions(&mut out, *index, *feedback, *affordances);
        }
        None => {}
    }

    out
}

fn push_query(out: &mut String, index: Option<usize>, query: &str) {
    let label = match index {
        Some(i) => format!("[{}] You", i + 1),
        None => "You".to_string(),
    };
    out.push_str(&format!("{}: {}\n", label.bright_blue().bold(), query));
}

fn push_answer(out: &mut String, lines: &[String]) {
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            out.push_str(&format!("    {}: {}\n", "Gemini".bright_magenta().bold(), line));
        } else {
            out.push_str(&format!("{}{}\n", ANSWER_INDENT, line));
        }
    }
}

fn push_actions(out: &mut String, index: usize, feedback: Option<Feedback>, affordances: Affordances) {
    let n = index + 1;
    let mut actions = Vec::new();
    if affordances.copy {
        actions.push(format!("/copy {}", n));
    }
    if affordances.download {
        actions.push(format!("/download {}", n));
    }
    if affordances.regenerate {
        actions.push("/regenerate".to_string());
    }
    if affordances.feedback {
        actions.push(format!("/feedback {} up|down", n));
    }

    let marker = match feedback {
        Some(Feedback::Up) => "👍 ",
        Some(Feedback::Down) => "👎 ",
        None => "",
    };
    out.push_str(&format!(
        "    {}{}\n",
        marker,
        actions.join(" · ").bright_black()
    ));
}

pub fn format_notification(notification: &Notification) -> String {
    match notification.kind {
        NotificationKind::Success => format!("✓ {}", notification.message).green().to_string(),
        NotificationKind::Error => format!("✗ {}", notification.message).red().to_string(),
    }
}

/// Terminal rendering of the pages that are not the chat
pub fn format_page(page: Page) -> String {
    match page {
        Page::Chat => String::new(),
        Page::Login => format!(
            "{}\n{}\n",
            "Login".bold(),
            "Sign-in is not available yet. Use /go /Chat to return.".bright_black()
        ),
        Page::NotFound => format!(
            "{}\n{}\n",
            "404 - Page not found".yellow().bold(),
            "Use /go /Chat to return.".bright_black()
        ),
    }
}
