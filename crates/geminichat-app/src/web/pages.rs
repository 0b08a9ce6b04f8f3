//! Server-rendered HTML for the web front end.

use geminichat_chat::{Affordances, ChatView, LiveFrame, Notification, NotificationKind};
use geminichat_types::Feedback;

use crate::navigation::{Page, CHAT_PATH, LOGIN_PATH};

/// Seconds between reloads while a request is pending
const PENDING_REFRESH_SECS: u32 = 1;

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:0 auto;padding:1rem}\
nav a{margin-right:1rem}\
.entry{border-bottom:1px solid #ddd;padding:.5rem 0}\
.query{font-weight:bold}\
.answer p{margin:.2rem 0 .2rem 1rem}\
.thinking{color:#888;font-style:italic}\
.error{color:#b00}\
.notice{padding:.5rem;margin:.5rem 0}\
.notice.success{background:#e6f6e6}\
.notice.error{background:#fbe6e6}\
.actions form{display:inline}\
.actions .marked{font-weight:bold}";

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<title>{title} - Gemini Chat</title>\n{head_extra}<style>{STYLE}</style>\n</head>\n<body>\n\
<nav><a href=\"{CHAT_PATH}\">Chat</a><a href=\"{LOGIN_PATH}\">Login</a></nav>\n{body}</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn post_button(action: &str, label: &str, class: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\"><button type=\"submit\" class=\"{}\">{}</button></form>",
        action,
        class,
        escape_html(label)
    )
}

fn notice(notification: &Notification) -> String {
    let class = match notification.kind {
        NotificationKind::Success => "success",
        NotificationKind::Error => "error",
    };
    format!(
        "<div class=\"notice {}\" role=\"status\">{}</div>\n",
        class,
        escape_html(&notification.message)
    )
}

fn actions(index: usize, feedback: Option<Feedback>, affordances: Affordances) -> String {
    let mut out = String::from("<div class=\"actions\">");
    if affordances.copy {
        out.push_str(&post_button(&format!("{CHAT_PATH}/copy/{index}"), "Copy", ""));
    }
    if affordances.download {
        out.push_str(&post_button(&format!("{CHAT_PATH}/download/{index}"), "Download", ""));
    }
    if affordances.regenerate {
        out.push_str(&post_button(&format!("{CHAT_PATH}/regenerate"), "Regenerate", ""));
    }
    if affordances.feedback {
        for (kind, label) in [(Feedback::Up, "👍"), (Feedback::Down, "👎")] {
            let class = if feedback == Some(kind) { "marked" } else { "" };
            out.push_str(&post_button(
                &format!("{CHAT_PATH}/feedback/{index}/{}", kind.as_str()),
                label,
                class,
            ));
        }
    }
    out.push_str("</div>\n");
    out
}

fn query_block(query: &str) -> String {
    format!("<div class=\"query\">{}</div>\n", escape_html(query))
}

fn live_block(live: &LiveFrame) -> String {
    match live {
        LiveFrame::Greeting { message } => {
            format!("<div class=\"greeting\">{}</div>\n", escape_html(message))
        }
        LiveFrame::Echo { query } => format!("<div class=\"entry\">{}</div>\n", query_block(query)),
        LiveFrame::Thinking {
            query,
            placeholder,
            ..
        } => format!(
            "<div class=\"entry\">{}<div class=\"thinking\">{}</div></div>\n",
            query_block(query),
            escape_html(placeholder)
        ),
        LiveFrame::Failed {
            index,
            query,
            message,
            feedback,
            affordances,
        } => format!(
            "<div class=\"entry\">{}<div class=\"error\">{}</div>{}</div>\n",
            query_block(query),
            escape_html(message),
            actions(*index, *feedback, *affordances)
        ),
    }
}

/// The chat page. While a request is pending the page reloads itself.
pub fn chat_page(view: &ChatView, flash: Option<&Notification>) -> String {
    let mut body = String::from("<h1>Gemini Chat</h1>\n");

    if let Some(notification) = flash {
        body.push_str(&notice(notification));
    }

    body.push_str("<main>\n");
    for entry in &view.entries {
        body.push_str("<div class=\"entry\">");
        body.push_str(&query_block(&entry.query));
        body.push_str("<div class=\"answer\">");
        for line in &entry.answer_lines {
            body.push_str(&format!("<p>{}</p>", escape_html(line)));
        }
        body.push_str("</div>");
        body.push_str(&actions(entry.index, entry.feedback, entry.affordances));
        body.push_str("</div>\n");
    }
    if let Some(live) = &view.live {
        body.push_str(&live_block(live));
    }
    body.push_str("</main>\n");

    let disabled = if view.form.disabled { " disabled" } else { "" };
    body.push_str("<div class=\"controls\">");
    body.push_str(&format!(
        "<form method=\"post\" action=\"{CHAT_PATH}/history\"><button type=\"submit\"{disabled}>Load history</button></form>"
    ));
    body.push_str(&post_button(&format!("{CHAT_PATH}/reset"), "Reset", ""));
    body.push_str("</div>\n");

    body.push_str(&format!(
        "<form method=\"post\" action=\"{CHAT_PATH}\" class=\"prompt\">\
<input type=\"text\" name=\"prompt\" value=\"{}\" placeholder=\"{}\" autofocus{disabled}>\
<button type=\"submit\"{disabled}>Send</button></form>\n",
        escape_html(&view.form.value),
        escape_html(view.form.placeholder),
    ));

    let head_extra = if view.form.disabled {
        format!("<meta http-equiv=\"refresh\" content=\"{PENDING_REFRESH_SECS}\">\n")
    } else {
        String::new()
    };

    layout(Page::Chat.title(), &head_extra, &body)
}

pub fn login_page() -> String {
    layout(
        Page::Login.title(),
        "",
        &format!(
            "<h1>Login</h1>\n<p>Sign-in is not available yet.</p>\n<p><a href=\"{CHAT_PATH}\">Back to chat</a></p>\n"
        ),
    )
}

pub fn not_found_page() -> String {
    layout(
        Page::NotFound.title(),
        "",
        &format!(
            "<h1>404</h1>\n<p>Page not found.</p>\n<p><a href=\"{CHAT_PATH}\">Back to chat</a></p>\n"
        ),
    )
}
