use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use geminichat_chat::{render, Clipboard, ConversationController, Notification};
use geminichat_llm_api::ModelClient;
use geminichat_types::{ChatError, Feedback};

use crate::app::transcript::{format_notification, format_page, format_view};
use crate::config::AppConfig;
use crate::navigation::{page_for, Page};

/// A line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Submit(String),
    Regenerate,
    LoadHistory,
    Reset,
    /// Zero-based entry index
    Copy(usize),
    Download(usize),
    Feedback(usize, Feedback),
    Go(String),
    Help,
    Quit,
    Empty,
    Invalid(String),
}

/// Parse one input line. Entry numbers are shown and typed 1-based.
pub fn parse_command(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Empty;
    }
    if trimmed == "exit" || trimmed == "quit" {
        return ReplCommand::Quit;
    }
    if !trimmed.starts_with('/') {
        return ReplCommand::Submit(line.to_string());
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (command, args.as_slice()) {
        ("/regenerate", []) => ReplCommand::Regenerate,
        ("/history", []) => ReplCommand::LoadHistory,
        ("/reset", []) => ReplCommand::Reset,
        ("/help", []) => ReplCommand::Help,
        ("/quit" | "/exit", []) => ReplCommand::Quit,
        ("/go", [path]) => ReplCommand::Go(path.to_string()),
        ("/copy", [n]) => entry_index(n).map_or_else(ReplCommand::Invalid, ReplCommand::Copy),
        ("/download", [n]) => {
            entry_index(n).map_or_else(ReplCommand::Invalid, ReplCommand::Download)
        }
        ("/feedback", [n, kind]) => match (entry_index(n), Feedback::from_str(kind)) {
            (Ok(index), Some(feedback)) => ReplCommand::Feedback(index, feedback),
            (Err(msg), _) => ReplCommand::Invalid(msg),
            (_, None) => ReplCommand::Invalid(format!("Unknown feedback '{}', use up or down", kind)),
        },
        _ => ReplCommand::Invalid(format!("Unknown command '{}'. Type /help.", trimmed)),
    }
}

fn entry_index(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("'{}' is not an entry number", arg)),
    }
}

fn print_help() {
    println!("{}", "Type a question and press Enter to ask it.".bright_black());
    println!("{}", "  /regenerate          ask the last question again".bright_black());
    println!("{}", "  /history             load the saved history".bright_black());
    println!("{}", "  /reset               start over (saved history is kept)".bright_black());
    println!("{}", "  /copy N              copy entry N to the clipboard".bright_black());
    println!("{}", "  /download N          download entry N".bright_black());
    println!("{}", "  /feedback N up|down  mark entry N".bright_black());
    println!("{}", "  /go PATH             open /Chat, /Login or /404".bright_black());
    println!("{}", "  exit                 quit".bright_black());
}

fn print_error(err: &ChatError) {
    println!("{}", format_notification(&Notification::error(err.to_string())));
}

/// Run interactive REPL mode
pub async fn run_repl_mode(config: AppConfig) -> Result<()> {
    println!("{}", "🤖 Gemini Chat".bright_cyan().bold());
    println!("{}", config.describe().bright_black());
    println!("{}", "Type /help for commands, 'exit' to quit\n".bright_black());

    let client = config.model_client();
    let clipboard = config.clipboard();
    let mut chat = config.controller();
    let mut page = Page::Chat;

    print!("{}", format_view(&render(&chat)));

    let mut rl = DefaultEditor::new()?;

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match parse_command(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Empty => continue,
            ReplCommand::Help => print_help(),
            ReplCommand::Invalid(msg) => println!("{}", msg.yellow()),
            ReplCommand::Go(path) => {
                page = page_for(&path);
                if page != Page::Chat {
                    print!("{}", format_page(page));
                    continue;
                }
            }
            command if page != Page::Chat => {
                log::debug!("Ignoring {:?} outside the chat page", command);
                println!("{}", "Not on the chat page. Use /go /Chat first.".yellow());
                continue;
            }
            command => {
                handle_chat_command(command, &mut chat, client.as_ref(), clipboard.as_ref()).await;
            }
        }

        if page == Page::Chat {
            print!("{}", format_view(&render(&chat)));
        }
    }

    println!("{}", "Goodbye!".bright_black());
    Ok(())
}

async fn handle_chat_command(
    command: ReplCommand,
    chat: &mut ConversationController,
    client: &dyn ModelClient,
    clipboard: &dyn Clipboard,
) {
    let result = match command {
        ReplCommand::Submit(text) => match chat.set_input(text) {
            Ok(()) => {
                println!("{}", "Thinking...".bright_black().italic());
                chat.submit(client).await.map(|_| ())
            }
            Err(e) => Err(e),
        },
        ReplCommand::Regenerate => chat.regenerate(client).await.map(|_| ()),
        ReplCommand::LoadHistory => chat.load_history().map(|n| {
            println!("{}", format!("Loaded {} saved exchanges", n).bright_black());
        }),
        ReplCommand::Reset => {
            chat.reset();
            Ok(())
        }
        ReplCommand::Copy(index) => chat.copy(index, clipboard).await.map(|notification| {
            println!("{}", format_notification(&notification));
        }),
        ReplCommand::Download(index) => chat.download(index),
        ReplCommand::Feedback(index, feedback) => chat.feedback(index, feedback).map(|_| ()),
        _ => Ok(()),
    };

    if let Err(e) = result {
        print_error(&e);
    }
}
