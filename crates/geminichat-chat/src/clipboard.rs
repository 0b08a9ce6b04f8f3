use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use geminichat_types::ClipboardError;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Destination of the copy affordance
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard, opened on first use and kept open afterwards
#[derive(Default)]
pub struct ArboardClipboard {
    inner: Mutex<Option<arboard::Clipboard>>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Clipboard for ArboardClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            *inner = Some(clipboard);
        }

        match inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::Failed(e.to_string())),
            None => Err(ClipboardError::Unavailable("clipboard not open".to_string())),
        }
    }
}

/// Copies by piping text into a copy command such as `wl-copy` or `xclip`
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ClipboardError::Unavailable(format!("{}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ClipboardError::Failed(e.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError::Failed(e.to_string()))?;

        if !status.success() {
            return Err(ClipboardError::Failed(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}
