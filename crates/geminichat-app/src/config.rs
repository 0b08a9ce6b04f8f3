use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use geminichat_chat::{
    ArboardClipboard, Clipboard, CommandClipboard, ConversationController, FileStore,
    HistoryStore, MemoryStore,
};
use geminichat_llm_api::{BackendType, ClientFactory, ModelClient};

use crate::cli::Cli;

/// Where the history lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Single-turn mode, nothing is kept
    Disabled,
    Memory,
    File(PathBuf),
}

/// Application configuration derived from CLI arguments and environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendType,
    pub model: String,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub storage: StorageConfig,
    pub clipboard_command: Option<Vec<String>>,
}

/// Set up application configuration from CLI arguments
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    let backend = match cli.backend.as_deref() {
        Some(name) => match BackendType::from_str(name) {
            Some(backend) => backend,
            None => bail!("Unknown backend '{}' (expected gemini, openai or llama)", name),
        },
        None => BackendType::from_url(cli.api_url.as_deref()),
    };

    let storage = if cli.single_turn {
        StorageConfig::Disabled
    } else if cli.ephemeral {
        StorageConfig::Memory
    } else {
        let path = match &cli.store {
            Some(path) => path.clone(),
            None => FileStore::default_path()
                .context("Failed to get home directory; pass --store")?,
        };
        StorageConfig::File(path)
    };

    let clipboard_command = match cli.clipboard_command.as_deref() {
        Some(command) => {
            let parts: Vec<String> = command.split_whitespace().map(str::to_string).collect();
            if parts.is_empty() {
                bail!("--clipboard-command must not be empty");
            }
            Some(parts)
        }
        None => None,
    };

    // An empty key counts as no key; the client reports it on first use
    let api_key = cli.api_key.clone().filter(|k| !k.trim().is_empty());

    Ok(AppConfig {
        backend,
        model: cli.model.clone(),
        api_key,
        api_url: cli.api_url.clone(),
        storage,
        clipboard_command,
    })
}

impl AppConfig {
    pub fn model_client(&self) -> Arc<dyn ModelClient> {
        ClientFactory::create(
            self.backend,
            self.api_key.clone(),
            self.model.clone(),
            self.api_url.clone(),
        )
    }

    pub fn controller(&self) -> ConversationController {
        match &self.storage {
            StorageConfig::Disabled => ConversationController::single_turn(),
            StorageConfig::Memory => {
                ConversationController::with_history(HistoryStore::new(MemoryStore::new()))
            }
            StorageConfig::File(path) => {
                ConversationController::with_history(HistoryStore::new(FileStore::new(path)))
            }
        }
    }

    pub fn clipboard(&self) -> Arc<dyn Clipboard> {
        match &self.clipboard_command {
            Some(parts) => Arc::new(CommandClipboard::new(parts[0].clone(), parts[1..].to_vec())),
            None => Arc::new(ArboardClipboard::new()),
        }
    }

    /// One-line description for start-up banners
    pub fn describe(&self) -> String {
        let storage = match &self.storage {
            StorageConfig::Disabled => "single-turn, no history".to_string(),
            StorageConfig::Memory => "history in memory".to_string(),
            StorageConfig::File(path) => format!("history in {}", path.display()),
        };
        format!("{} via {} • {}", self.model, self.backend.as_str(), storage)
    }
}
