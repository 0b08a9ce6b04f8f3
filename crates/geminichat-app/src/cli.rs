use clap::Parser;
use clap_complete::Shell;
use std::net::SocketAddr;
use std::path::PathBuf;

use geminichat_types::DEFAULT_MODEL;

/// CLI arguments for geminichat
#[derive(Parser, Debug)]
#[command(name = "geminichat")]
#[command(about = "Gemini Chat - ask a generative language model, keep the history locally")]
#[command(version)]
pub struct Cli {
    /// Serve the web interface instead of the terminal REPL
    #[arg(long)]
    pub web: bool,

    /// Address the web interface listens on
    #[arg(long, value_name = "ADDR", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Directory of static assets served under /static
    #[arg(long, value_name = "DIR")]
    pub web_dir: Option<PathBuf>,

    /// API key for the model backend
    #[arg(long, value_name = "KEY", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name
    #[arg(long, value_name = "MODEL", env = "GEMINICHAT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Backend type (gemini, openai, llama)
    #[arg(long, value_name = "BACKEND", env = "GEMINICHAT_BACKEND")]
    pub backend: Option<String>,

    /// Custom API URL; without --backend the backend is guessed from it
    #[arg(long, value_name = "URL", env = "GEMINICHAT_API_URL")]
    pub api_url: Option<String>,

    /// Keep only the latest exchange and never touch local storage
    #[arg(long)]
    pub single_turn: bool,

    /// Path of the local storage file (default: ~/.geminichat/local_storage.json)
    #[arg(long, value_name = "PATH", env = "GEMINICHAT_STORE")]
    pub store: Option<PathBuf>,

    /// Keep history in memory only for this run
    #[arg(long, conflicts_with = "store")]
    pub ephemeral: bool,

    /// Command that receives copied text on stdin instead of the desktop clipboard (e.g. "wl-copy")
    #[arg(long, value_name = "COMMAND")]
    pub clipboard_command: Option<String>,

    /// Generate shell completions
    #[arg(long, value_enum)]
    pub generate: Option<Shell>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
