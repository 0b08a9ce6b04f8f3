//! geminichat application library
//!
//! Command line, configuration, and the two front ends (terminal REPL and
//! local web UI) built on top of the conversation controller.

pub use geminichat_chat as chat;
pub use geminichat_llm_api as llm_api;
pub use geminichat_types as types;

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod web;

pub use app::{run_repl_mode, run_web_server};
pub use cli::Cli;
pub use config::{setup_from_cli, AppConfig, StorageConfig};
pub use navigation::{resolve, Navigation, Page};
