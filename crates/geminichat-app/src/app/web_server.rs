use anyhow::Result;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::web::{ChatSession, WebServer, WebServerConfig};

/// Run the web server
pub async fn run_web_server(cli: &Cli, config: AppConfig) -> Result<()> {
    println!("🌐 Starting Gemini Chat web server...");
    println!("   {}", config.describe());

    let session = ChatSession::new(config.controller(), config.model_client(), config.clipboard());

    let server = WebServer::new(
        WebServerConfig {
            bind_addr: cli.bind,
            web_dir: cli.web_dir.clone(),
        },
        session,
    );
    server.start().await?;

    Ok(())
}
