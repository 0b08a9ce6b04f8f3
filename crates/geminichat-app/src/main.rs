use anyhow::Result;
use clap::{CommandFactory, Parser};

use geminichat::logging::init_logging;
use geminichat::{run_repl_mode, run_web_server, setup_from_cli, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(shell) = cli.generate {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "geminichat", &mut std::io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose);

    let app_config = setup_from_cli(&cli)?;
    log::debug!("Configuration: {}", app_config.describe());

    if cli.web {
        return run_web_server(&cli, app_config).await;
    }

    run_repl_mode(app_config).await
}
