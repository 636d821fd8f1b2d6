//! Strictly Mastermind - terminal client entry point.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use strictly_mastermind::cli::{Cli, Command};
use strictly_mastermind::tui::{HELP_LINES, run_tui};
use strictly_mastermind::{ClientConfig, init_file_logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ClientConfig::load(cli.config.as_deref())?.with_env_overrides();
    if let Some(url) = cli.server_url {
        config.set_server_url(url);
    }
    if let Some(path) = cli.log_file {
        config.set_log_file(path);
    }
    config.validate()?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Rules => {
            for line in HELP_LINES {
                println!("{}", line);
            }
            Ok(())
        }
        Command::Play => {
            init_file_logging(config.log_file(), config.log_filter()).with_context(|| {
                format!("Failed to open log file {}", config.log_file().display())
            })?;
            info!(server_url = %config.server_url(), "Starting strictly_mastermind");
            run_tui(&config).await
        }
    }
}
