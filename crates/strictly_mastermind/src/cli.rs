//! Command-line interface for strictly_mastermind.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Strictly Mastermind - terminal client for a remote code-breaking server
#[derive(Parser, Debug)]
#[command(name = "strictly_mastermind")]
#[command(about = "Play Mastermind against a remote server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Server base URL (overrides config and MASTERMIND_SERVER_URL)
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Log file path (overrides config and MASTERMIND_LOG_FILE)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the terminal UI
    Play,

    /// Print the rules and exit
    Rules,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_none() {
        let cli = Cli::parse_from(["strictly_mastermind"]);
        assert_eq!(cli.command, None);
        assert_eq!(cli.server_url, None);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "strictly_mastermind",
            "play",
            "--server-url",
            "http://localhost:8080",
        ]);
        assert_eq!(cli.command, Some(Command::Play));
        assert_eq!(cli.server_url.as_deref(), Some("http://localhost:8080"));
    }
}
