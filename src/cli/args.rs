//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Model to use (e.g., gpt-3.5-turbo, gpt-4o-mini)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Service root; requests go to <BASE_URL>/v1/chat/completions
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Fail on non-success HTTP statuses instead of reading the body
    #[arg(long, global = true)]
    pub strict_status: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            log_file: self.log_file.clone(),
            strict_status: self.strict_status,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one prompt and stream the reply to stdout
    Ask {
        /// The prompt to send
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigSubcommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommands {
    /// Initialize a new config file
    Init,
    /// Print config file location
    Where,
    /// Print the effective configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::parse_from(["parley", "ask", "hello", "there"]);
        match cli.command {
            Some(Commands::Ask { prompt }) => assert_eq!(prompt.join(" "), "hello there"),
            other => panic!("Expected ask, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_become_overrides() {
        let cli = Cli::parse_from([
            "parley",
            "--model",
            "gpt-4o",
            "--strict-status",
            "config",
            "show",
        ]);
        let overrides = cli.overrides();

        assert_eq!(overrides.model.as_deref(), Some("gpt-4o"));
        assert!(overrides.strict_status);
        assert!(overrides.base_url.is_none());
    }
}
