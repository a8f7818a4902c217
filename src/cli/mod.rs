//! CLI module for J.A.R.V.I.S
//!
//! Provides command-line interface parsing for the jarvis-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// J.A.R.V.I.S - Multi-agent personal assistant server
///
/// Routes requests through a planner to task, tool, live data and search
/// agents, with multi-source search aggregation for factual questions.
#[derive(Parser, Debug)]
#[command(
    name = "jarvis-server",
    version,
    about = "J.A.R.V.I.S - Multi-agent personal assistant server",
    long_about = "Routes natural-language requests through a planner to specialist agents.\n\
                  Factual questions are answered from DuckDuckGo and Wikipedia with an LLM summary.\n\n\
                  Run without arguments to start the server.",
    after_help = "EXAMPLES:\n    \
                  jarvis-server                                # Start the server (reads jarvis.toml)\n    \
                  jarvis-server --config my.toml               # Use a custom config file\n    \
                  jarvis-server ask \"Who is Ada Lovelace?\"     # One-shot question through the planner\n    \
                  jarvis-server ask \"stock: MSFT\" --agent api  # Ask one agent directly\n    \
                  jarvis-server config --validate              # Check configuration and keys"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "jarvis.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Send one message and print the reply
    Ask {
        /// Message to send
        message: String,

        /// Agent key to ask directly; `auto` routes through the planner
        #[arg(short, long, default_value = "auto")]
        agent: String,
    },

    /// List the registered agents
    Agents,

    /// Show configuration information
    Config {
        /// Validate the configuration file and report warnings
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults() {
        let cli = Cli::try_parse_from(["jarvis-server"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("jarvis.toml"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_ask_with_agent() {
        let cli = Cli::try_parse_from([
            "jarvis-server",
            "--no-color",
            "ask",
            "weather: Oslo",
            "--agent",
            "api",
        ])
        .unwrap();

        assert!(cli.no_color);
        match cli.command {
            Some(Commands::Ask { message, agent }) => {
                assert_eq!(message, "weather: Oslo");
                assert_eq!(agent, "api");
            }
            other => panic!("Expected ask command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli =
            Cli::try_parse_from(["jarvis-server", "config", "--validate", "-c", "alt.toml"])
                .unwrap();
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        assert!(matches!(cli.command, Some(Commands::Config { validate: true })));
    }
}
