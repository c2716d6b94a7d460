//! CLI commands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Statiki - publish a GitHub repository as a site
#[derive(Parser, Debug)]
#[command(name = "statiki")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of searching for statiki.{jsonc,json,yml,yaml,toml}
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Server base URL (e.g., http://127.0.0.1:5000)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Namespace shown in front of repository names (e.g., octocat/)
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Log at debug level to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create and publish a single repository (interactive form if omitted)
    Create {
        /// Repository name, without the owner prefix
        name: Option<String>,

        /// Answer yes to the confirmation prompt
        #[arg(short, long, conflicts_with = "decline")]
        yes: bool,

        /// Answer no to the confirmation prompt
        #[arg(long)]
        decline: bool,

        /// Print the settled state as JSON instead of status lines
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (tokens are never shown)
    Show,
    /// Show which config file was loaded
    Path,
}

/// How the confirmation prompt is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Interactive,
    AlwaysYes,
    AlwaysNo,
}

impl PromptMode {
    pub fn from_flags(yes: bool, decline: bool) -> Self {
        match (yes, decline) {
            (true, _) => Self::AlwaysYes,
            (_, true) => Self::AlwaysNo,
            _ => Self::Interactive,
        }
    }
}
