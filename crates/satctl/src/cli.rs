//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// SatFinder CLI
#[derive(Parser, Debug)]
#[command(name = "satctl")]
#[command(about = "SatFinder - satellite fact sheets from encyclopedia, entity store and orbital catalog", long_about = None)]
#[command(version = env!("SATCTL_VERSION"))]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Subcommand (if neither a subcommand nor a query is given, starts the interactive prompt)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Satellite name or NORAD catalog number
    pub query: Vec<String>,

    /// Output the fact sheet as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the complete article extract
    #[arg(long)]
    pub full: bool,

    /// Skip the catalog lookup with the raw query; use resolved titles only
    #[arg(long)]
    pub no_exact: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Language preferred for summaries (overrides config)
    #[arg(long, global = true, value_name = "LANG")]
    pub local_lang: Option<String>,

    /// Language preferred for catalog names (overrides config)
    #[arg(long, global = true, value_name = "LANG")]
    pub intl_lang: Option<String>,

    /// Path to config file (overrides $SATFINDER_CONFIG and defaults)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List sample queries
    Examples,

    /// Print the effective configuration as TOML
    Config,
}

impl Cli {
    /// Query words joined with single spaces, if any were given
    pub fn query_text(&self) -> Option<String> {
        let joined = self.query.join(" ");
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}
