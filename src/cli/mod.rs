//! CLI module for the work-order crew
//!
//! Provides command-line interface parsing for the `workorder` binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Work-order crew
///
/// Answers a question about a home inspection report and drafts an email to
/// a contractor requesting a quote for the issues found.
#[derive(Parser, Debug)]
#[command(
    name = "workorder",
    version,
    about = "Draft contractor work-order emails from a home inspection report",
    after_help = "EXAMPLES:\n    \
                  workorder                                # Ask a question about the configured report\n    \
                  workorder --document report.pdf          # Use a different report\n    \
                  workorder init --provider openai         # Scaffold workorder.toml\n    \
                  workorder config --validate              # Check the configuration"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "workorder.toml", global = true)]
    pub config: PathBuf,

    /// Inspection report to query (overrides [document] path)
    #[arg(short, long, global = true)]
    pub document: Option<PathBuf>,

    /// Enable debug logging
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
    /// Create workorder.toml and .env.example
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// LLM provider to configure (ollama or openai)
        #[arg(long, default_value = "ollama")]
        provider: String,
    },

    /// Show the effective configuration
    Config {
        /// Only validate, print nothing on success
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
