use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "vaultcmd",
    bin_name = "vaultcmd",
    version,
    about = "Apply note and task commands to a Markdown vault",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault root directory (overrides config file and environment)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub vault: Option<PathBuf>,

    /// Config file to load instead of the default location
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true, help_heading = "Options")]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate and apply a command envelope
    #[command(display_order = 1)]
    Apply {
        /// JSON file holding the envelope, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
    },

    /// Validate an envelope and print its canonical form without applying it
    #[command(display_order = 2)]
    Validate {
        /// JSON file holding the envelope, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
    },

    /// Show the effective configuration
    #[command(display_order = 3)]
    Config,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
