use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pingd command-line interface
#[derive(Parser, Debug)]
#[command(name = "pingd")]
#[command(version)]
#[command(about = "A tiny HTTP service with a ping route and Prometheus metrics", long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file (default: ./config.toml when present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Print a sample configuration file, or write it to --output
    ConfigGen {
        /// Destination file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Load and validate the configuration, then print the resolved values
    CheckConfig,
}
