//! Mode routing
//!
//! This module provides unified entry points for the execution modes:
//! - Server mode (HTTP server, the default)
//! - CLI mode (configuration helpers that exit immediately)

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::{build_app, run_server};

use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Server,
    Cli,
}

/// Detect which mode to run based on the parsed subcommand
///
/// No subcommand and `serve` both start the server; everything else is a
/// one-shot CLI command.
pub fn detect_mode(command: Option<&Commands>) -> Mode {
    match command {
        None | Some(Commands::Serve) => Mode::Server,
        Some(_) => Mode::Cli,
    }
}
