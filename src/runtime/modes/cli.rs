//! CLI mode
//!
//! One-shot configuration commands. Output goes to stdout so it can be
//! redirected into a file.

use colored::Colorize;
use std::path::Path;

use crate::cli::Commands;
use crate::config::StaticConfig;
use crate::errors::Result;

/// Run a CLI command
pub fn run_cli(command: &Commands, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Serve => Ok(()),
        Commands::ConfigGen { output } => match output {
            Some(path) => {
                StaticConfig::default().save_to_file(path)?;
                println!(
                    "{} Sample configuration written to {}",
                    "✓".green().bold(),
                    path.display()
                );
                Ok(())
            }
            None => {
                print!("{}", StaticConfig::generate_sample_config()?);
                Ok(())
            }
        },
        Commands::CheckConfig => {
            let config = StaticConfig::load(config_path)?;
            eprintln!("{} Configuration is valid", "✓".green().bold());
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
