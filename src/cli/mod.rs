//! Command-line interface for resmeta.
//!
//! # Commands
//!
//! - `extract` - parse mapping files and print the resources they declare
//! - `resolve` - substitute placeholders in one value
//!
//! ```bash
//! # Use paths and parameters from ./resmeta.toml
//! resmeta extract
//!
//! # Ad-hoc run over a directory with a parameter file
//! resmeta extract --path config/resources --params config/parameters.yaml --format yaml
//!
//! # Check what a placeholder expands to
//! resmeta resolve '%api_prefix%/books' --param api_prefix=/api
//! ```
//!
//! Both commands read `resmeta.toml` from the current directory (or the file given
//! with `--config`) before applying their own flags.

pub mod common;
mod extract;
mod resolve;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ProjectConfig;
use crate::constants::DEFAULT_LOG_LEVEL;

pub use extract::ExtractCommand;
pub use resolve::ResolveCommand;

/// Process-level settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter to install, or `None` to honor `RUST_LOG`
    pub log_level: Option<String>,
}

impl CliConfig {
    /// The filter directive to hand to the tracing subscriber
    #[must_use]
    pub fn log_filter(&self) -> String {
        self.log_level.clone().unwrap_or_else(|| {
            std::env::var(crate::constants::LOG_ENV_VAR)
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
        })
    }
}

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(
    name = "resmeta",
    about = "Extract API resource metadata and resolve %parameter% placeholders",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug logging (equivalent to `RUST_LOG=debug`)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Project configuration file [default: ./resmeta.toml if present]
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract resource metadata from mapping files
    Extract(ExtractCommand),

    /// Resolve placeholders in a single value
    Resolve(ResolveCommand),
}

impl Cli {
    /// Settings implied by `--verbose` / `--quiet`
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
        }
    }

    /// Load the project configuration and run the selected command.
    pub fn execute(self) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to read the current directory")?;
        let config = ProjectConfig::locate(self.config.as_deref(), &cwd)?;

        match self.command {
            Commands::Extract(cmd) => cmd.execute(config),
            Commands::Resolve(cmd) => cmd.execute(config),
        }
    }
}
