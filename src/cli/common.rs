//! Arguments and helpers shared by the subcommands.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::config::ProjectConfig;
use crate::parameters::{ParameterBag, ParameterSource};

/// Parameter flags, layered over the project configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ParameterArgs {
    /// Load parameters from a YAML, JSON or TOML file (repeatable)
    #[arg(long = "params", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Set a single parameter, overriding every file (repeatable)
    ///
    /// The value is read as a YAML scalar, so `--param limit=30` is a number and
    /// `--param name=books` a string.
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_parameter)]
    pub overrides: Vec<(String, Value)>,

    /// Ignore every parameter source and leave placeholders untouched
    #[arg(long, conflicts_with_all = ["files", "overrides"])]
    pub no_parameters: bool,
}

impl ParameterArgs {
    /// Build the parameter source from `config` plus these flags.
    ///
    /// Returns `None` when nothing is configured, which disables substitution.
    pub fn source(&self, config: &ProjectConfig) -> Result<Option<Arc<dyn ParameterSource>>> {
        if self.no_parameters
            || (!config.has_parameters() && self.files.is_empty() && self.overrides.is_empty())
        {
            debug!("No parameter source configured, placeholders are left as-is");
            return Ok(None);
        }

        let mut bag = config.parameter_bag()?;
        for file in &self.files {
            let loaded = ParameterBag::from_file(file)
                .with_context(|| format!("Failed to load parameter file: {}", file.display()))?;
            bag.extend(loaded);
        }
        for (name, value) in &self.overrides {
            bag.set(name.clone(), value.clone());
        }

        debug!(parameters = bag.len(), "Parameter source ready");
        Ok(Some(Arc::new(bag)))
    }
}

/// Parse a `NAME=VALUE` flag.
pub fn parse_parameter(raw: &str) -> std::result::Result<(String, Value), String> {
    let (name, value) =
        raw.split_once('=').ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("parameter name is empty in '{raw}'"));
    }

    let value = match serde_yaml::from_str::<Value>(value) {
        Ok(scalar @ (Value::Bool(_) | Value::Number(_) | Value::String(_))) => scalar,
        _ => Value::String(value.to_string()),
    };
    Ok((name.to_string(), value))
}

/// Output format for command results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// YAML
    Yaml,
}

impl OutputFormat {
    /// Serialize `value` in this format
    pub fn render<T: Serialize>(self, value: &T) -> Result<String> {
        match self {
            Self::Json => {
                serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
            }
            Self::Yaml => serde_yaml::to_string(value)
                .map(|s| s.trim_end().to_string())
                .context("Failed to serialize output as YAML"),
        }
    }
}
