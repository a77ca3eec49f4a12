//! Project configuration (`resmeta.toml`).
//!
//! ```toml
//! paths = ["config/resources", "config/api/*.yaml"]
//! parameter_files = ["config/parameters.yaml"]
//!
//! [parameters]
//! "app.prefix" = "/api"
//! page_size = 30
//! ```
//!
//! Relative entries in `paths` and `parameter_files` are relative to the directory
//! holding the configuration file. The `[parameters]` table is loaded first, then
//! each parameter file in order, so later sources win.

mod parser;

pub use parser::parse_config;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::CONFIG_FILE_NAME;
use crate::parameters::ParameterBag;

/// Contents of `resmeta.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Mapping files, directories or glob patterns
    pub paths: Vec<String>,
    /// YAML, JSON or TOML files holding parameters
    pub parameter_files: Vec<PathBuf>,
    /// Inline parameters
    pub parameters: Map<String, Value>,
}

impl ProjectConfig {
    /// Load a configuration file, anchoring relative paths at its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Self = parse_config(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.anchor_paths(base);
        debug!(
            config = %path.display(),
            paths = config.paths.len(),
            parameter_files = config.parameter_files.len(),
            "Loaded project configuration"
        );
        Ok(config)
    }

    /// Load `explicit` if given, else `resmeta.toml` in `dir` when it exists.
    ///
    /// A missing explicit file is an error; a missing default file yields an empty
    /// configuration.
    pub fn locate(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = dir.join(CONFIG_FILE_NAME);
        if default_path.is_file() {
            Self::load(&default_path)
        } else {
            debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
            Ok(Self::default())
        }
    }

    /// Build the parameter bag: inline `[parameters]`, then each parameter file.
    pub fn parameter_bag(&self) -> Result<ParameterBag> {
        let mut bag = ParameterBag::from(self.parameters.clone());
        for file in &self.parameter_files {
            let loaded = ParameterBag::from_file(file)
                .with_context(|| format!("Failed to load parameter file: {}", file.display()))?;
            debug!(file = %file.display(), parameters = loaded.len(), "Loaded parameter file");
            bag.extend(loaded);
        }
        Ok(bag)
    }

    /// Whether any parameter source is configured
    #[must_use]
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty() || !self.parameter_files.is_empty()
    }

    fn anchor_paths(&mut self, base: &Path) {
        if base.as_os_str().is_empty() {
            return;
        }
        for entry in &mut self.paths {
            if Path::new(entry.as_str()).is_relative() {
                *entry = base.join(entry.as_str()).to_string_lossy().into_owned();
            }
        }
        for file in &mut self.parameter_files {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
    }
}
