//! `resmeta extract`: print the resources declared in mapping files.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use super::common::{OutputFormat, ParameterArgs};
use crate::config::ProjectConfig;
use crate::core::MetadataError;
use crate::metadata::{FormatExtractor, MetadataExtractor, ResourceMetadata};
use crate::resolver::CollectedParameters;
use crate::utils::expand_mapping_paths;

/// Extract resource metadata from mapping files.
///
/// Paths given with `--path` are added after the `paths` of `resmeta.toml`.
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// Mapping file, directory or glob pattern (repeatable)
    #[arg(short, long = "path", value_name = "PATH")]
    paths: Vec<String>,

    #[command(flatten)]
    parameters: ParameterArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct ExtractOutput<'a> {
    resources: &'a [ResourceMetadata],
    parameters: &'a CollectedParameters,
}

impl ExtractCommand {
    pub fn execute(self, config: ProjectConfig) -> Result<()> {
        println!("{}", self.run(&config)?);
        Ok(())
    }

    fn run(&self, config: &ProjectConfig) -> Result<String> {
        let entries: Vec<&str> =
            config.paths.iter().chain(&self.paths).map(String::as_str).collect();
        if entries.is_empty() {
            return Err(MetadataError::Config {
                message: "No mapping paths given. Pass --path or set `paths` in resmeta.toml"
                    .to_string(),
            }
            .into());
        }

        let files = expand_mapping_paths(&entries)?;
        let source = self.parameters.source(config)?;
        let mut extractor = MetadataExtractor::new(files, FormatExtractor::new(), source);

        let count = extractor.resources()?.len();
        info!("Extracted {} resource(s)", count);

        self.format.render(&ExtractOutput {
            resources: extractor.cached().unwrap_or_default(),
            parameters: extractor.collected_parameters(),
        })
    }
}
