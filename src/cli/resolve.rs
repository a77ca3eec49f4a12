//! `resmeta resolve`: substitute placeholders in a single value.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use super::common::{OutputFormat, ParameterArgs};
use crate::config::ProjectConfig;
use crate::resolver::{PlaceholderResolver, Resolved};

/// Resolve `%name%` placeholders in a value and show the parameters it used.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Value to resolve, e.g. '%api_prefix%/books'
    value: String,

    /// Parse VALUE as JSON so arrays and objects are resolved recursively
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    parameters: ParameterArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

impl ResolveCommand {
    pub fn execute(self, config: ProjectConfig) -> Result<()> {
        println!("{}", self.run(&config)?);
        Ok(())
    }

    fn run(&self, config: &ProjectConfig) -> Result<String> {
        let raw = if self.json {
            serde_json::from_str::<Value>(&self.value)
                .with_context(|| format!("VALUE is not valid JSON: {}", self.value))?
        } else {
            Value::String(self.value.clone())
        };

        let resolver = PlaceholderResolver::new(self.parameters.source(config)?);
        let resolved: Resolved = resolver
            .resolve(&raw)
            .with_context(|| format!("Failed to resolve \"{}\"", self.value))?;

        self.format.render(&resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MetadataError;
    use serde_json::json;

    fn command(value: &str, json: bool, overrides: &[(&str, Value)]) -> ResolveCommand {
        ResolveCommand {
            value: value.to_string(),
            json,
            parameters: ParameterArgs {
                overrides: overrides.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect(),
                ..ParameterArgs::default()
            },
            format: OutputFormat::Json,
        }
    }

    fn run(cmd: &ResolveCommand) -> Value {
        serde_json::from_str(&cmd.run(&ProjectConfig::default()).unwrap()).unwrap()
    }

    #[test]
    fn test_resolve_string() {
        let cmd = command("%prefix%/books, 100%% real", false, &[("prefix", json!("/api"))]);
        assert_eq!(
            run(&cmd),
            json!({"value": "/api/books, 100% real", "parameters": {"prefix": "/api"}})
        );
    }

    #[test]
    fn test_resolve_json_container() {
        let cmd = command(
            r#"{"path": "%prefix%/books", "limits": ["%max%", 5]}"#,
            true,
            &[("prefix", json!("/api")), ("max", json!(30))],
        );
        assert_eq!(
            run(&cmd),
            json!({
                "value": {"path": "/api/books", "limits": ["30", 5]},
                "parameters": {"prefix": "/api", "max": 30}
            })
        );
    }

    #[test]
    fn test_resolve_without_parameters_is_identity() {
        let cmd = command("%anything%", false, &[]);
        assert_eq!(run(&cmd), json!({"value": "%anything%", "parameters": {}}));
    }

    #[test]
    fn test_resolve_env_is_rejected() {
        let cmd = command("%env(HOME)%", false, &[("x", json!(1))]);
        let err = cmd.run(&ProjectConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MetadataError>(),
            Some(MetadataError::ForbiddenDynamicReference { .. })
        ));
    }

    #[test]
    fn test_resolve_invalid_json() {
        let cmd = command("{not json", true, &[]);
        assert!(cmd.run(&ProjectConfig::default()).is_err());
    }
}
