//! Generic configuration parsing.
//!
//! ```rust,no_run
//! use resmeta_cli::config::parse_config;
//! use serde::Deserialize;
//! use std::path::Path;
//!
//! #[derive(Deserialize)]
//! struct Settings {
//!     paths: Vec<String>,
//! }
//!
//! # fn example() -> anyhow::Result<()> {
//! let settings: Settings = parse_config(Path::new("resmeta.toml"))?;
//! println!("{} mapping paths", settings.paths.len());
//! # Ok(())
//! # }
//! ```
//!
//! Errors carry the file path as context:
//! ```text
//! Failed to parse config file: /path/to/resmeta.toml
//! Caused by:
//!     invalid type: integer `1`, expected a sequence
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Read and deserialize a TOML file.
///
/// # Errors
///
/// Fails when the file cannot be read or is not valid TOML for `T`.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Debug, serde::Deserialize)]
    struct TestConfig {
        paths: Vec<String>,
        strict: bool,
    }

    #[test]
    fn test_parse_config() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("resmeta.toml");
        std::fs::write(&config_path, "paths = [\"a.yaml\", \"b.xml\"]\nstrict = true\n").unwrap();

        let config: TestConfig = parse_config(&config_path).unwrap();
        assert_eq!(config.paths, vec!["a.yaml", "b.xml"]);
        assert!(config.strict);
    }

    #[test]
    fn test_parse_config_missing_file() {
        let temp = tempdir().unwrap();
        let result: Result<TestConfig> = parse_config(&temp.path().join("missing.toml"));

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to read config file"));
    }

    #[test]
    fn test_parse_config_invalid_toml() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("resmeta.toml");
        std::fs::write(&config_path, "paths = [unclosed").unwrap();

        let result: Result<TestConfig> = parse_config(&config_path);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to parse config file"));
    }
}
