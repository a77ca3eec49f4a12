//! In-memory configuration parameters.

use serde_json::{Map, Value};
use std::path::Path;

use super::{ParameterSource, closest_names};
use crate::core::{MetadataError, Result};
use crate::metadata::yaml::is_blank_yaml;

/// Configuration parameters held in insertion order.
///
/// This is the "configuration container" flavor of parameter source: values are
/// plain configuration data, looked up by exact (case-sensitive) name. Later
/// insertions override earlier ones, which lets `resmeta.toml`, parameter files and
/// `--param` flags be layered in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    parameters: Map<String, Value>,
}

impl ParameterBag {
    /// Create an empty bag
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.parameters.insert(name.into(), value);
    }

    /// Copy every parameter of `other` into this bag, overriding existing names
    pub fn extend(&mut self, other: ParameterBag) {
        for (name, value) in other.parameters {
            self.parameters.insert(name, value);
        }
    }

    /// Whether a parameter is defined
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the bag holds no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Iterate over parameter names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    /// Load parameters from a YAML, JSON or TOML file, selected by extension.
    ///
    /// The document must be a mapping. If it has a top-level `parameters` mapping
    /// (the usual container configuration layout), that mapping is used instead of
    /// the whole document.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        let (format, parsed) = match extension {
            "yaml" | "yml" if is_blank_yaml(&content) => ("YAML", Ok(Value::Null)),
            "yaml" | "yml" => {
                ("YAML", serde_yaml::from_str::<Value>(&content).map_err(|e| e.to_string()))
            }
            "json" => ("JSON", serde_json::from_str::<Value>(&content).map_err(|e| e.to_string())),
            "toml" => ("TOML", toml::from_str::<Value>(&content).map_err(|e| e.to_string())),
            _ => {
                return Err(MetadataError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        let document = parsed.map_err(|reason| MetadataError::Parse {
            path: path.to_path_buf(),
            format,
            reason,
        })?;

        Self::from_document(document).ok_or_else(|| MetadataError::Parse {
            path: path.to_path_buf(),
            format,
            reason: "expected a mapping of parameter names to values".to_string(),
        })
    }

    fn from_document(document: Value) -> Option<Self> {
        match document {
            // Blank YAML file
            Value::Null => Some(Self::new()),
            Value::Object(mut map) => {
                let parameters = match map.remove("parameters") {
                    Some(Value::Object(nested)) => nested,
                    Some(Value::Null) => Map::new(),
                    Some(other) => {
                        map.insert("parameters".to_string(), other);
                        map
                    }
                    None => map,
                };
                Some(Self {
                    parameters,
                })
            }
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for ParameterBag {
    fn from(parameters: Map<String, Value>) -> Self {
        Self {
            parameters,
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ParameterBag {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            parameters: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl ParameterSource for ParameterBag {
    fn get(&self, name: &str) -> Result<Value> {
        self.parameters.get(name).cloned().ok_or_else(|| MetadataError::ParameterNotFound {
            name: name.to_string(),
            alternatives: closest_names(name, self.names()),
        })
    }
}
