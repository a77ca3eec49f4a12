//! YAML resource mappings.
//!
//! ```yaml
//! resources:
//!   App\Entity\Book:
//!     shortName: '%book_short_name%'
//!     itemOperations:
//!       get: ~
//!     properties:
//!       title:
//!         required: true
//!   App\Entity\Tag: ~
//! ```

use serde_json::Value;
use std::path::Path;

use super::extractor::{ExtractionSink, PathExtractor};
use super::mapping::build_resource;
use crate::core::{MetadataError, Result};
use crate::resolver::value_type_name;

/// Extracts resources from YAML mapping files.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlExtractor;

impl YamlExtractor {
    /// Extract resources from YAML `content`; `path` is used in error messages.
    pub fn extract_str(path: &Path, content: &str, sink: &mut ExtractionSink<'_>) -> Result<()> {
        if is_blank_yaml(content) {
            return Ok(());
        }

        let document: Value =
            serde_yaml::from_str(content).map_err(|e| MetadataError::Parse {
                path: path.to_path_buf(),
                format: "YAML",
                reason: e.to_string(),
            })?;

        let resources = match document {
            Value::Null => return Ok(()),
            Value::Object(mut root) => match root.remove("resources") {
                None | Some(Value::Null) => return Ok(()),
                Some(Value::Object(resources)) => resources,
                Some(other) => {
                    return Err(MetadataError::InvalidMapping {
                        path: path.to_path_buf(),
                        reason: format!(
                            "\"resources\" must be a mapping, found {}",
                            value_type_name(&other)
                        ),
                    });
                }
            },
            other => {
                return Err(MetadataError::InvalidMapping {
                    path: path.to_path_buf(),
                    reason: format!(
                        "the document root must be a mapping, found {}",
                        value_type_name(&other)
                    ),
                });
            }
        };

        for (class, body) in &resources {
            let resource = build_resource(path, class, body, sink)?;
            sink.push(resource);
        }
        Ok(())
    }
}

/// Whether a YAML document holds nothing but blank lines and comments.
pub(crate) fn is_blank_yaml(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| line.is_empty() || line.starts_with('#'))
}

impl PathExtractor for YamlExtractor {
    fn extract_path(&self, path: &str, sink: &mut ExtractionSink<'_>) -> Result<()> {
        let path = Path::new(path);
        let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::extract_str(path, &content, sink)
    }
}
