//! Pick the mapping format from a path's extension.

use std::path::Path;

use super::extractor::{ExtractionSink, PathExtractor};
use super::xml::XmlExtractor;
use super::yaml::YamlExtractor;
use crate::core::{MetadataError, Result};

/// Mapping file formats understood by [`FormatExtractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.xml`
    Xml,
}

impl MappingFormat {
    /// Detect the format of `path`, or `None` for an unknown extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml" | "yml") => Some(Self::Yaml),
            Some("xml") => Some(Self::Xml),
            _ => None,
        }
    }
}

/// Dispatches each path to the YAML or XML extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatExtractor {
    yaml: YamlExtractor,
    xml: XmlExtractor,
}

impl FormatExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            yaml: YamlExtractor,
            xml: XmlExtractor,
        }
    }
}

impl PathExtractor for FormatExtractor {
    fn extract_path(&self, path: &str, sink: &mut ExtractionSink<'_>) -> Result<()> {
        match MappingFormat::from_path(Path::new(path)) {
            Some(MappingFormat::Yaml) => self.yaml.extract_path(path, sink),
            Some(MappingFormat::Xml) => self.xml.extract_path(path, sink),
            None => Err(MetadataError::UnsupportedFormat {
                path: path.into(),
            }),
        }
    }
}
