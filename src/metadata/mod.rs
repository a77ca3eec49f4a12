//! Resource metadata extraction.
//!
//! Mapping files declare API resources either in YAML or XML. Every format is parsed
//! into the same raw shape, run through placeholder resolution and converted into
//! [`ResourceMetadata`]. [`MetadataExtractor`] ties this together over a list of
//! paths and caches the outcome.

pub mod extractor;
pub mod format;
mod mapping;
pub mod resource;
pub mod xml;
pub mod yaml;

pub use extractor::{ExtractionSink, MetadataExtractor, PathExtractor};
pub use format::{FormatExtractor, MappingFormat};
pub use resource::{PropertyMetadata, ResourceMetadata, SubresourceMetadata};
pub use xml::XmlExtractor;
pub use yaml::YamlExtractor;
