//! Resource metadata records produced by extraction.
//!
//! These are plain values: an extractor builds them after placeholders have been
//! resolved and the cache stores them unmodified. Optional fields distinguish "not
//! configured" (`None`) from an explicit empty value, e.g. `itemOperations: {}`
//! disables all item operations while a missing key keeps the framework default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata describing one API resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    /// Fully qualified class of the resource
    pub resource_class: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// IRI of the resource type (e.g. a schema.org type)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_operations: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_operations: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subresource_operations: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphql: Option<Value>,

    /// Free-form resource attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,

    /// Per-property metadata in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyMetadata>,
}

impl ResourceMetadata {
    /// Create metadata for `resource_class` with nothing else configured
    #[must_use]
    pub fn new(resource_class: impl Into<String>) -> Self {
        Self {
            resource_class: resource_class.into(),
            short_name: None,
            description: None,
            iri: None,
            item_operations: None,
            collection_operations: None,
            subresource_operations: None,
            graphql: None,
            attributes: None,
            properties: Vec::new(),
        }
    }

    /// Metadata of the property called `name`
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyMetadata> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Property names in declaration order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }
}

/// Metadata describing one property of a resource.
///
/// Unset flags fall back to whatever the property's type information says.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMetadata {
    /// Property name as declared on the resource class
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readable_link: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writable_link: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subresource: Option<SubresourceMetadata>,
}

/// Marks a property as a subresource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubresourceMetadata {
    /// Class of the related resource
    pub resource_class: String,
    /// Whether the property is a collection of that resource
    #[serde(default)]
    pub collection: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
}
