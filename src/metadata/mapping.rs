//! Build resource metadata from a raw mapping.
//!
//! Both file formats are first turned into the same raw shape: a resource class
//! name plus a mapping with camelCase keys (`shortName`, `itemOperations`,
//! `properties`, ...). This module resolves placeholders in that raw mapping and
//! converts it into typed [`ResourceMetadata`].

use serde_json::{Map, Value};
use std::path::Path;
use tracing::warn;

use super::extractor::ExtractionSink;
use super::resource::{PropertyMetadata, ResourceMetadata, SubresourceMetadata};
use crate::core::{MetadataError, Result};
use crate::resolver::value_type_name;

const RESOURCE_KEYS: &[&str] = &[
    "shortName",
    "description",
    "iri",
    "itemOperations",
    "collectionOperations",
    "subresourceOperations",
    "graphql",
    "attributes",
    "properties",
];

const PROPERTY_KEYS: &[&str] = &[
    "description",
    "readable",
    "writable",
    "readableLink",
    "writableLink",
    "required",
    "identifier",
    "iri",
    "attributes",
    "subresource",
];

/// Build one resource from its raw mapping.
///
/// `body` may be null (a resource declared with no options).
pub(crate) fn build_resource(
    path: &Path,
    class: &str,
    body: &Value,
    sink: &mut ExtractionSink<'_>,
) -> Result<ResourceMetadata> {
    let empty = Map::new();
    let body = match body {
        Value::Null => &empty,
        Value::Object(map) => map,
        other => {
            return Err(invalid(
                path,
                format!(
                    "resource \"{class}\" must be a mapping, found {}",
                    value_type_name(other)
                ),
            ));
        }
    };
    warn_unknown_keys(path, class, body, RESOURCE_KEYS);

    let mut resource = ResourceMetadata::new(sink.resolve_str(class)?);
    resource.short_name = optional_string(path, body, "shortName", sink)?;
    resource.description = optional_string(path, body, "description", sink)?;
    resource.iri = optional_string(path, body, "iri", sink)?;
    resource.item_operations = optional_value(body, "itemOperations", sink)?;
    resource.collection_operations = optional_value(body, "collectionOperations", sink)?;
    resource.subresource_operations = optional_value(body, "subresourceOperations", sink)?;
    resource.graphql = optional_value(body, "graphql", sink)?;
    resource.attributes = optional_value(body, "attributes", sink)?;

    match body.get("properties") {
        None | Some(Value::Null) => {}
        Some(Value::Object(properties)) => {
            for (name, property) in properties {
                resource.properties.push(build_property(path, class, name, property, sink)?);
            }
        }
        Some(other) => {
            return Err(invalid(
                path,
                format!(
                    "\"properties\" of resource \"{class}\" must be a mapping, found {}",
                    value_type_name(other)
                ),
            ));
        }
    }

    Ok(resource)
}

fn build_property(
    path: &Path,
    class: &str,
    name: &str,
    body: &Value,
    sink: &mut ExtractionSink<'_>,
) -> Result<PropertyMetadata> {
    let empty = Map::new();
    let body = match body {
        Value::Null => &empty,
        Value::Object(map) => map,
        other => {
            return Err(invalid(
                path,
                format!(
                    "property \"{name}\" of resource \"{class}\" must be a mapping, found {}",
                    value_type_name(other)
                ),
            ));
        }
    };
    warn_unknown_keys(path, &format!("{class}::{name}"), body, PROPERTY_KEYS);

    let subresource = match body.get("subresource") {
        None | Some(Value::Null) => None,
        Some(Value::Object(sub)) => Some(build_subresource(path, name, sub, sink)?),
        Some(other) => {
            return Err(invalid(
                path,
                format!(
                    "\"subresource\" of property \"{name}\" must be a mapping, found {}",
                    value_type_name(other)
                ),
            ));
        }
    };

    Ok(PropertyMetadata {
        name: name.to_string(),
        description: optional_string(path, body, "description", sink)?,
        readable: optional_bool(path, body, "readable", sink)?,
        writable: optional_bool(path, body, "writable", sink)?,
        readable_link: optional_bool(path, body, "readableLink", sink)?,
        writable_link: optional_bool(path, body, "writableLink", sink)?,
        required: optional_bool(path, body, "required", sink)?,
        identifier: optional_bool(path, body, "identifier", sink)?,
        iri: optional_string(path, body, "iri", sink)?,
        attributes: optional_value(body, "attributes", sink)?,
        subresource,
    })
}

fn build_subresource(
    path: &Path,
    property: &str,
    body: &Map<String, Value>,
    sink: &mut ExtractionSink<'_>,
) -> Result<SubresourceMetadata> {
    let resource_class = optional_string(path, body, "resourceClass", sink)?.ok_or_else(|| {
        invalid(path, format!("subresource of property \"{property}\" needs a resourceClass"))
    })?;

    let max_depth = match body.get("maxDepth").map(|v| sink.resolve(v)).transpose()? {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => {
            let depth = n.as_u64().and_then(|n| u32::try_from(n).ok());
            Some(depth.ok_or_else(|| invalid_max_depth(path, property))?)
        }
        Some(Value::String(s)) => {
            Some(s.trim().parse::<u32>().map_err(|_| invalid_max_depth(path, property))?)
        }
        Some(other) => {
            return Err(invalid(
                path,
                format!(
                    "maxDepth of property \"{property}\" must be an integer, found {}",
                    value_type_name(&other)
                ),
            ));
        }
    };

    Ok(SubresourceMetadata {
        resource_class,
        collection: optional_bool(path, body, "collection", sink)?.unwrap_or(false),
        max_depth,
    })
}

/// A resolved value, or `None` when the key is missing or null.
fn optional_value(
    body: &Map<String, Value>,
    key: &str,
    sink: &mut ExtractionSink<'_>,
) -> Result<Option<Value>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => sink.resolve(value).map(Some),
    }
}

fn optional_string(
    path: &Path,
    body: &Map<String, Value>,
    key: &str,
    sink: &mut ExtractionSink<'_>,
) -> Result<Option<String>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) => sink.resolve_str(raw).map(Some),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(invalid(
            path,
            format!("\"{key}\" must be a string, found {}", value_type_name(other)),
        )),
    }
}

fn optional_bool(
    path: &Path,
    body: &Map<String, Value>,
    key: &str,
    sink: &mut ExtractionSink<'_>,
) -> Result<Option<bool>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(raw)) => {
            let resolved = sink.resolve_str(raw)?;
            parse_bool(&resolved).map(Some).ok_or_else(|| {
                invalid(path, format!("\"{key}\" must be a boolean, found \"{resolved}\""))
            })
        }
        Some(other) => Err(invalid(
            path,
            format!("\"{key}\" must be a boolean, found {}", value_type_name(other)),
        )),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn warn_unknown_keys(path: &Path, owner: &str, body: &Map<String, Value>, known: &[&str]) {
    for key in body.keys().filter(|k| !known.contains(&k.as_str())) {
        warn!("Ignoring unknown key \"{}\" in {} ({})", key, owner, path.display());
    }
}

fn invalid(path: &Path, reason: String) -> MetadataError {
    MetadataError::InvalidMapping {
        path: path.to_path_buf(),
        reason,
    }
}

fn invalid_max_depth(path: &Path, property: &str) -> MetadataError {
    invalid(path, format!("maxDepth of property \"{property}\" must be a positive integer"))
}
