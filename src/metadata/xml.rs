//! XML resource mappings.
//!
//! ```xml
//! <resources>
//!     <resource class="App\Entity\Book" shortName="%book_short_name%">
//!         <itemOperations>
//!             <itemOperation name="get">
//!                 <attribute name="path">%api_prefix%/books/{id}</attribute>
//!             </itemOperation>
//!         </itemOperations>
//!         <attribute name="normalization_context">
//!             <attribute name="groups">
//!                 <attribute>book:read</attribute>
//!             </attribute>
//!         </attribute>
//!         <property name="title" required="true"/>
//!     </resource>
//! </resources>
//! ```
//!
//! Element text is typed the way container XML configuration is: `true`/`false`,
//! `null`, integers and decimals become the matching JSON values; anything else stays
//! a string and goes through placeholder resolution.

use roxmltree::{Document, Node};
use serde_json::{Map, Number, Value};
use std::path::Path;

use super::extractor::{ExtractionSink, PathExtractor};
use super::mapping::build_resource;
use crate::core::{MetadataError, Result};

/// Extracts resources from XML mapping files.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlExtractor;

impl XmlExtractor {
    /// Extract resources from XML `content`; `path` is used in error messages.
    pub fn extract_str(path: &Path, content: &str, sink: &mut ExtractionSink<'_>) -> Result<()> {
        let document = Document::parse(content).map_err(|e| MetadataError::Parse {
            path: path.to_path_buf(),
            format: "XML",
            reason: e.to_string(),
        })?;

        let root = document.root_element();
        if root.tag_name().name() != "resources" {
            return Err(MetadataError::InvalidMapping {
                path: path.to_path_buf(),
                reason: format!(
                    "the root element must be <resources>, found <{}>",
                    root.tag_name().name()
                ),
            });
        }

        for node in elements(root, "resource") {
            let class = node.attribute("class").ok_or_else(|| MetadataError::InvalidMapping {
                path: path.to_path_buf(),
                reason: "<resource> is missing the \"class\" attribute".to_string(),
            })?;
            let body = resource_body(path, class, node)?;
            let resource = build_resource(path, class, &body, sink)?;
            sink.push(resource);
        }
        Ok(())
    }
}

impl PathExtractor for XmlExtractor {
    fn extract_path(&self, path: &str, sink: &mut ExtractionSink<'_>) -> Result<()> {
        let path = Path::new(path);
        let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::extract_str(path, &content, sink)
    }
}

/// Child elements of `node` with the given local name.
fn elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |child| child.is_element() && child.tag_name().name() == name)
}

fn resource_body(path: &Path, class: &str, node: Node<'_, '_>) -> Result<Value> {
    let mut body = Map::new();
    for key in ["shortName", "description", "iri"] {
        if let Some(value) = node.attribute(key) {
            body.insert(key.to_string(), Value::String(value.to_string()));
        }
    }

    for (key, container, element) in [
        ("itemOperations", "itemOperations", "itemOperation"),
        ("collectionOperations", "collectionOperations", "collectionOperation"),
        ("subresourceOperations", "subresourceOperations", "subresourceOperation"),
        ("graphql", "graphql", "operation"),
    ] {
        if let Some(operations) = operations(node, container, element) {
            body.insert(key.to_string(), operations);
        }
    }

    if let Some(attributes) = non_empty(attributes(node)) {
        body.insert("attributes".to_string(), attributes);
    }

    let mut properties = Map::new();
    for property in elements(node, "property") {
        let name = property.attribute("name").ok_or_else(|| MetadataError::InvalidMapping {
            path: path.to_path_buf(),
            reason: format!(
                "<property> of resource \"{class}\" is missing the \"name\" attribute"
            ),
        })?;
        properties.insert(name.to_string(), property_body(property));
    }
    if !properties.is_empty() {
        body.insert("properties".to_string(), Value::Object(properties));
    }

    Ok(Value::Object(body))
}

fn property_body(node: Node<'_, '_>) -> Value {
    let mut body = Map::new();
    for key in ["description", "iri"] {
        if let Some(value) = node.attribute(key) {
            body.insert(key.to_string(), Value::String(value.to_string()));
        }
    }
    for key in ["readable", "writable", "readableLink", "writableLink", "required", "identifier"] {
        if let Some(value) = node.attribute(key) {
            body.insert(key.to_string(), phpize(value));
        }
    }

    if let Some(attributes) = non_empty(attributes(node)) {
        body.insert("attributes".to_string(), attributes);
    }

    if let Some(subresource) = elements(node, "subresource").next() {
        let mut sub = Map::new();
        if let Some(class) = subresource.attribute("resourceClass") {
            sub.insert("resourceClass".to_string(), Value::String(class.to_string()));
        }
        for key in ["collection", "maxDepth"] {
            if let Some(value) = subresource.attribute(key) {
                sub.insert(key.to_string(), phpize(value));
            }
        }
        body.insert("subresource".to_string(), Value::Object(sub));
    }

    Value::Object(body)
}

/// Operations declared under `<container>`, or `None` when the container is absent.
fn operations(node: Node<'_, '_>, container: &str, element: &str) -> Option<Value> {
    let container = elements(node, container).next()?;
    let operations: Map<String, Value> = elements(container, element)
        .map(|operation| {
            let name = operation.attribute("name").unwrap_or_default().to_string();
            (name, attributes(operation))
        })
        .collect();
    Some(Value::Object(operations))
}

/// Nested `<attribute>` children as a map, or a list when none of them is named.
fn attributes(node: Node<'_, '_>) -> Value {
    let mut named = Map::new();
    let mut all_unnamed = true;
    let mut index = 0usize;

    for attribute in elements(node, "attribute") {
        let value = if elements(attribute, "attribute").next().is_some() {
            attributes(attribute)
        } else {
            phpize(attribute.text().unwrap_or_default().trim())
        };

        match attribute.attribute("name") {
            Some(name) => {
                all_unnamed = false;
                named.insert(name.to_string(), value);
            }
            None => {
                named.insert(index.to_string(), value);
                index += 1;
            }
        }
    }

    if all_unnamed && !named.is_empty() {
        Value::Array(named.into_iter().map(|(_, v)| v).collect())
    } else {
        Value::Object(named)
    }
}

fn non_empty(value: Value) -> Option<Value> {
    match &value {
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        _ => Some(value),
    }
}

/// Convert XML text to the JSON value it denotes.
fn phpize(raw: &str) -> Value {
    let lower = raw.to_ascii_lowercase();
    match lower.as_str() {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::Number(n.into());
        }
    }

    if is_decimal(raw) {
        if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }

    Value::String(raw.to_string())
}

fn is_decimal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.is_none_or(all_digits)
}
