//! Placeholder resolution against container parameters.
//!
//! Configuration strings may reference parameters with `%name%` tokens. Resolution
//! replaces each token with the parameter's value and turns the `%%` escape into a
//! literal `%`. Arrays and objects are resolved element by element, depth first,
//! keeping keys and order untouched.
//!
//! # Rules
//!
//! - Without a parameter source, every value passes through unchanged
//! - Only strings carry placeholders; numbers, booleans and null are returned as-is
//! - `%env(NAME)%` is rejected, environment lookups are not available here
//! - A referenced parameter must exist and be a string or a number
//! - Every substituted parameter is reported back in [`Resolved::parameters`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use resmeta_cli::parameters::ParameterBag;
//! use resmeta_cli::resolver::PlaceholderResolver;
//! use serde_json::json;
//!
//! let params: ParameterBag = [("prefix", json!("/api"))].into_iter().collect();
//! let resolver = PlaceholderResolver::with_source(params);
//!
//! let resolved = resolver.resolve(&json!({"path": "%prefix%/books", "rate": "100%%"})).unwrap();
//! assert_eq!(resolved.value, json!({"path": "/api/books", "rate": "100%"}));
//! assert_eq!(resolved.parameters.get("prefix"), Some(&json!("/api")));
//! ```

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::sync::{Arc, LazyLock};

use crate::core::{MetadataError, Result};
use crate::parameters::ParameterSource;

/// `%%` escapes, or a `%name%` token whose name has no percent sign or ASCII whitespace.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%%|%([^%\t\n\x0B\x0C\r ]+)%").expect("placeholder pattern is valid")
});

/// Runtime environment lookups, which are not allowed in resource configuration.
static ENV_PARAMETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^env\([A-Za-z0-9_]+\)$").expect("env pattern is valid"));

/// Parameters substituted during a resolution, in the order first seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CollectedParameters(Map<String, Value>);

impl CollectedParameters {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `name` resolved to `value`
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    /// Fold another record into this one
    pub fn merge(&mut self, other: CollectedParameters) {
        for (name, value) in other.0 {
            self.0.insert(name, value);
        }
    }

    /// Value recorded for `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Number of distinct parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was substituted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Consume the record, returning the underlying map
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// Result of resolving a value: the substituted value and the parameters it used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved {
    /// The value with placeholders substituted, same shape as the input
    pub value: Value,
    /// Parameters that were substituted
    pub parameters: CollectedParameters,
}

impl Resolved {
    fn unchanged(value: Value) -> Self {
        Self {
            value,
            parameters: CollectedParameters::new(),
        }
    }
}

/// Resolves `%name%` placeholders with an optional parameter source.
///
/// Cloning is cheap; the source is shared.
#[derive(Clone, Default)]
pub struct PlaceholderResolver {
    source: Option<Arc<dyn ParameterSource>>,
}

impl std::fmt::Debug for PlaceholderResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceholderResolver").field("has_source", &self.has_source()).finish()
    }
}

impl PlaceholderResolver {
    /// Create a resolver from an optional shared source
    #[must_use]
    pub fn new(source: Option<Arc<dyn ParameterSource>>) -> Self {
        Self {
            source,
        }
    }

    /// Resolver without a source: resolution is the identity
    #[must_use]
    pub fn passthrough() -> Self {
        Self::default()
    }

    /// Resolver backed by `source`
    #[must_use]
    pub fn with_source(source: impl ParameterSource + 'static) -> Self {
        Self::new(Some(Arc::new(source)))
    }

    /// Whether a parameter source is configured
    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Resolve placeholders in `value`.
    ///
    /// # Errors
    ///
    /// - [`MetadataError::ForbiddenDynamicReference`] for `%env(NAME)%` tokens
    /// - [`MetadataError::ParameterNotFound`] when the source lacks a parameter
    /// - [`MetadataError::InvalidParameterType`] when a parameter is not a string or number
    pub fn resolve(&self, value: &Value) -> Result<Resolved> {
        resolve(value, self.source.as_deref())
    }
}

/// Resolve placeholders in `value` against `source`.
///
/// With `source = None` the value is returned unchanged. See [`PlaceholderResolver::resolve`]
/// for the errors.
pub fn resolve(value: &Value, source: Option<&dyn ParameterSource>) -> Result<Resolved> {
    match source {
        None => Ok(Resolved::unchanged(value.clone())),
        Some(source) => resolve_value(value, source),
    }
}

fn resolve_value(value: &Value, source: &dyn ParameterSource) -> Result<Resolved> {
    match value {
        Value::Array(items) => {
            let mut parameters = CollectedParameters::new();
            let mut resolved = Vec::with_capacity(items.len());
            for item in items {
                let item = resolve_value(item, source)?;
                parameters.merge(item.parameters);
                resolved.push(item.value);
            }
            Ok(Resolved {
                value: Value::Array(resolved),
                parameters,
            })
        }
        Value::Object(entries) => {
            let mut parameters = CollectedParameters::new();
            let mut resolved = Map::with_capacity(entries.len());
            for (key, entry) in entries {
                let entry = resolve_value(entry, source)?;
                parameters.merge(entry.parameters);
                resolved.insert(key.clone(), entry.value);
            }
            Ok(Resolved {
                value: Value::Object(resolved),
                parameters,
            })
        }
        Value::String(raw) => {
            let (value, parameters) = resolve_string(raw, source)?;
            Ok(Resolved {
                value: Value::String(value),
                parameters,
            })
        }
        scalar => Ok(Resolved::unchanged(scalar.clone())),
    }
}

fn resolve_string(
    raw: &str,
    source: &dyn ParameterSource,
) -> Result<(String, CollectedParameters)> {
    let mut parameters = CollectedParameters::new();
    if !raw.contains('%') {
        return Ok((raw.to_string(), parameters));
    }

    let mut escaped = String::with_capacity(raw.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(raw) {
        let Some(token) = caps.get(0) else {
            continue;
        };
        escaped.push_str(&raw[last..token.start()]);
        last = token.end();

        // `%%` stays escaped until the final collapse
        let Some(name) = caps.get(1).map(|m| m.as_str()) else {
            escaped.push_str("%%");
            continue;
        };

        if ENV_PARAMETER.is_match(name) {
            return Err(MetadataError::ForbiddenDynamicReference {
                name: name.to_string(),
            });
        }

        let value = source.get(name)?;
        match &value {
            Value::String(s) => escaped.push_str(s),
            Value::Number(n) => escaped.push_str(&number_to_string(n)),
            other => {
                return Err(MetadataError::InvalidParameterType {
                    name: name.to_string(),
                    value: raw.to_string(),
                    actual_type: value_type_name(other).to_string(),
                });
            }
        }
        parameters.insert(name, value);
    }
    escaped.push_str(&raw[last..]);

    Ok((escaped.replace("%%", "%"), parameters))
}

/// Render a number the way it is spliced into a string.
///
/// Integers print as is. Floats use 14 significant digits with trailing zeros
/// dropped, switching to `1.0E+20` notation outside `1e-4..1e14`.
fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => float_to_string(f),
        _ => n.to_string(),
    }
}

fn float_to_string(f: f64) -> String {
    let scientific = format!("{f:.13e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if !(-4..14).contains(&exponent) {
        let mut mantissa = trim_fraction(mantissa).to_string();
        if !mantissa.contains('.') {
            mantissa.push_str(".0");
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}E{sign}{}", exponent.unsigned_abs());
    }

    let decimals = usize::try_from(13 - exponent).unwrap_or(0);
    trim_fraction(&format!("{f:.decimals$}")).to_string()
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// Name of a value's type as reported in error messages.
#[must_use]
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
