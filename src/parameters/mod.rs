//! Parameter sources for placeholder resolution.
//!
//! A parameter source maps a parameter name to a value. The resolver only ever sees
//! the [`ParameterSource`] trait; the different container flavors are normalized by
//! adapters:
//!
//! - [`ParameterBag`] - configuration parameters held in memory, loaded from
//!   `resmeta.toml`, parameter files or the command line
//! - [`ContainerParameters`] - wraps a service-locator style [`ServiceContainer`]
//!   that exposes `has`/`get` lookups
//!
//! # Examples
//!
//! ```rust,no_run
//! use resmeta_cli::parameters::{ParameterBag, ParameterSource};
//! use serde_json::json;
//!
//! let mut bag = ParameterBag::new();
//! bag.set("api.prefix", json!("/api"));
//!
//! assert_eq!(bag.get("api.prefix").unwrap(), json!("/api"));
//! assert!(bag.get("missing").is_err());
//! ```

mod bag;
mod container;

pub use bag::ParameterBag;
pub use container::{ContainerParameters, ServiceContainer};

use serde_json::Value;
use strsim::levenshtein;

use crate::core::Result;

/// Read-only lookup of parameter values by name.
///
/// Implementations return [`MetadataError::ParameterNotFound`] for unknown names.
/// Sources are shared between extractors, so they must be thread-safe.
///
/// [`MetadataError::ParameterNotFound`]: crate::core::MetadataError::ParameterNotFound
pub trait ParameterSource: Send + Sync {
    /// Look up the value of parameter `name`.
    fn get(&self, name: &str) -> Result<Value>;
}

impl<T: ParameterSource + ?Sized> ParameterSource for std::sync::Arc<T> {
    fn get(&self, name: &str) -> Result<Value> {
        (**self).get(name)
    }
}

impl<T: ParameterSource + ?Sized> ParameterSource for &T {
    fn get(&self, name: &str) -> Result<Value> {
        (**self).get(name)
    }
}

/// Find known names that look like a misspelling of `name`.
///
/// A candidate qualifies when its Levenshtein distance is at most a third of the
/// requested name's length, or when it contains the requested name. Results are
/// ordered closest first.
pub(crate) fn closest_names<'a, I>(name: &str, known: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let max_distance = name.chars().count() / 3;
    let mut scored: Vec<(usize, &str)> = known
        .into_iter()
        .filter_map(|candidate| {
            let distance = levenshtein(name, candidate);
            (distance <= max_distance || candidate.contains(name)).then_some((distance, candidate))
        })
        .collect();

    scored.sort_by_key(|(distance, _)| *distance);
    scored.into_iter().map(|(_, candidate)| candidate.to_string()).collect()
}
