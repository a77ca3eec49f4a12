//! Adapter for service-locator style containers.

use serde_json::Value;

use super::ParameterSource;
use crate::core::{MetadataError, Result};

/// A container that hands out entries by identifier.
///
/// This mirrors a service locator: `has` answers whether an identifier is known
/// and `get` returns the entry. Parameters are looked up through the same `get`
/// as any other entry.
pub trait ServiceContainer: Send + Sync {
    /// Whether the container knows `id`
    fn has(&self, id: &str) -> bool;

    /// Fetch the entry for `id`, or `None` when it is unknown
    fn get(&self, id: &str) -> Option<Value>;
}

/// Exposes a [`ServiceContainer`] as a [`ParameterSource`].
#[derive(Debug, Clone)]
pub struct ContainerParameters<C> {
    container: C,
}

impl<C: ServiceContainer> ContainerParameters<C> {
    /// Wrap a container
    pub const fn new(container: C) -> Self {
        Self {
            container,
        }
    }

    /// The wrapped container
    pub const fn inner(&self) -> &C {
        &self.container
    }
}

impl<C: ServiceContainer> ParameterSource for ContainerParameters<C> {
    fn get(&self, name: &str) -> Result<Value> {
        if !self.container.has(name) {
            return Err(MetadataError::ParameterNotFound {
                name: name.to_string(),
                alternatives: Vec::new(),
            });
        }

        self.container.get(name).ok_or_else(|| MetadataError::ParameterNotFound {
            name: name.to_string(),
            alternatives: Vec::new(),
        })
    }
}
