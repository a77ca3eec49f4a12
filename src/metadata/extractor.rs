//! Extract resource metadata from configuration paths.
//!
//! [`MetadataExtractor`] owns the list of mapping paths and a one-shot cache of the
//! resources found in them. The per-path parsing is delegated to a [`PathExtractor`],
//! which receives an [`ExtractionSink`] to resolve placeholders and collect the
//! resources it builds.
//!
//! # Caching
//!
//! The first successful call to [`MetadataExtractor::resources`] extracts every path in
//! order and stores the result. Later calls return the stored resources without
//! touching the paths again. If any path fails, the error is returned and nothing is
//! stored, so the next call starts over from the first path.

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::resource::ResourceMetadata;
use crate::core::Result;
use crate::parameters::ParameterSource;
use crate::resolver::{CollectedParameters, PlaceholderResolver};

/// Parses one configuration path into resource metadata.
///
/// Implementations read and parse the content at `path`, run every raw value that
/// may hold placeholders through [`ExtractionSink::resolve`], and push the finished
/// resources into the sink. Format and I/O errors are returned as-is.
pub trait PathExtractor {
    /// Extract the resources declared at `path` into `sink`
    fn extract_path(&self, path: &str, sink: &mut ExtractionSink<'_>) -> Result<()>;
}

impl<T: PathExtractor + ?Sized> PathExtractor for &T {
    fn extract_path(&self, path: &str, sink: &mut ExtractionSink<'_>) -> Result<()> {
        (**self).extract_path(path, sink)
    }
}

impl<T: PathExtractor + ?Sized> PathExtractor for Box<T> {
    fn extract_path(&self, path: &str, sink: &mut ExtractionSink<'_>) -> Result<()> {
        (**self).extract_path(path, sink)
    }
}

/// Accumulator handed to a [`PathExtractor`] during one extraction run.
#[derive(Debug)]
pub struct ExtractionSink<'a> {
    resolver: &'a PlaceholderResolver,
    resources: Vec<ResourceMetadata>,
    parameters: CollectedParameters,
}

impl<'a> ExtractionSink<'a> {
    /// Create an empty sink resolving placeholders with `resolver`
    #[must_use]
    pub fn new(resolver: &'a PlaceholderResolver) -> Self {
        Self {
            resolver,
            resources: Vec::new(),
            parameters: CollectedParameters::new(),
        }
    }

    /// Resolve placeholders in a raw configuration value.
    ///
    /// Parameters used by the substitution are remembered for the whole run.
    pub fn resolve(&mut self, value: &Value) -> Result<Value> {
        let resolved = self.resolver.resolve(value)?;
        self.parameters.merge(resolved.parameters);
        Ok(resolved.value)
    }

    /// Resolve placeholders in a raw configuration string
    pub fn resolve_str(&mut self, raw: &str) -> Result<String> {
        match self.resolve(&Value::String(raw.to_string()))? {
            Value::String(resolved) => Ok(resolved),
            other => Ok(other.to_string()),
        }
    }

    /// Add a finished resource
    pub fn push(&mut self, resource: ResourceMetadata) {
        self.resources.push(resource);
    }

    /// Resources collected so far
    #[must_use]
    pub fn resources(&self) -> &[ResourceMetadata] {
        &self.resources
    }

    /// Parameters substituted so far
    #[must_use]
    pub fn parameters(&self) -> &CollectedParameters {
        &self.parameters
    }

    /// Consume the sink, returning the resources and the parameters they used
    #[must_use]
    pub fn finish(self) -> (Vec<ResourceMetadata>, CollectedParameters) {
        (self.resources, self.parameters)
    }
}

/// Resource metadata extractor with a one-shot cache.
///
/// Intended to live for one configuration load. Access to the cache goes through
/// `&mut self`; share an extractor between threads by wrapping it in a `Mutex`.
///
/// # Examples
///
/// ```rust,no_run
/// use resmeta_cli::metadata::{FormatExtractor, MetadataExtractor};
///
/// # fn example() -> resmeta_cli::core::Result<()> {
/// let mut extractor = MetadataExtractor::new(
///     ["config/api/books.yaml", "config/api/authors.xml"],
///     FormatExtractor::new(),
///     None,
/// );
/// for resource in extractor.resources()? {
///     println!("{}", resource.resource_class);
/// }
/// # Ok(())
/// # }
/// ```
pub struct MetadataExtractor<E> {
    paths: Vec<String>,
    resolver: PlaceholderResolver,
    path_extractor: E,
    resources: Option<Vec<ResourceMetadata>>,
    parameters: CollectedParameters,
}

impl<E: PathExtractor> MetadataExtractor<E> {
    /// Create an extractor over `paths`.
    ///
    /// Without a parameter source, placeholders are left untouched.
    pub fn new<I, P>(
        paths: I,
        path_extractor: E,
        parameters: Option<Arc<dyn ParameterSource>>,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            resolver: PlaceholderResolver::new(parameters),
            path_extractor,
            resources: None,
            parameters: CollectedParameters::new(),
        }
    }

    /// The configured paths, in extraction order
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// The resolver handed to the path extractor
    #[must_use]
    pub const fn resolver(&self) -> &PlaceholderResolver {
        &self.resolver
    }

    /// Whether resources have been extracted and cached
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.resources.is_some()
    }

    /// Return every resource declared in the configured paths.
    ///
    /// Extracts on the first call and caches the result. An extraction error leaves
    /// the cache empty.
    pub fn resources(&mut self) -> Result<&[ResourceMetadata]> {
        if self.resources.is_none() {
            let mut sink = ExtractionSink::new(&self.resolver);
            for path in &self.paths {
                debug!(path = %path, "Extracting resource metadata");
                self.path_extractor.extract_path(path, &mut sink)?;
            }

            let (resources, parameters) = sink.finish();
            debug!(
                resources = resources.len(),
                parameters = parameters.len(),
                "Resource metadata extracted"
            );
            self.parameters = parameters;
            self.resources = Some(resources);
        }

        Ok(self.resources.as_deref().unwrap_or_default())
    }

    /// The cached resources, if extraction has already succeeded
    #[must_use]
    pub fn cached(&self) -> Option<&[ResourceMetadata]> {
        self.resources.as_deref()
    }

    /// Parameters substituted while extracting the cached resources.
    ///
    /// Empty until [`resources`](Self::resources) has succeeded.
    #[must_use]
    pub const fn collected_parameters(&self) -> &CollectedParameters {
        &self.parameters
    }

    /// Extract (if needed) and take ownership of the resources
    pub fn into_resources(mut self) -> Result<Vec<ResourceMetadata>> {
        self.resources()?;
        Ok(self.resources.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MetadataError;
    use crate::parameters::ParameterBag;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    /// Emits one resource per path and counts invocations.
    #[derive(Default)]
    struct CountingExtractor {
        calls: Cell<usize>,
        fail_first: Cell<bool>,
        seen: RefCell<Vec<String>>,
    }

    impl PathExtractor for CountingExtractor {
        fn extract_path(&self, path: &str, sink: &mut ExtractionSink<'_>) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            self.seen.borrow_mut().push(path.to_string());
            if self.fail_first.replace(false) {
                return Err(MetadataError::InvalidMapping {
                    path: path.into(),
                    reason: "broken".to_string(),
                });
            }
            let mut resource = ResourceMetadata::new(path);
            resource.short_name = Some(sink.resolve_str("%name%")?);
            sink.push(resource);
            Ok(())
        }
    }

    fn params() -> Option<Arc<dyn ParameterSource>> {
        let bag: ParameterBag = [("name", json!("Book"))].into_iter().collect();
        Some(Arc::new(bag))
    }

    #[test]
    fn test_resources_are_extracted_once() {
        let counter = CountingExtractor::default();
        let mut extractor = MetadataExtractor::new(["a.yaml"], &counter, params());

        assert!(!extractor.is_loaded());
        assert_eq!(extractor.resources().unwrap().len(), 1);
        assert_eq!(extractor.resources().unwrap().len(), 1);
        assert!(extractor.is_loaded());
        assert_eq!(extractor.cached().map(<[_]>::len), Some(1));
        assert_eq!(counter.calls.get(), 1);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let counter = CountingExtractor::default();
        counter.fail_first.set(true);
        let mut extractor = MetadataExtractor::new(["a.yaml", "b.yaml"], &counter, params());

        assert!(extractor.resources().is_err());
        assert!(!extractor.is_loaded());
        assert!(extractor.cached().is_none());
        assert!(extractor.collected_parameters().is_empty());

        let resources = extractor.resources().unwrap();
        assert_eq!(resources.len(), 2);
        // One failed call, then both paths from scratch
        assert_eq!(counter.calls.get(), 3);
        assert_eq!(*counter.seen.borrow(), vec!["a.yaml", "a.yaml", "b.yaml"]);
    }

    #[test]
    fn test_paths_are_extracted_in_order() {
        let counter = CountingExtractor::default();
        let mut extractor =
            MetadataExtractor::new(["z.xml", "a.yaml", "m.yml"], &counter, params());

        let classes: Vec<String> =
            extractor.resources().unwrap().iter().map(|r| r.resource_class.clone()).collect();
        assert_eq!(classes, vec!["z.xml", "a.yaml", "m.yml"]);
        assert_eq!(extractor.paths(), ["z.xml", "a.yaml", "m.yml"]);
    }

    #[test]
    fn test_no_paths_caches_empty_list() {
        let counter = CountingExtractor::default();
        let mut extractor = MetadataExtractor::new(Vec::<String>::new(), &counter, None);

        assert!(extractor.resources().unwrap().is_empty());
        assert!(extractor.is_loaded());
        assert_eq!(counter.calls.get(), 0);
    }

    #[test]
    fn test_collected_parameters_are_exposed() {
        let counter = CountingExtractor::default();
        let mut extractor = MetadataExtractor::new(["a.yaml"], &counter, params());

        assert!(extractor.collected_parameters().is_empty());
        let resources = extractor.resources().unwrap();
        assert_eq!(resources[0].short_name.as_deref(), Some("Book"));
        assert_eq!(extractor.collected_parameters().get("name"), Some(&json!("Book")));
    }

    #[test]
    fn test_without_parameters_placeholders_stay() {
        let counter = CountingExtractor::default();
        let extractor = MetadataExtractor::new(["a.yaml"], &counter, None);

        assert!(!extractor.resolver().has_source());
        let resources = extractor.into_resources().unwrap();
        assert_eq!(resources[0].short_name.as_deref(), Some("%name%"));
    }

    #[test]
    fn test_sink_tracks_parameters() {
        let resolver = PlaceholderResolver::with_source(
            [("a", json!("A")), ("b", json!(2))].into_iter().collect::<ParameterBag>(),
        );
        let mut sink = ExtractionSink::new(&resolver);

        assert_eq!(sink.resolve(&json!({"x": "%a%"})).unwrap(), json!({"x": "A"}));
        assert_eq!(sink.resolve_str("%b%%%").unwrap(), "2%");
        sink.push(ResourceMetadata::new("App\\Entity\\Book"));

        assert_eq!(sink.resources().len(), 1);
        assert_eq!(sink.parameters().len(), 2);
        let (resources, parameters) = sink.finish();
        assert_eq!(resources[0].resource_class, "App\\Entity\\Book");
        assert_eq!(parameters.get("b"), Some(&json!(2)));
    }
}
