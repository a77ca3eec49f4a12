//! resmeta - API resource metadata extraction with `%parameter%` placeholders
//!
//! Resource mapping files (YAML or XML) declare the classes exposed by a web API
//! together with their operations, attributes and properties. Values in those files
//! may reference configuration parameters as `%name%`; they are substituted while
//! the files are parsed, and the parameters that were used are reported alongside
//! the resources.
//!
//! # Core Modules
//!
//! - [`metadata`] - path extractors, the cached [`metadata::MetadataExtractor`] and
//!   the resource types it produces
//! - [`resolver`] - placeholder substitution over nested values
//! - [`parameters`] - parameter sources (in-memory bags, service containers)
//! - [`core`] - error types and user-facing error rendering
//!
//! ## Supporting Modules
//! - [`config`] - `resmeta.toml` project configuration
//! - [`utils`] - mapping path discovery
//! - [`cli`] - the `resmeta` command-line interface
//!
//! # Placeholder Syntax
//!
//! | Input | Output |
//! |-------|--------|
//! | `%api_prefix%/books` | value of `api_prefix` followed by `/books` |
//! | `100%%` | `100%` |
//! | `%env(DATABASE_URL)%` | error: environment references are not allowed |
//! | `50% off` | unchanged (a lone `%` is literal) |
//!
//! Only string and numeric parameter values can be substituted. Containers are
//! resolved element by element; keys are left as written.
//!
//! # Example
//!
//! ```rust,no_run
//! use resmeta_cli::metadata::{FormatExtractor, MetadataExtractor};
//! use resmeta_cli::parameters::ParameterBag;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn example() -> resmeta_cli::core::Result<()> {
//! let mut parameters = ParameterBag::new();
//! parameters.set("api_prefix", json!("/api"));
//!
//! let mut extractor = MetadataExtractor::new(
//!     ["config/resources/books.yaml"],
//!     FormatExtractor::new(),
//!     Some(Arc::new(parameters)),
//! );
//!
//! for resource in extractor.resources()? {
//!     println!("{} ({:?})", resource.resource_class, resource.short_name);
//! }
//! println!("used: {:?}", extractor.collected_parameters());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod metadata;
pub mod parameters;
pub mod resolver;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
