//! Error handling for resmeta
//!
//! This module provides the error type shared by placeholder resolution, parameter
//! sources and resource extraction, together with a user-friendly rendering layer
//! for the CLI. The error system follows two rules:
//! 1. **Strongly-typed errors** so callers can match on the failure they care about
//! 2. **User-friendly messages** with details and suggestions when shown in a terminal
//!
//! # Error Categories
//!
//! - **Parameters**: [`MetadataError::ParameterNotFound`],
//!   [`MetadataError::InvalidParameterType`], [`MetadataError::ForbiddenDynamicReference`]
//! - **Extraction**: [`MetadataError::Io`], [`MetadataError::Parse`],
//!   [`MetadataError::InvalidMapping`], [`MetadataError::UnsupportedFormat`]
//! - **Configuration**: [`MetadataError::Config`]
//!
//! Every error is fail-fast. Nothing at this layer retries, substitutes defaults or
//! logs; callers decide how errors are presented.
//!
//! # Examples
//!
//! ```rust,no_run
//! use resmeta_cli::core::{MetadataError, user_friendly_error};
//!
//! let error = MetadataError::ParameterNotFound {
//!     name: "api_prefix".to_string(),
//!     alternatives: vec!["api.prefix".to_string()],
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for resmeta operations.
///
/// Parameter errors carry enough context to point a configuration author at the
/// offending placeholder; extraction errors carry the path being processed.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// A `%name%` placeholder references a parameter the source does not define.
    #[error("You have requested a non-existent parameter \"{name}\".{}", format_alternatives(.alternatives))]
    ParameterNotFound {
        /// The parameter name between the percent signs
        name: String,
        /// Known parameter names close to `name`, closest first
        alternatives: Vec<String>,
    },

    /// A parameter resolved to something other than a string or a number.
    #[error(
        "The container parameter \"{name}\", used in the resource configuration value \"{value}\", must be a string or numeric, but it is of type {actual_type}."
    )]
    InvalidParameterType {
        /// The parameter name between the percent signs
        name: String,
        /// The raw configuration string that contained the placeholder
        value: String,
        /// Type of the value the parameter resolved to
        actual_type: String,
    },

    /// A placeholder uses the `env(NAME)` runtime lookup syntax.
    #[error("Using \"%{name}%\" is not allowed in resource configuration.")]
    ForbiddenDynamicReference {
        /// The full placeholder name, e.g. `env(DATABASE_URL)`
        name: String,
    },

    /// Reading a mapping or parameter file failed
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// The file that could not be read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A mapping or parameter file is not valid in its format
    #[error("Invalid {format} in {}: {reason}", .path.display())]
    Parse {
        /// The file that failed to parse
        path: PathBuf,
        /// Format name (YAML, XML, JSON, TOML)
        format: &'static str,
        /// Parser error message
        reason: String,
    },

    /// A mapping file parsed but does not have the expected structure
    #[error("Invalid resource mapping in {}: {reason}", .path.display())]
    InvalidMapping {
        /// The mapping file
        path: PathBuf,
        /// What is wrong with the structure
        reason: String,
    },

    /// No extractor handles the file's extension
    #[error("Unsupported mapping format for {}", .path.display())]
    UnsupportedFormat {
        /// The file with the unsupported extension
        path: PathBuf,
    },

    /// Project configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },
}

fn format_alternatives(alternatives: &[String]) -> String {
    match alternatives {
        [] => String::new(),
        [single] => format!(" Did you mean this: \"{single}\"?"),
        many => format!(" Did you mean one of these: \"{}\"?", many.join("\", \"")),
    }
}

impl MetadataError {
    /// Returns true for errors raised while substituting placeholders.
    #[must_use]
    pub const fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            Self::ParameterNotFound { .. }
                | Self::InvalidParameterType { .. }
                | Self::ForbiddenDynamicReference { .. }
        )
    }
}

/// Error wrapper that adds user-facing details and a suggestion.
///
/// Produced by [`user_friendly_error`] and printed by the binary before exiting.
#[derive(Debug)]
pub struct ErrorContext {
    /// The error message shown on the first line
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`MetadataError`] anywhere in the error chain and tailors the
/// suggestion to the variant. Other errors are shown with their full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let context_message = error.to_string();

    if let Some(metadata_error) = error.chain().find_map(|e| e.downcast_ref::<MetadataError>()) {
        let ctx = create_error_context(metadata_error);
        if context_message != metadata_error.to_string() {
            return ctx.with_details(context_message);
        }
        return ctx;
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(format!("Invalid configuration file syntax: {toml_error}"))
            .with_suggestion(
                "Check the TOML syntax in your resmeta.toml file. Verify quotes, brackets, and indentation",
            );
    }

    let mut message = context_message;
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(message)
}

fn create_error_context(error: &MetadataError) -> ErrorContext {
    let ctx = ErrorContext::new(error.to_string());
    match error {
        MetadataError::ParameterNotFound { name, .. } => ctx.with_suggestion(format!(
            "Define '{name}' in the [parameters] table of resmeta.toml, in a parameter file, or pass --param {name}=VALUE"
        )),
        MetadataError::InvalidParameterType { name, .. } => ctx
            .with_suggestion(format!("Change '{name}' to a string or a number"))
            .with_details(
                "Only string and numeric parameters can be embedded in a configuration string",
            ),
        MetadataError::ForbiddenDynamicReference { .. } => ctx
            .with_suggestion("Replace the env() placeholder with a regular parameter")
            .with_details(
                "Environment variables are resolved at runtime and cannot be used in resource metadata",
            ),
        MetadataError::Io { .. } => {
            ctx.with_suggestion("Check that the file exists and is readable")
        }
        MetadataError::Parse { format, .. } => {
            ctx.with_suggestion(format!("Fix the {format} syntax error reported above"))
        }
        MetadataError::InvalidMapping { .. } => ctx.with_details(
            "Resource mappings must have a top-level 'resources' element keyed by resource class",
        ),
        MetadataError::UnsupportedFormat { .. } => {
            ctx.with_suggestion("Use a .yaml, .yml or .xml mapping file")
        }
        MetadataError::Config { .. } => ctx.with_suggestion("Check your resmeta.toml settings"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_not_found_message() {
        let error = MetadataError::ParameterNotFound {
            name: "foo".to_string(),
            alternatives: vec![],
        };
        assert_eq!(error.to_string(), "You have requested a non-existent parameter \"foo\".");

        let error = MetadataError::ParameterNotFound {
            name: "fooo".to_string(),
            alternatives: vec!["foo".to_string()],
        };
        assert!(error.to_string().ends_with("Did you mean this: \"foo\"?"));

        let error = MetadataError::ParameterNotFound {
            name: "fo".to_string(),
            alternatives: vec!["foo".to_string(), "for".to_string()],
        };
        assert!(error.to_string().ends_with("Did you mean one of these: \"foo\", \"for\"?"));
    }

    #[test]
    fn test_invalid_type_message_mentions_everything() {
        let error = MetadataError::InvalidParameterType {
            name: "flag".to_string(),
            value: "/api/%flag%".to_string(),
            actual_type: "boolean".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("\"flag\""));
        assert!(message.contains("/api/%flag%"));
        assert!(message.contains("boolean"));
    }

    #[test]
    fn test_forbidden_reference_message() {
        let error = MetadataError::ForbiddenDynamicReference {
            name: "env(FOO)".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Using \"%env(FOO)%\" is not allowed in resource configuration."
        );
        assert!(error.is_parameter_error());
    }

    #[test]
    fn test_user_friendly_error_finds_wrapped_metadata_error() {
        let error = anyhow::Error::from(MetadataError::ParameterNotFound {
            name: "prefix".to_string(),
            alternatives: vec![],
        })
        .context("Failed to extract resources");

        let ctx = user_friendly_error(error);
        assert!(ctx.message.contains("non-existent parameter \"prefix\""));
        assert_eq!(ctx.details.as_deref(), Some("Failed to extract resources"));
        assert!(ctx.suggestion.unwrap().contains("--param prefix=VALUE"));
    }

    #[test]
    fn test_user_friendly_error_generic_chain() {
        let error = anyhow::anyhow!("root cause").context("outer");
        let ctx = user_friendly_error(error);
        assert!(ctx.message.starts_with("outer"));
        assert!(ctx.message.contains("1: root cause"));
        assert!(ctx.suggestion.is_none());
    }

    #[test]
    fn test_error_context_display() {
        let ctx = ErrorContext::new("boom").with_details("why").with_suggestion("fix it");
        assert_eq!(ctx.to_string(), "boom\nDetails: why\nSuggestion: fix it");
    }
}
