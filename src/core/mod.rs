//! Core types for resmeta
//!
//! This module holds the error type shared by every layer of the crate and the
//! helpers that turn errors into user-facing messages.
//!
//! - [`MetadataError`] - Enumerated error types for parameter resolution and extraction
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format

pub mod error;

pub use error::{ErrorContext, MetadataError, user_friendly_error};

/// Result alias used by the library layers.
pub type Result<T, E = MetadataError> = std::result::Result<T, E>;
