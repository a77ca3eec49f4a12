//! Filesystem helpers.

pub mod discovery;

pub use discovery::{expand_mapping_paths, is_glob, is_mapping_file};
