//! Test utilities for resmeta
//!
//! Fixtures for mapping, parameter and configuration files, a temporary project
//! layout, and one-time tracing setup for tests.
//!
//! ```rust,no_run
//! use resmeta_cli::test_utils::TestProject;
//!
//! let project = TestProject::with_books().unwrap();
//! assert!(project.path().join("resmeta.toml").exists());
//! ```

pub mod fixtures;

pub use fixtures::{ConfigFixture, MappingFixture, ParametersFixture};

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; does nothing if neither is set.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_ansi(true)
            .try_init();
    });
}

/// A temporary project directory, removed on drop.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Empty project
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// `resmeta.toml`, `parameters.yaml` and the book and author mappings under
    /// `resources/`
    pub fn with_books() -> Result<Self> {
        let project = Self::new()?;
        ConfigFixture::basic().write_to(project.path())?;
        ParametersFixture::basic().write_to(project.path())?;
        project.add_mapping(&MappingFixture::books_yaml())?;
        project.add_mapping(&MappingFixture::authors_xml())?;
        Ok(project)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a mapping file under `resources/`
    pub fn add_mapping(&self, mapping: &MappingFixture) -> Result<PathBuf> {
        mapping.write_to(&self.path().join("resources"))
    }
}
