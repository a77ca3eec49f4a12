//! Expand configured mapping paths into mapping files.
//!
//! Each entry is one of:
//! - a file, kept as is (its extension decides the format later)
//! - a directory, walked recursively for `.yaml`, `.yml` and `.xml` files
//! - a glob pattern such as `config/**/*.yaml`
//!
//! Directory and glob results are sorted so extraction order is stable across
//! platforms. Entries keep their configured order relative to each other.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::constants::MAPPING_EXTENSIONS;

/// Whether `entry` contains glob metacharacters
#[must_use]
pub fn is_glob(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

/// Whether `path` has a mapping file extension
#[must_use]
pub fn is_mapping_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MAPPING_EXTENSIONS.contains(&ext))
}

/// Expand `entries` into the list of mapping files to extract.
///
/// # Errors
///
/// Fails on an invalid glob pattern, an unreadable directory, or a non-glob entry
/// that does not exist.
pub fn expand_mapping_paths<S: AsRef<str>>(entries: &[S]) -> Result<Vec<String>> {
    let mut files = Vec::new();

    for entry in entries {
        let entry = entry.as_ref();
        if is_glob(entry) {
            let mut matched = Vec::new();
            for path in glob::glob(entry).with_context(|| format!("Invalid glob pattern: {entry}"))?
            {
                let path = path.with_context(|| format!("Failed to expand pattern: {entry}"))?;
                if path.is_dir() {
                    matched.extend(walk_directory(&path)?);
                } else {
                    matched.push(path);
                }
            }
            matched.sort();
            debug!("Pattern '{}' matched {} file(s)", entry, matched.len());
            files.extend(matched);
            continue;
        }

        let path = Path::new(entry);
        if path.is_dir() {
            let found = walk_directory(path)?;
            debug!("Directory '{}' holds {} mapping file(s)", entry, found.len());
            files.extend(found);
        } else if path.exists() {
            files.push(path.to_path_buf());
        } else {
            bail!("Mapping path does not exist: {entry}");
        }
    }

    Ok(files.into_iter().map(|p| p.to_string_lossy().into_owned()).collect())
}

fn walk_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && is_mapping_file(path) {
            trace!("Found mapping file: {}", path.display());
            found.push(path.to_path_buf());
        }
    }
    Ok(found)
}
