//! Test fixtures for mapping, parameter and configuration files

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A resource mapping file
#[derive(Clone, Debug)]
pub struct MappingFixture {
    pub file_name: String,
    pub content: String,
}

impl MappingFixture {
    /// YAML mapping for `App\Entity\Book` using `%api_prefix%` and `%book_short_name%`
    pub fn books_yaml() -> Self {
        Self {
            file_name: "books.yaml".to_string(),
            content: r#"
resources:
  App\Entity\Book:
    shortName: '%book_short_name%'
    description: 'Books at 100%% discount'
    itemOperations:
      get:
        path: '%api_prefix%/books/{id}'
    collectionOperations:
      get: ~
    attributes:
      pagination_items_per_page: '%page_size%'
    properties:
      isbn:
        identifier: true
      reviews:
        subresource:
          resourceClass: App\Entity\Review
          collection: true
"#
            .trim_start()
            .to_string(),
        }
    }

    /// XML mapping for `App\Entity\Author` using `%api_prefix%`
    pub fn authors_xml() -> Self {
        Self {
            file_name: "authors.xml".to_string(),
            content: r#"<?xml version="1.0" encoding="UTF-8" ?>
<resources xmlns="https://api-platform.com/schema/metadata">
    <resource class="App\Entity\Author" shortName="Author">
        <collectionOperations>
            <collectionOperation name="get">
                <attribute name="path">%api_prefix%/authors</attribute>
            </collectionOperation>
        </collectionOperations>
        <property name="name" required="true"/>
    </resource>
</resources>
"#
            .to_string(),
        }
    }

    /// YAML mapping that references `%env(DATABASE_URL)%`
    pub fn with_env_reference() -> Self {
        Self::simple(
            "env.yaml",
            "resources:\n  App\\Entity\\Log:\n    description: '%env(DATABASE_URL)%'\n",
        )
    }

    /// YAML mapping that references an undefined parameter
    pub fn with_unknown_parameter() -> Self {
        Self::simple(
            "unknown.yaml",
            "resources:\n  App\\Entity\\Log:\n    shortName: '%api_prefx%'\n",
        )
    }

    pub fn simple(file_name: &str, content: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            content: content.to_string(),
        }
    }

    /// Write the fixture under `dir`, creating parent directories
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        write_file(&dir.join(&self.file_name), &self.content)
    }
}

/// Parameters matching the placeholders in [`MappingFixture`]
#[derive(Clone, Debug)]
pub struct ParametersFixture {
    pub file_name: String,
    pub content: String,
}

impl ParametersFixture {
    /// `parameters.yaml` with `api_prefix`, `book_short_name` and `page_size`
    pub fn basic() -> Self {
        Self {
            file_name: "parameters.yaml".to_string(),
            content: "parameters:\n  api_prefix: /api\n  book_short_name: Book\n  page_size: 30\n"
                .to_string(),
        }
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        write_file(&dir.join(&self.file_name), &self.content)
    }
}

/// `resmeta.toml`
#[derive(Clone, Debug)]
pub struct ConfigFixture {
    pub content: String,
}

impl ConfigFixture {
    /// Mapping directory `resources/` and `parameters.yaml`
    pub fn basic() -> Self {
        Self {
            content: "paths = [\"resources\"]\nparameter_files = [\"parameters.yaml\"]\n".to_string(),
        }
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        write_file(&dir.join(crate::constants::CONFIG_FILE_NAME), &self.content)
    }
}

fn write_file(path: &Path, content: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}
