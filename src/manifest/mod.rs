//! Publication manifests (`publication.toml`)
//!
//! A manifest describes one publication in TOML: the metadata fields at the
//! top level and one `[[items]]` table per content unit. Item content is given
//! inline with `content` or read from `content_file`, a path relative to the
//! manifest's directory.
//!
//! ```toml
//! title = "Moby Dick"
//! language = "en"
//! identifier = "urn:isbn:9780142437247"
//! creator = "Herman Melville"
//!
//! [[items]]
//! id = "ch1"
//! file = "text/chapter1.xhtml"
//! type = "application/xhtml+xml"
//! content_file = "chapters/chapter1.html"
//!
//! [[items]]
//! id = "cover"
//! file = "images/cover.jpg"
//! type = "image/jpeg"
//! ```
//!
//! A manifest without any `[[items]]` table yields a publication whose item
//! list is absent, which renders differently from an explicit empty list
//! (`items = []`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::LibrepubError;
use crate::core::file_error::read_text_file;
use crate::model::{Item, Publication};

/// One `[[items]]` entry of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestItem {
    pub id: String,
    pub file: String,
    #[serde(rename = "type")]
    pub media_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Path of a file holding the content, relative to the manifest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_file: Option<PathBuf>,
}

/// A publication as written in a manifest file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublicationManifest {
    pub title: String,
    pub language: String,
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Template for the package document, overriding `content.opf`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ManifestItem>>,

    /// Directory the manifest was loaded from
    #[serde(skip)]
    manifest_dir: Option<PathBuf>,
}

impl PublicationManifest {
    /// Load a manifest from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid manifest.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_text_file(path, "reading publication manifest", "manifest::load")?;

        let mut manifest = Self::parse(&content, path)
            .with_context(|| format!("Failed to load manifest: {}", path.display()))?;
        manifest.manifest_dir = path.parent().map(Path::to_path_buf);

        tracing::debug!(
            "Loaded manifest {} with {} item(s)",
            path.display(),
            manifest.items.as_ref().map_or(0, Vec::len)
        );
        Ok(manifest)
    }

    /// Parse manifest text; `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`LibrepubError::ManifestParse`] when the text is not a valid manifest.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, LibrepubError> {
        toml::from_str(content).map_err(|e| LibrepubError::ManifestParse {
            file: origin.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Directory relative `content_file` paths resolve against.
    pub fn base_dir(&self) -> &Path {
        self.manifest_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }

    /// Build the publication this manifest describes, reading every
    /// `content_file` from disk.
    ///
    /// # Errors
    ///
    /// Returns [`LibrepubError::InvalidManifestEntry`] for an item giving both
    /// `content` and `content_file`, and [`LibrepubError::File`] when a
    /// content file cannot be read.
    pub fn to_publication(&self) -> Result<Publication, LibrepubError> {
        let mut publication = Publication::new(&self.title, &self.language, &self.identifier);
        publication.subject.clone_from(&self.subject);
        publication.description.clone_from(&self.description);
        publication.creator.clone_from(&self.creator);
        publication.publisher.clone_from(&self.publisher);
        publication.date.clone_from(&self.date);

        if let Some(template) = &self.template {
            publication = publication.with_template(template);
        }

        if let Some(entries) = &self.items {
            let items = entries
                .iter()
                .map(|entry| self.build_item(entry).map(Arc::new))
                .collect::<Result<Vec<_>, _>>()?;
            publication = publication.with_items(items);
        }

        Ok(publication)
    }

    fn build_item(&self, entry: &ManifestItem) -> Result<Item, LibrepubError> {
        let item = Item::new(&entry.id, &entry.file, &entry.media_type);

        match (&entry.content, &entry.content_file) {
            (Some(_), Some(_)) => Err(LibrepubError::InvalidManifestEntry {
                name: entry.id.clone(),
                reason: "'content' and 'content_file' are mutually exclusive".to_string(),
            }),
            (Some(content), None) => Ok(item.with_content(content)),
            (None, Some(content_file)) => {
                let path = self.base_dir().join(content_file);
                let content = read_text_file(
                    &path,
                    &format!("reading content of item '{}'", entry.id),
                    "manifest::to_publication",
                )?;
                Ok(item.with_content(content))
            }
            (None, None) => Ok(item),
        }
    }
}
