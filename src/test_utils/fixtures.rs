//! Test fixtures for publication manifests and template directories

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::TEXT_CONTENT_TYPE;
use crate::model::{Item, Publication};

/// Test fixture for creating sample `publication.toml` files
#[derive(Clone, Debug)]
pub struct ManifestFixture {
    pub content: String,
    pub name: String,
}

impl ManifestFixture {
    /// Two chapters with inline content around a cover image
    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            content: r#"
title = "Moby Dick"
language = "en"
identifier = "urn:isbn:9780142437247"
creator = "Herman Melville"
publisher = "Harper & Brothers"

[[items]]
id = "cover"
file = "images/cover.jpg"
type = "image/jpeg"

[[items]]
id = "ch1"
file = "text/chapter1.xhtml"
type = "application/xhtml+xml"
content = "<h1>Loomings</h1><p>Call me Ishmael.</p>"

[[items]]
id = "style"
file = "styles/main.css"
type = "text/css"

[[items]]
id = "ch2"
file = "text/chapter2.xhtml"
type = "application/xhtml+xml"
content = "<h1>The Carpet-Bag</h1>"
"#
            .trim()
            .to_string(),
        }
    }

    /// Required metadata only, no `[[items]]`
    pub fn metadata_only() -> Self {
        Self {
            name: "metadata_only".to_string(),
            content: r#"
title = "Empty Book"
language = "en"
identifier = "urn:uuid:00000000-0000-0000-0000-000000000000"
"#
            .trim()
            .to_string(),
        }
    }

    /// Manifest with invalid TOML syntax
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: r#"
title = "Broken
language = "en"

[[items]
id = "ch1"
"#
            .trim()
            .to_string(),
        }
    }

    /// Manifest asking for a package template nobody provides
    pub fn missing_template() -> Self {
        Self {
            name: "missing_template".to_string(),
            content: r#"
title = "T"
language = "en"
identifier = "urn:uuid:1"
template = "does-not-exist.opf"
"#
            .trim()
            .to_string(),
        }
    }

    /// Write the manifest as `publication.toml` under `dir`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let manifest_path = dir.join("publication.toml");
        fs::write(&manifest_path, &self.content)
            .with_context(|| format!("Failed to write {} fixture", self.name))?;
        Ok(manifest_path)
    }
}

/// Test fixture for a directory of templates
#[derive(Clone, Debug, Default)]
pub struct TemplateDirFixture {
    pub templates: Vec<(String, String)>,
}

impl TemplateDirFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template; nested names such as `nav/toc.xhtml` are allowed
    pub fn with_template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates.push((name.into(), source.into()));
        self
    }

    /// Write every template below `dir`, creating subdirectories
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        for (name, source) in &self.templates {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, source)
                .with_context(|| format!("Failed to write template {}", path.display()))?;
        }
        Ok(dir.to_path_buf())
    }
}

/// The publication from the end-to-end example: one XHTML chapter.
pub fn sample_publication() -> (Publication, Arc<Item>) {
    let chapter = Arc::new(
        Item::new("ch1", "chapter1.xhtml", TEXT_CONTENT_TYPE).with_content("<p>Hello</p>"),
    );
    let publication =
        Publication::new("T", "en", "urn:uuid:1").with_items(vec![Arc::clone(&chapter)]);
    (publication, chapter)
}
