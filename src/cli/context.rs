//! `librepub context`: show what a template would see.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::manifest::PublicationManifest;
use crate::model::Renderable;

/// Print the rendering context of a publication as pretty JSON.
///
/// Useful when writing a custom package template: every key printed here is
/// available as a template variable, including the derived `text_items`.
#[derive(Args, Debug)]
pub struct ContextCommand {
    /// Publication manifest (TOML)
    pub(crate) manifest: PathBuf,
}

impl ContextCommand {
    /// Load the manifest and print its publication context to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be loaded or a content file
    /// cannot be read.
    pub fn execute(self) -> Result<()> {
        println!("{}", self.context_json()?);
        Ok(())
    }

    fn context_json(&self) -> Result<String> {
        let manifest = PublicationManifest::load(&self.manifest)?;
        let publication = manifest
            .to_publication()
            .with_context(|| format!("Failed to build publication from {}", self.manifest.display()))?;

        Ok(serde_json::to_string_pretty(&publication.to_context().into_json())?)
    }
}
