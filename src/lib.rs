//! librepub - template-driven rendering of EPUB publication documents
//!
//! A publication (title, language, identifier, optional descriptive metadata
//! and an ordered list of items) is rendered through Tera templates into the
//! text files of an EPUB package: the OPF package document and one XHTML
//! document per chapter.
//!
//! # Architecture Overview
//!
//! - Entities implement [`model::Renderable`]: they name a template and build
//!   a rendering context from their fields
//! - A [`templating::TemplateRenderer`] pairs a [`templating::TemplateLoader`]
//!   with a [`templating::SerializationMethod`]; entities render through it
//! - [`model::Publication`] adds the derived `text_items` (its XHTML items, in
//!   order) to its context, so the package template can build the spine
//! - Every [`model::Item`] renders through the `text_item.xhtml` template
//!
//! # Core Modules
//!
//! - [`model`] - publications, items and the [`model::Renderable`] trait
//! - [`templating`] - template loading, rendering and template errors
//! - [`config`] - render configuration (`librepub.toml`, environment overrides)
//! - [`manifest`] - TOML publication manifests
//! - [`core`] - library and file operation errors, user-facing error display
//! - [`cli`] - the `librepub` command line
//! - [`constants`] - content-type markers and default names
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use librepub::config::RenderConfig;
//! use librepub::model::{Item, Publication, Renderable};
//!
//! # fn example() -> anyhow::Result<()> {
//! let chapter = Arc::new(
//!     Item::new("ch1", "chapter1.xhtml", "application/xhtml+xml").with_content("<p>Hello</p>"),
//! );
//! let publication = Publication::new("T", "en", "urn:uuid:1").with_items(vec![chapter]);
//!
//! let renderer = RenderConfig::default().renderer();
//! let out = tempfile::tempdir()?;
//! publication.serialize(&renderer, &out.path().join("content.opf"))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! librepub render publication.toml --out-dir build/OEBPS
//! librepub context publication.toml
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod manifest;
pub mod model;
pub mod templating;

// Test utilities (only compiled for tests)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
