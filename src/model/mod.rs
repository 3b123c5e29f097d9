//! Publication content that renders to files.
//!
//! Every entity here implements [`Renderable`]: it names a template, builds a
//! rendering context from its own fields, and can write the rendered text to a
//! path. [`Publication`] overrides the context to add the derived
//! `text_items`; [`Item`] uses its fields as-is.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use librepub::model::{Item, Publication, Renderable};
//! use librepub::templating::{BuiltinLoader, SerializationMethod, TemplateRenderer};
//!
//! # fn example() -> Result<(), librepub::core::LibrepubError> {
//! let chapter = Arc::new(
//!     Item::new("ch1", "chapter1.xhtml", "application/xhtml+xml").with_content("<p>Hello</p>"),
//! );
//! let publication =
//!     Publication::new("T", "en", "urn:uuid:1").with_items(vec![Arc::clone(&chapter)]);
//!
//! let renderer = TemplateRenderer::new(BuiltinLoader, SerializationMethod::Xml);
//! let package = publication.render(&renderer)?;
//! assert!(package.contains(r#"<itemref idref="ch1"/>"#));
//! # Ok(())
//! # }
//! ```

pub mod item;
pub mod publication;

pub use item::Item;
pub use publication::Publication;

use std::io::Write;
use std::path::Path;

use tera::Context as TeraContext;

use crate::core::{FileOperation, FileResultExt, LibrepubError};
use crate::templating::{TemplateError, TemplateRenderer};

/// Something that renders through a named template.
///
/// Implementors provide the template name and the context; rendering and
/// serialization come for free. Override [`to_context`](Self::to_context) to
/// inject computed fields.
pub trait Renderable {
    /// Name of the template this entity renders through.
    fn template_name(&self) -> &str;

    /// The rendering context: field name to value.
    fn to_context(&self) -> TeraContext;

    /// Render this entity to text.
    ///
    /// # Errors
    ///
    /// Propagates the renderer's [`TemplateError`]: not-found class when the
    /// template cannot be resolved, render class when it fails to render.
    fn render(&self, renderer: &TemplateRenderer) -> Result<String, TemplateError> {
        renderer.render(self.template_name(), &self.to_context())
    }

    /// Render this entity and write the text to `path`.
    ///
    /// Rendering completes before the file is opened, so a template failure
    /// leaves `path` untouched. The file is created or truncated; parent
    /// directories are not created. A failed write may leave a partial file.
    ///
    /// # Errors
    ///
    /// Returns [`LibrepubError::Template`] for rendering failures and
    /// [`LibrepubError::File`] when the file cannot be created or written.
    fn serialize(&self, renderer: &TemplateRenderer, path: &Path) -> Result<(), LibrepubError> {
        let rendered = self.render(renderer)?;

        let mut file = std::fs::File::create(path).with_file_context(
            FileOperation::Create,
            path,
            format!("serializing template '{}'", self.template_name()),
            "model::Renderable::serialize",
        )?;
        file.write_all(rendered.as_bytes()).with_file_context(
            FileOperation::Write,
            path,
            format!("serializing template '{}'", self.template_name()),
            "model::Renderable::serialize",
        )?;

        tracing::debug!("Wrote {} bytes to {}", rendered.len(), path.display());
        Ok(())
    }
}
