//! Tera-based templating for publication documents.
//!
//! This module turns a rendering context into text. It is split into:
//!
//! - [`loader`]: resolving template names to parsed templates ([`TemplateLoader`])
//! - [`template`]: parsed template handles and Tera error translation
//! - [`method`]: the output [`SerializationMethod`]
//! - [`renderer`]: [`TemplateRenderer`], the loader + method pair entities render through
//! - [`error`]: structured [`TemplateError`]s
//!
//! # Template Syntax
//!
//! Templates use Tera syntax. A package document template might read:
//!
//! ```text
//! <dc:title>{{ title }}</dc:title>
//! {%- for item in text_items %}
//! <itemref idref="{{ item.id }}"/>
//! {%- endfor %}
//! ```
//!
//! With a markup [`SerializationMethod`] every interpolated value is escaped;
//! use `{{ content | safe }}` for values that already hold markup.
//!
//! # Example
//!
//! ```rust
//! use librepub::templating::{MemoryLoader, SerializationMethod, TemplateRenderer};
//! use tera::Context;
//!
//! # fn example() -> Result<(), librepub::templating::TemplateError> {
//! let loader = MemoryLoader::new().with_template("title.xhtml", "<h1>{{ title }}</h1>");
//! let renderer = TemplateRenderer::new(loader, SerializationMethod::Xhtml);
//!
//! let mut context = Context::new();
//! context.insert("title", "Moby Dick");
//! assert_eq!(renderer.render("title.xhtml", &context)?, "<h1>Moby Dick</h1>");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;
pub mod method;
pub mod renderer;
pub mod template;

pub use error::{ErrorLocation, TemplateError};
pub use loader::{BuiltinLoader, DirectoryLoader, LayeredLoader, MemoryLoader, TemplateLoader};
pub use method::SerializationMethod;
pub use renderer::TemplateRenderer;
pub use template::Template;
