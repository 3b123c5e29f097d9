//! Template rendering engine with Tera.
//!
//! This module provides the [`TemplateRenderer`] struct: the collaborator every
//! renderable entity renders through. It pairs a [`TemplateLoader`] with the
//! [`SerializationMethod`] applied to every render it performs.

use std::sync::Arc;

use tera::Context as TeraContext;

use super::error::TemplateError;
use super::loader::TemplateLoader;
use super::method::SerializationMethod;

/// Renders named templates against a context.
///
/// Cloning a renderer is cheap and shares the loader. Templates are loaded
/// afresh on every render; nothing is cached between calls.
#[derive(Clone)]
pub struct TemplateRenderer {
    loader: Arc<dyn TemplateLoader>,
    method: SerializationMethod,
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer").field("method", &self.method).finish_non_exhaustive()
    }
}

impl TemplateRenderer {
    /// Create a renderer over `loader` producing `method` output.
    pub fn new(loader: impl TemplateLoader + 'static, method: SerializationMethod) -> Self {
        Self {
            loader: Arc::new(loader),
            method,
        }
    }

    /// The serialization method applied to every render.
    pub fn method(&self) -> SerializationMethod {
        self.method
    }

    /// A renderer sharing this loader but producing `method` output.
    #[must_use]
    pub fn with_method(&self, method: SerializationMethod) -> Self {
        Self {
            loader: Arc::clone(&self.loader),
            method,
        }
    }

    /// The loader templates are resolved through.
    pub fn loader(&self) -> &dyn TemplateLoader {
        self.loader.as_ref()
    }

    /// Render the template called `name` with the given context.
    ///
    /// # Errors
    ///
    /// Returns a not-found class error if `name` cannot be resolved, and a
    /// render class error ([`TemplateError::SyntaxError`],
    /// [`TemplateError::VariableNotFound`], [`TemplateError::RenderFailed`]) if
    /// it resolves but does not render.
    pub fn render(&self, name: &str, context: &TeraContext) -> Result<String, TemplateError> {
        tracing::debug!("Rendering template '{}' as {}", name, self.method);

        let mut template = self.loader.load(name)?;

        Self::log_context_as_kv(context);

        let rendered = template.render(self.method, context)?;
        tracing::debug!("Rendered template '{}' ({} bytes)", name, rendered.len());
        Ok(rendered)
    }

    /// Format the template context as indented key/value lines.
    pub fn format_context_as_string(context: &TeraContext) -> String {
        fn format_value(key: &str, value: &serde_json::Value, indent: usize) -> Vec<String> {
            let prefix = "  ".repeat(indent);
            let mut lines = Vec::new();

            match value {
                serde_json::Value::Object(map) => {
                    lines.push(format!("{}{}:", prefix, key));
                    for (k, v) in map {
                        lines.extend(format_value(k, v, indent + 1));
                    }
                }
                serde_json::Value::Array(arr) => {
                    lines.push(format!("{}{}: [{} items]", prefix, key, arr.len()));
                    for (i, item) in arr.iter().take(3).enumerate() {
                        lines.extend(format_value(&format!("[{}]", i), item, indent + 1));
                    }
                    if arr.len() > 3 {
                        lines.push(format!("{}  ... {} more items", prefix, arr.len() - 3));
                    }
                }
                serde_json::Value::String(s) => {
                    if s.chars().count() > 100 {
                        let truncated: String = s.chars().take(97).collect();
                        lines.push(format!(
                            "{}{}: \"{}...\" ({} chars)",
                            prefix,
                            key,
                            truncated,
                            s.chars().count()
                        ));
                    } else {
                        lines.push(format!("{}{}: \"{}\"", prefix, key, s));
                    }
                }
                serde_json::Value::Number(n) => lines.push(format!("{}{}: {}", prefix, key, n)),
                serde_json::Value::Bool(b) => lines.push(format!("{}{}: {}", prefix, key, b)),
                serde_json::Value::Null => lines.push(format!("{}{}: null", prefix, key)),
            }
            lines
        }

        let mut output = String::new();
        if let serde_json::Value::Object(map) = context.clone().into_json() {
            for (key, value) in &map {
                output.push_str(&format_value(key, value, 1).join("\n"));
                output.push('\n');
            }
        }
        output
    }

    /// Log the template context as key-value pairs at debug level.
    fn log_context_as_kv(context: &TeraContext) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        for line in Self::format_context_as_string(context).lines() {
            tracing::debug!("{}", line);
        }
    }
}
