//! Render configuration for librepub
//!
//! Settings that apply to every render of a process live in a
//! [`RenderConfig`]: the serialization method and the template search path.
//! Rather than being read from ambient global state, the configuration is
//! turned into a [`TemplateRenderer`] once and passed to whatever renders.
//!
//! # Configuration File (`librepub.toml`)
//!
//! ```toml
//! # Output form for every render: xml, xhtml, html or text
//! serialization_method = "xml"
//!
//! # Directories searched for templates, in order. Relative paths are
//! # resolved against the directory holding this file. The builtin
//! # content.opf and text_item.xhtml templates are always searched last.
//! template_dirs = ["templates"]
//! ```
//!
//! # Environment Overrides
//!
//! - `LIBREPUB_SERIALIZATION_METHOD` replaces `serialization_method`
//! - `LIBREPUB_TEMPLATE_DIR` is searched before every configured directory

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILE_NAME, ENV_SERIALIZATION_METHOD, ENV_TEMPLATE_DIR};
use crate::core::LibrepubError;
use crate::core::file_error::read_text_file;
use crate::templating::{
    BuiltinLoader, DirectoryLoader, LayeredLoader, SerializationMethod, TemplateRenderer,
};

/// Process-wide render settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Output form applied to every render
    pub serialization_method: SerializationMethod,

    /// Template directories, searched in order before the builtin templates
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub template_dirs: Vec<PathBuf>,
}

impl RenderConfig {
    /// Load configuration from an optional path.
    ///
    /// With an explicit path the file must exist. Without one,
    /// `librepub.toml` in the current directory is used when present and the
    /// defaults otherwise. Environment overrides are applied in both cases.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or an
    /// environment override holds an unknown serialization method.
    pub fn load_with_optional(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default_path = PathBuf::from(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    Self::load_from(&default_path)?
                } else {
                    tracing::debug!("No {} found, using default configuration", CONFIG_FILE_NAME);
                    Self::default()
                }
            }
        };

        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Load configuration from a specific file.
    ///
    /// Relative `template_dirs` are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = read_text_file(path, "loading render configuration", "config::load_from")
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content).map_err(|e| LibrepubError::Config {
            message: format!("{} is not valid: {}", path.display(), e.message()),
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.template_dirs = config
            .template_dirs
            .into_iter()
            .map(|dir| if dir.is_relative() { base.join(dir) } else { dir })
            .collect();

        tracing::debug!(
            "Loaded configuration from {}: method={}, {} template dir(s)",
            path.display(),
            config.serialization_method,
            config.template_dirs.len()
        );
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a closure so the
    /// process environment stays untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LibrepubError::Config`] when the method override is not a
    /// known serialization method.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(method) = lookup(ENV_SERIALIZATION_METHOD) {
            self.serialization_method = method.parse().map_err(|message| {
                LibrepubError::Config {
                    message: format!("{}: {}", ENV_SERIALIZATION_METHOD, message),
                }
            })?;
        }

        if let Some(dir) = lookup(ENV_TEMPLATE_DIR).filter(|dir| !dir.trim().is_empty()) {
            self.template_dirs.insert(0, PathBuf::from(dir));
        }

        Ok(self)
    }

    /// Build the renderer described by this configuration.
    ///
    /// Templates are looked up in `template_dirs` first, then among the
    /// builtin templates.
    pub fn renderer(&self) -> TemplateRenderer {
        let mut loader = LayeredLoader::new();
        if !self.template_dirs.is_empty() {
            loader = loader.with_layer(DirectoryLoader::with_roots(self.template_dirs.clone()));
        }
        loader = loader.with_layer(BuiltinLoader);

        TemplateRenderer::new(loader, self.serialization_method)
    }
}
