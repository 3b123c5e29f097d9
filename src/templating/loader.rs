//! Template resolution.
//!
//! A [`TemplateLoader`] maps a template name to a parsed [`Template`]. Loaders
//! hold no cache: every `load` reads and parses the template again, so edits to
//! template files are picked up by the next render.
//!
//! # Implementations
//!
//! - [`DirectoryLoader`]: searches a list of directories, first match wins
//! - [`MemoryLoader`]: templates held in memory, mostly for tests and embedding
//! - [`BuiltinLoader`]: the default `content.opf` and `text_item.xhtml` templates
//! - [`LayeredLoader`]: tries several loaders in order
//!
//! # Name Validation
//!
//! [`DirectoryLoader`] only accepts relative names that stay inside the search
//! root: absolute paths and `..` components escaping the root are rejected with
//! [`TemplateError::InvalidName`] before any file system access happens.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use strsim::levenshtein;
use walkdir::WalkDir;

use super::error::TemplateError;
use super::template::Template;
use crate::constants::{MAX_SUGGESTIONS, PUBLICATION_TEMPLATE, TEXT_ITEM_TEMPLATE};

const BUILTIN_PUBLICATION: &str = include_str!("../../templates/content.opf");
const BUILTIN_TEXT_ITEM: &str = include_str!("../../templates/text_item.xhtml");

/// Resolves template names to parsed templates.
pub trait TemplateLoader: Send + Sync {
    /// Load and parse the template called `name`.
    ///
    /// # Errors
    ///
    /// Returns a not-found class error ([`TemplateError::is_not_found`]) when
    /// `name` does not resolve to a readable template, and
    /// [`TemplateError::SyntaxError`] when it resolves but does not parse.
    fn load(&self, name: &str) -> Result<Template, TemplateError>;

    /// Names this loader can resolve, used for "did you mean" suggestions.
    fn available(&self) -> Vec<String> {
        Vec::new()
    }

    /// Build the not-found error for `name`, with suggestions from [`available`](Self::available).
    fn not_found(&self, name: &str, searched: Vec<PathBuf>) -> TemplateError {
        TemplateError::NotFound {
            name: name.to_string(),
            searched,
            suggestions: suggest_names(name, &self.available()),
        }
    }
}

/// Loads templates from a search path of directories.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    roots: Vec<PathBuf>,
}

impl DirectoryLoader {
    /// Create a loader searching a single directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
        }
    }

    /// Create a loader searching `roots` in order.
    pub fn with_roots<I>(roots: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }
}

impl TemplateLoader for DirectoryLoader {
    fn load(&self, name: &str) -> Result<Template, TemplateError> {
        validate_template_name(name)?;

        for root in &self.roots {
            let path = root.join(name);
            if !path.is_file() {
                continue;
            }

            tracing::debug!("Loading template '{}' from {}", name, path.display());
            let source =
                std::fs::read_to_string(&path).map_err(|source| TemplateError::Unreadable {
                    name: name.to_string(),
                    path: path.clone(),
                    source,
                })?;
            return Template::parse(name, &source);
        }

        Err(self.not_found(name, self.roots.clone()))
    }

    fn available(&self) -> Vec<String> {
        let mut names = Vec::new();
        for root in &self.roots {
            for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
                if !entry.file_type().is_file() {
                    continue;
                }
                if let Ok(relative) = entry.path().strip_prefix(root) {
                    // Template names always use forward slashes.
                    let name = relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    names.push(name);
                }
            }
        }
        names.sort();
        names.dedup();
        names
    }
}

/// Loads templates from an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    templates: BTreeMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template, builder style.
    #[must_use]
    pub fn with_template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    /// Add or replace a template.
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(name.into(), source.into());
    }
}

impl TemplateLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<Template, TemplateError> {
        match self.templates.get(name) {
            Some(source) => Template::parse(name, source),
            None => Err(self.not_found(name, Vec::new())),
        }
    }

    fn available(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }
}

/// The templates shipped with librepub.
///
/// - `content.opf`: OPF 2.0 package document listing every item in the
///   manifest and every text item in the spine
/// - `text_item.xhtml`: XHTML document embedding an item's inline content
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLoader;

impl BuiltinLoader {
    fn source(name: &str) -> Option<&'static str> {
        match name {
            PUBLICATION_TEMPLATE => Some(BUILTIN_PUBLICATION),
            TEXT_ITEM_TEMPLATE => Some(BUILTIN_TEXT_ITEM),
            _ => None,
        }
    }
}

impl TemplateLoader for BuiltinLoader {
    fn load(&self, name: &str) -> Result<Template, TemplateError> {
        match Self::source(name) {
            Some(source) => Template::parse(name, source),
            None => Err(self.not_found(name, Vec::new())),
        }
    }

    fn available(&self) -> Vec<String> {
        vec![PUBLICATION_TEMPLATE.to_string(), TEXT_ITEM_TEMPLATE.to_string()]
    }
}

/// Tries each loader in turn until one resolves the name.
///
/// [`TemplateError::NotFound`] moves on to the next loader; any other error
/// (a rejected name, a syntax error, an unreadable file) is returned immediately.
#[derive(Default)]
pub struct LayeredLoader {
    layers: Vec<Box<dyn TemplateLoader>>,
}

impl LayeredLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer, builder style. Earlier layers take precedence.
    #[must_use]
    pub fn with_layer(mut self, loader: impl TemplateLoader + 'static) -> Self {
        self.layers.push(Box::new(loader));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl TemplateLoader for LayeredLoader {
    fn load(&self, name: &str) -> Result<Template, TemplateError> {
        let mut searched = Vec::new();

        for layer in &self.layers {
            match layer.load(name) {
                Ok(template) => return Ok(template),
                Err(TemplateError::NotFound {
                    searched: layer_searched,
                    ..
                }) => searched.extend(layer_searched),
                Err(e) => return Err(e),
            }
        }

        Err(self.not_found(name, searched))
    }

    fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = self.layers.iter().flat_map(|l| l.available()).collect();
        names.sort();
        names.dedup();
        names
    }
}

/// Validates a template name before it is joined onto a search root.
///
/// # Errors
///
/// Returns [`TemplateError::InvalidName`] if the name is empty, absolute, or
/// climbs above the search root with `..`.
pub fn validate_template_name(name: &str) -> Result<(), TemplateError> {
    let invalid = |reason: &str| TemplateError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("template name is empty"));
    }

    let path = Path::new(name);
    if path.is_absolute() {
        return Err(invalid(
            "absolute paths are not allowed, names are relative to the template directory",
        ));
    }

    let mut depth: i32 = 0;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return Err(invalid(
                        "path traversal outside the template directory is not allowed",
                    ));
                }
            }
            Component::CurDir => {}
            _ => return Err(invalid("only relative paths are allowed")),
        }
    }

    Ok(())
}

/// Closest names to `name`, best first.
fn suggest_names(name: &str, available: &[String]) -> Vec<String> {
    let max_distance = (name.len() / 2).max(1);
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (levenshtein(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort();
    scored.into_iter().take(MAX_SUGGESTIONS).map(|(_, candidate)| candidate.clone()).collect()
}
