//! `librepub render`: write a publication and its items to disk.
//!
//! The package document goes to `<out-dir>/<package-file>`. Every item with
//! inline or file-backed content is rendered through the text-item template to
//! `<out-dir>/<item.file>`; items without content (images, stylesheets) are
//! only listed in the package document.
//!
//! All output paths are checked before anything is written, so a manifest
//! with an escaping item path, or two outputs sharing a path, leaves the
//! output directory untouched.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::config::RenderConfig;
use crate::constants::DEFAULT_PACKAGE_FILE;
use crate::core::{FileOperation, FileResultExt, LibrepubError};
use crate::manifest::PublicationManifest;
use crate::model::{Item, Renderable};
use crate::templating::SerializationMethod;

/// Render a publication manifest into an output directory.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Publication manifest (TOML)
    pub(crate) manifest: PathBuf,

    /// Directory receiving the rendered files; created when missing
    #[arg(short, long, value_name = "DIR")]
    pub(crate) out_dir: PathBuf,

    /// Template directory searched before the configured ones (repeatable)
    #[arg(short, long = "templates", value_name = "DIR")]
    pub(crate) templates: Vec<PathBuf>,

    /// Serialization method, overriding configuration
    #[arg(short, long, value_enum)]
    pub(crate) method: Option<SerializationMethod>,

    /// File name of the package document inside the output directory
    #[arg(long, default_value = DEFAULT_PACKAGE_FILE)]
    pub(crate) package_file: String,
}

impl RenderCommand {
    /// Run the command against an already loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest is invalid, an output path escapes
    /// the output directory, a template fails, or a file cannot be written.
    pub fn execute(self, mut config: RenderConfig, quiet: bool) -> Result<()> {
        let manifest = PublicationManifest::load(&self.manifest)?;
        let publication = manifest
            .to_publication()
            .with_context(|| format!("Failed to build publication from {}", self.manifest.display()))?;
        publication.validate()?;

        let mut template_dirs = self.templates.clone();
        template_dirs.append(&mut config.template_dirs);
        config.template_dirs = template_dirs;
        if let Some(method) = self.method {
            config.serialization_method = method;
        }
        let renderer = config.renderer();

        let package_path = output_path(&self.out_dir, &self.package_file)?;
        let item_targets: Vec<(Arc<Item>, PathBuf)> = publication
            .items
            .iter()
            .flatten()
            .filter(|item| item.content.is_some())
            .map(|item| output_path(&self.out_dir, &item.file).map(|path| (Arc::clone(item), path)))
            .collect::<Result<_, LibrepubError>>()?;
        check_distinct_targets(&self.package_file, &package_path, &item_targets)?;

        create_dir(&self.out_dir)?;

        publication.serialize(&renderer, &package_path).with_context(|| {
            format!("Failed to render package document {}", package_path.display())
        })?;

        for (item, path) in &item_targets {
            if let Some(parent) = path.parent() {
                create_dir(parent)?;
            }
            item.serialize(&renderer, path)
                .with_context(|| format!("Failed to render item '{}' to {}", item.id, path.display()))?;
        }

        tracing::info!(
            "Rendered '{}' ({} item file(s), method {})",
            publication.title,
            item_targets.len(),
            renderer.method()
        );

        if !quiet {
            println!(
                "{} Rendered {} into {}",
                "✓".green(),
                publication.title.bold(),
                self.out_dir.display()
            );
            println!("  {} {}", "package".cyan(), package_path.display());
            for (item, path) in &item_targets {
                println!("  {} {}", item.id.cyan(), path.display());
            }
        }

        Ok(())
    }
}

/// Reject outputs that would overwrite one another.
fn check_distinct_targets(
    package_file: &str,
    package_path: &Path,
    item_targets: &[(Arc<Item>, PathBuf)],
) -> Result<(), LibrepubError> {
    let mut owners: HashMap<&Path, String> = HashMap::new();
    owners.insert(package_path, "the package document".to_string());

    for (item, path) in item_targets {
        let owner = format!("item '{}'", item.id);
        if let Some(previous) = owners.get(path.as_path()) {
            return Err(LibrepubError::UnsafePath {
                path: if path.as_path() == package_path {
                    package_file.to_string()
                } else {
                    item.file.clone()
                },
                reason: format!("written by both {previous} and {owner}"),
            });
        }
        owners.insert(path, owner);
    }
    Ok(())
}

fn create_dir(dir: &Path) -> Result<(), LibrepubError> {
    std::fs::create_dir_all(dir).with_file_context(
        FileOperation::CreateDir,
        dir,
        "creating output directory",
        "cli::render",
    )?;
    Ok(())
}

/// Join `name` onto `out_dir`, rejecting names that would leave it.
///
/// `.` components are dropped so equivalent names map to the same path.
///
/// # Errors
///
/// Returns [`LibrepubError::UnsafePath`] for empty or absolute names and for
/// names containing `..`.
pub fn output_path(out_dir: &Path, name: &str) -> Result<PathBuf, LibrepubError> {
    let unsafe_path = |reason: &str| LibrepubError::UnsafePath {
        path: name.to_string(),
        reason: reason.to_string(),
    };

    let relative = Path::new(name);
    if name.trim().is_empty() {
        return Err(unsafe_path("path is empty"));
    }
    if relative.has_root() || relative.is_absolute() {
        return Err(unsafe_path("absolute paths are not allowed"));
    }

    let mut normalized = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(unsafe_path("parent directory references are not allowed"));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(unsafe_path("absolute paths are not allowed"));
            }
        }
    }
    if normalized.as_os_str().is_empty() {
        return Err(unsafe_path("path names no file"));
    }

    Ok(out_dir.join(normalized))
}
