//! Command-line interface for librepub.
//!
//! # Commands
//!
//! - `render`: render a publication manifest into a package document plus
//!   one file per item that carries content ([`render::RenderCommand`])
//! - `context`: print the rendering context of a publication as JSON
//!   ([`context::ContextCommand`])
//!
//! # Global Options
//!
//! - `--verbose` / `-v`: debug logging
//! - `--quiet` / `-q`: no logging and no summary output
//! - `--config` / `-c`: render configuration file (default `./librepub.toml`)
//!
//! ```bash
//! librepub render publication.toml --out-dir build/OEBPS
//! librepub render publication.toml -o out --templates my-templates --method xhtml
//! librepub context publication.toml
//! ```

pub mod context;
pub mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::RenderConfig;

/// Settings derived from the global flags, applied before a command runs.
///
/// Kept separate from [`Cli`] so tests can build one directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter directive. `None` disables logging entirely.
    pub log_level: Option<String>,
    /// Render configuration file given with `--config`
    pub config_path: Option<PathBuf>,
    /// Suppress the summary printed by `render`
    pub quiet: bool,
}

impl CliConfig {
    /// Install the tracing subscriber for this run.
    ///
    /// Logs go to stderr so that command output on stdout stays parseable.
    /// Installing twice is a no-op.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = if level.is_empty() {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        } else {
            EnvFilter::new(level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Render publications to EPUB package files through Tera templates.
#[derive(Parser, Debug)]
#[command(name = "librepub", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress logging and the render summary
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the render configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a publication manifest into an output directory
    Render(render::RenderCommand),

    /// Print the rendering context of a publication as JSON
    Context(context::ContextCommand),
}

impl Cli {
    /// Execute the parsed command line.
    ///
    /// # Errors
    ///
    /// Returns whatever the selected command fails with.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// `--verbose` selects `debug`, `--quiet` disables logging, and the default
    /// is an empty directive, meaning `RUST_LOG` or else `info`.
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some(String::new())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            quiet: self.quiet,
        }
    }

    /// Execute with an explicit [`CliConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the render configuration cannot be loaded or the
    /// command fails.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Render(cmd) => {
                let render_config = RenderConfig::load_with_optional(config.config_path.as_deref())?;
                cmd.execute(render_config, config.quiet)
            }
            Commands::Context(cmd) => cmd.execute(),
        }
    }
}
