//! librepub CLI entry point
//!
//! Parses the command line, runs the selected command and turns any error
//! into a colored message with details and a suggestion.
//!
//! - `render` - render a publication manifest into an output directory
//! - `context` - print a publication's rendering context as JSON

use anyhow::Result;
use clap::Parser;
use librepub::cli;
use librepub::core::error::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
