//! Error handling for librepub
//!
//! Library operations return [`LibrepubError`] (or the narrower
//! [`TemplateError`] / [`FileOperationError`] they wrap). The CLI works with
//! [`anyhow::Error`] and turns whatever reaches `main` into an [`ErrorContext`]
//! through [`user_friendly_error`], which adds details and a suggestion and
//! prints them with terminal colors.
//!
//! # Error Classes
//!
//! - template not found: [`TemplateError::is_not_found`] is true
//! - template render failures: the other [`TemplateError`] variants
//! - IO failures: [`FileOperationError`]
//!
//! Nothing is retried or recovered; every failure propagates to the caller.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use super::file_error::FileOperationError;
use crate::templating::TemplateError;

/// The main error type for librepub operations
#[derive(Error, Debug)]
pub enum LibrepubError {
    /// Template resolution or rendering failed
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Reading or writing a file failed
    #[error(transparent)]
    File(#[from] FileOperationError),

    /// A required publication field is empty
    ///
    /// Publications need a non-empty `title`, `language` and `identifier`.
    #[error("Invalid publication: required field '{field}' is empty")]
    InvalidPublication {
        /// Name of the offending field
        field: String,
    },

    /// A publication manifest could not be parsed
    #[error("Invalid manifest file syntax in {file}")]
    ManifestParse {
        /// Path to the manifest
        file: String,
        /// Parser message
        reason: String,
    },

    /// A manifest entry is structurally wrong (e.g. both `content` and `content_file`)
    #[error("Invalid manifest entry '{name}': {reason}")]
    InvalidManifestEntry {
        /// Item id or field name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// An output path would land outside the output directory or collide with another output
    #[error("Unsafe output path '{path}': {reason}")]
    UnsafePath {
        /// The offending path
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },
}

impl LibrepubError {
    /// Whether this is a template-not-found failure.
    pub fn is_template_not_found(&self) -> bool {
        matches!(self, LibrepubError::Template(e) if e.is_not_found())
    }
}

/// Error wrapper carrying details and a suggestion for the user
#[derive(Debug)]
pub struct ErrorContext {
    /// The error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for terminal display.
///
/// The error chain is searched for librepub error types; the first one found
/// decides the details and suggestion. Unknown errors keep their full chain.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let headline = error.to_string();

    for cause in error.chain() {
        if let Some(template_error) = cause.downcast_ref::<TemplateError>() {
            return template_error_context(&headline, template_error);
        }

        if let Some(file_error) = cause.downcast_ref::<FileOperationError>() {
            return ErrorContext::new(headline)
                .with_details(file_error.user_message())
                .with_suggestion("Check that the path exists and is writable");
        }

        if let Some(librepub_error) = cause.downcast_ref::<LibrepubError>() {
            match librepub_error {
                LibrepubError::Template(template_error) => {
                    return template_error_context(&headline, template_error);
                }
                LibrepubError::File(file_error) => {
                    return ErrorContext::new(headline)
                        .with_details(file_error.user_message())
                        .with_suggestion("Check that the path exists and is writable");
                }
                LibrepubError::InvalidPublication {
                    ..
                } => {
                    return ErrorContext::new(headline).with_suggestion(
                        "Set non-empty 'title', 'language' and 'identifier' in the manifest",
                    );
                }
                LibrepubError::ManifestParse {
                    reason,
                    ..
                } => {
                    return ErrorContext::new(headline).with_details(reason.clone()).with_suggestion(
                        "Check the TOML syntax of the manifest. Verify quotes, brackets, and [[items]] tables",
                    );
                }
                LibrepubError::InvalidManifestEntry {
                    ..
                } => {
                    return ErrorContext::new(headline).with_suggestion(
                        "Give each item either inline 'content' or a 'content_file', not both",
                    );
                }
                LibrepubError::UnsafePath {
                    ..
                } => {
                    return ErrorContext::new(headline).with_suggestion(
                        "Item file names must be unique relative paths inside the output directory",
                    );
                }
                LibrepubError::Config {
                    ..
                } => {
                    return ErrorContext::new(headline)
                        .with_suggestion("Check librepub.toml and the LIBREPUB_* environment variables");
                }
            }
        }

        if let Some(toml_error) = cause.downcast_ref::<toml::de::Error>() {
            return ErrorContext::new(headline).with_details(toml_error.to_string());
        }
    }

    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let context = ErrorContext::new(headline);
    if chain.is_empty() {
        context
    } else {
        context.with_details(chain.join("\n  caused by: "))
    }
}

fn template_error_context(headline: &str, error: &TemplateError) -> ErrorContext {
    let context = ErrorContext::new(headline).with_details(error.format_with_context());

    if error.is_not_found() {
        context.with_suggestion(
            "Check the template name and the configured template directories (--templates, LIBREPUB_TEMPLATE_DIR)",
        )
    } else {
        context.with_suggestion(
            "Check the template syntax and that every variable it uses exists in the context (see `librepub context`)",
        )
    }
}
