//! Template error handling for librepub
//!
//! This module provides structured error types for template loading and
//! rendering with detailed context information and user-friendly formatting.
//!
//! Errors fall into two classes:
//! - **not found** ([`TemplateError::NotFound`], [`TemplateError::InvalidName`],
//!   [`TemplateError::Unreadable`]): the template could not be resolved
//! - **render** ([`TemplateError::SyntaxError`], [`TemplateError::VariableNotFound`],
//!   [`TemplateError::RenderFailed`]): the template resolved but could not produce output

use std::path::PathBuf;

/// Template errors with detailed context
#[derive(Debug)]
pub enum TemplateError {
    NotFound {
        name: String,
        searched: Vec<PathBuf>,
        suggestions: Vec<String>,
    },

    InvalidName {
        name: String,
        reason: String,
    },

    Unreadable {
        name: String,
        path: PathBuf,
        source: std::io::Error,
    },

    SyntaxError {
        message: String,
        location: Box<ErrorLocation>,
    },

    VariableNotFound {
        variable: String,
        available_variables: Box<Vec<String>>,
        suggestions: Box<Vec<String>>,
        location: Box<ErrorLocation>,
    },

    RenderFailed {
        message: String,
        location: Box<ErrorLocation>,
    },
}

/// Location information for template errors
#[derive(Debug, Clone, Default)]
pub struct ErrorLocation {
    /// Template where the error occurred
    pub template_name: String,
    /// Line number if available from Tera
    pub line_number: Option<usize>,
    /// Lines surrounding the error, 1-indexed
    pub context_lines: Option<Vec<(usize, String)>>,
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::NotFound {
                name,
                ..
            } => {
                write!(f, "Template not found: '{}'", name)
            }
            TemplateError::InvalidName {
                name,
                reason,
            } => {
                write!(f, "Invalid template name '{}': {}", name, reason)
            }
            TemplateError::Unreadable {
                name,
                path,
                ..
            } => {
                write!(f, "Template '{}' could not be read from {}", name, path.display())
            }
            TemplateError::SyntaxError {
                message,
                ..
            } => {
                write!(f, "Template syntax error: {}", message)
            }
            TemplateError::VariableNotFound {
                variable,
                location,
                ..
            } => {
                write!(
                    f,
                    "Template variable not found: '{}' in template '{}'",
                    variable, location.template_name
                )
            }
            TemplateError::RenderFailed {
                message,
                ..
            } => {
                write!(f, "Template rendering failed: {}", message)
            }
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::Unreadable {
                source,
                ..
            } => Some(source),
            _ => None,
        }
    }
}

impl TemplateError {
    /// Whether the template could not be resolved at all (as opposed to failing to render).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TemplateError::NotFound { .. }
                | TemplateError::InvalidName { .. }
                | TemplateError::Unreadable { .. }
        )
    }

    /// Generate user-friendly error message with context and suggestions
    pub fn format_with_context(&self) -> String {
        match self {
            TemplateError::NotFound {
                name,
                searched,
                suggestions,
            } => format_not_found_error(name, searched, suggestions),
            TemplateError::VariableNotFound {
                variable,
                available_variables,
                suggestions,
                location,
            } => format_variable_not_found_error(
                variable,
                available_variables,
                suggestions,
                location,
            ),
            TemplateError::SyntaxError {
                message,
                location,
            } => format_located_error("Template Syntax Error", message, location),
            TemplateError::RenderFailed {
                message,
                location,
            } => format_located_error("Template Rendering Failed", message, location),
            TemplateError::InvalidName {
                ..
            }
            | TemplateError::Unreadable {
                ..
            } => format!("ERROR: {}\n", self),
        }
    }
}

fn format_not_found_error(name: &str, searched: &[PathBuf], suggestions: &[String]) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Not Found\n\n");
    msg.push_str(&format!("Template: {}\n", name));

    if !searched.is_empty() {
        msg.push_str("\nSearched:\n");
        for path in searched {
            msg.push_str(&format!("  - {}\n", path.display()));
        }
    }

    if !suggestions.is_empty() {
        msg.push_str("\nDid you mean:\n");
        for suggestion in suggestions {
            msg.push_str(&format!("  - {}\n", suggestion));
        }
    }

    msg
}

fn format_variable_not_found_error(
    variable: &str,
    available_variables: &[String],
    suggestions: &[String],
    location: &ErrorLocation,
) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Variable Not Found\n\n");
    msg.push_str(&format!("Variable: {}\n", variable));
    msg.push_str(&format!("Template: {}\n", location.template_name));

    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {}\n", line));
    }

    if !suggestions.is_empty() {
        msg.push_str("\nDid you mean:\n");
        for suggestion in suggestions {
            msg.push_str(&format!("  - {}\n", suggestion));
        }
    }

    if !available_variables.is_empty() {
        msg.push_str("\nAvailable variables:\n");
        for var in available_variables {
            msg.push_str(&format!("  - {}\n", var));
        }
    }

    msg
}

fn format_located_error(header: &str, message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str(&format!("ERROR: {}\n\n", header));
    msg.push_str(&format!("Template: {}\n", location.template_name));

    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {}\n", line));
    }

    msg.push_str(&format!("\n{}\n", message));

    if let Some(lines) = &location.context_lines {
        msg.push('\n');
        for (number, line) in lines {
            let marker = if Some(*number) == location.line_number {
                ">"
            } else {
                " "
            };
            msg.push_str(&format!("{} {:>4} | {}\n", marker, number, line));
        }
    }

    msg
}
