//! Parsed template handles.
//!
//! A [`Template`] is what a [`TemplateLoader`](super::TemplateLoader) hands
//! back: the template source already parsed by Tera, ready to be rendered
//! against a context with a given [`SerializationMethod`].

use regex::Regex;
use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};

use super::error::{ErrorLocation, TemplateError};
use super::method::SerializationMethod;
use crate::constants::MAX_SUGGESTIONS;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Number of lines shown on each side of an error line.
const ERROR_CONTEXT_LINES: usize = 3;

/// A parsed template, ready to render.
pub struct Template {
    name: String,
    source: String,
    tera: Tera,
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Template {
    /// Parse `source` as a template called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::SyntaxError`] when Tera rejects the source.
    pub fn parse(name: &str, source: &str) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_template(name, source).map_err(|e| {
            let line_number = extract_line_from_tera_error(&e);
            TemplateError::SyntaxError {
                message: format_tera_error(&e),
                location: Box::new(build_error_location(name, source, line_number)),
            }
        })?;

        tracing::debug!("Parsed template '{}' ({} bytes)", name, source.len());

        Ok(Self {
            name: name.to_string(),
            source: source.to_string(),
            tera,
        })
    }

    /// Name the template was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw template source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render the template against `context` using `method`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::VariableNotFound`] when the template refers to a
    /// variable missing from `context`, and [`TemplateError::RenderFailed`] for
    /// every other engine failure.
    pub fn render(
        &mut self,
        method: SerializationMethod,
        context: &TeraContext,
    ) -> Result<String, TemplateError> {
        // An empty suffix matches every template name.
        let suffixes = if method.escapes() {
            vec![""]
        } else {
            vec![]
        };
        self.tera.autoescape_on(suffixes);
        self.tera.set_escape_fn(escape_xml);

        self.tera
            .render(&self.name, context)
            .map_err(|e| parse_tera_error(&e, &self.name, &self.source, context))
    }
}

/// Escape the five XML special characters.
///
/// Tera's default HTML escaping also rewrites `/`, which would turn media types
/// such as `image/png` into character references.
pub fn escape_xml(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(c),
        }
    }
    output
}

/// Parse a Tera render error into a structured [`TemplateError`].
fn parse_tera_error(
    error: &tera::Error,
    name: &str,
    source: &str,
    context: &TeraContext,
) -> TemplateError {
    let line_number = extract_line_from_tera_error(error);
    let location = Box::new(build_error_location(name, source, line_number));

    // The variable message sits below the "Failed to render" wrapper.
    for message in error_chain(error) {
        if let Some(variable) = extract_variable_name(&message) {
            let available_variables = extract_available_variables(context);
            let suggestions = find_similar_variables(&variable, &available_variables);
            return TemplateError::VariableNotFound {
                variable,
                available_variables: Box::new(available_variables),
                suggestions: Box::new(suggestions),
                location,
            };
        }
    }

    TemplateError::RenderFailed {
        message: format_tera_error(error),
        location,
    }
}

fn error_chain(error: &tera::Error) -> Vec<String> {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }
    messages
}

/// Extract variable name from "Variable `foo` not found" message
fn extract_variable_name(error_msg: &str) -> Option<String> {
    let re = Regex::new(r"Variable `([^`]+)` not found").ok()?;
    re.captures(error_msg).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

/// Top-level keys of the context, sorted
fn extract_available_variables(context: &TeraContext) -> Vec<String> {
    match context.clone().into_json() {
        serde_json::Value::Object(map) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

/// Find names close to `target` using Levenshtein distance.
pub(crate) fn find_similar_variables(target: &str, available: &[String]) -> Vec<String> {
    // Compare on the root segment: `titel.x` should still suggest `title`.
    let root = target.split('.').next().unwrap_or(target);

    let mut scored: Vec<_> =
        available.iter().map(|var| (var.clone(), levenshtein(root, var))).collect();
    scored.sort_by_key(|(_, dist)| *dist);

    let max_distance = (root.len() * SIMILARITY_THRESHOLD_PERCENT / 100).max(1);
    scored
        .into_iter()
        .filter(|(_, dist)| *dist <= max_distance)
        .take(MAX_SUGGESTIONS)
        .map(|(var, _)| var)
        .collect()
}

/// Extract line number from a Tera error message.
///
/// Tera parse errors carry `line:column` positions, e.g. ` --> 3:7`.
fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
    let error_msg = format!("{:?}", error);
    let re = Regex::new(r"(\d+):(\d+)").ok()?;
    re.captures(&error_msg)
        .and_then(|caps| caps.get(1))
        .and_then(|line| line.as_str().parse::<usize>().ok())
}

fn build_error_location(name: &str, source: &str, line_number: Option<usize>) -> ErrorLocation {
    let context_lines = line_number
        .map(|line| extract_context_lines(source, line, ERROR_CONTEXT_LINES))
        .filter(|lines| !lines.is_empty());

    ErrorLocation {
        template_name: name.to_string(),
        line_number,
        context_lines,
    }
}

/// Up to `context_size` lines before and after `error_line`, with 1-indexed numbers.
fn extract_context_lines(
    content: &str,
    error_line: usize,
    context_size: usize,
) -> Vec<(usize, String)> {
    let lines: Vec<&str> = content.lines().collect();
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return Vec::new();
    }

    let start = error_line.saturating_sub(context_size + 1);
    let end = (error_line + context_size).min(total_lines);

    lines[start..end]
        .iter()
        .enumerate()
        .map(|(idx, line)| (start + idx + 1, line.to_string()))
        .collect()
}

/// Flatten a Tera error chain into one readable message.
///
/// Tera wraps the root cause in "Failed to render" / "Failed to parse"
/// layers; those carry no information and are dropped.
pub fn format_tera_error(error: &tera::Error) -> String {
    let messages: Vec<String> = error_chain(error)
        .into_iter()
        .map(|msg| msg.trim().to_string())
        .filter(|msg| {
            !msg.is_empty()
                && !msg.starts_with("Failed to render ")
                && !msg.starts_with("Failed to parse ")
        })
        .collect();

    if messages.is_empty() {
        error.to_string()
    } else {
        messages.join("\n  -> ")
    }
}
