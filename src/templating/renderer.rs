//! Template rendering engine with Tera.
//!
//! This module provides the [`TemplateRenderer`] that binds a configured set
//! of helpers and partials to a Tera instance and renders one document
//! tree through the main template.
//!
//! A fresh Tera instance is created for every render. Helpers and partials
//! are registered on that instance only, so two renders running at the same
//! time never observe each other's registrations.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};

use super::error::{ErrorLocation, TemplateError};
use super::helpers::HelperSet;
use crate::constants::MAIN_TEMPLATE_NAME;
use crate::tree::Tree;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
/// This represents a 50% similarity threshold for variable name suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Number of lines shown before and after a reported error line.
const CONTEXT_LINES: usize = 5;

static VARIABLE_NOT_FOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Variable `([^`]+)` not found").expect("valid pattern"));
// Tera wraps the names of a missing include in brackets: `Template '[item]' not found`
static TEMPLATE_NOT_FOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Template '\[?([^'\]]+)\]?' not found").expect("valid pattern"));
static TEMPLATE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Failed to parse|while rendering|Failed to render) '([^']+)'")
        .expect("valid pattern")
});
static LINE_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+):(\d+)").expect("valid pattern"));

/// Template source together with a label describing where it came from.
#[derive(Clone, PartialEq, Eq)]
pub struct Template {
    /// Where the template came from (file path or "built-in")
    pub origin: String,
    /// Raw Tera template text
    pub source: String,
}

impl Template {
    pub fn new(origin: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            source: source.into(),
        }
    }

    /// A template given inline rather than loaded from a file.
    pub fn inline(source: impl Into<String>) -> Self {
        Self::new("inline", source)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("origin", &self.origin)
            .field("bytes", &self.source.len())
            .finish()
    }
}

/// Named partial templates, reachable through `{% include "<name>" %}`.
pub type PartialSet = IndexMap<String, Template>;

/// Renders document trees with a scoped set of helpers and partials.
pub struct TemplateRenderer<'a> {
    helpers: &'a HelperSet,
    partials: &'a PartialSet,
}

impl<'a> TemplateRenderer<'a> {
    #[must_use]
    pub const fn new(helpers: &'a HelperSet, partials: &'a PartialSet) -> Self {
        Self {
            helpers,
            partials,
        }
    }

    /// Render `data` through `template`.
    ///
    /// The tree must be a mapping: its top-level keys become the template's
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The main template or a partial has invalid syntax
    /// - The template references a field the tree does not have
    /// - The template includes a partial that is not registered
    /// - A helper fails on its input
    pub fn render(&self, template: &Template, data: &Tree) -> Result<String, TemplateError> {
        let tera = self.build_engine(template)?;

        let context = TeraContext::from_serialize(data).map_err(|e| TemplateError::SyntaxError {
            message: format!("document root cannot be used as template context: {}", e),
            location: Box::new(ErrorLocation {
                template_name: MAIN_TEMPLATE_NAME.to_string(),
                ..ErrorLocation::default()
            }),
        })?;

        tracing::debug!(
            "Rendering {} with {} helper(s) and {} partial(s)",
            template.origin,
            self.helpers.len(),
            self.partials.len()
        );

        let rendered = tera
            .render(MAIN_TEMPLATE_NAME, &context)
            .map_err(|e| self.parse_tera_error(&e, template, data))?;

        tracing::debug!("Template rendering complete ({} bytes)", rendered.len());
        Ok(rendered)
    }

    fn build_engine(&self, template: &Template) -> Result<Tera, TemplateError> {
        let mut tera = Tera::default();

        for (name, helper) in self.helpers {
            tracing::debug!("Registering helper {} ({:?})", name, helper);
            helper.register(name, &mut tera);
        }

        let sources = self
            .partials
            .iter()
            .map(|(name, partial)| (name.as_str(), partial.source.as_str()))
            .chain(std::iter::once((MAIN_TEMPLATE_NAME, template.source.as_str())));

        tera.add_raw_templates(sources).map_err(|e| self.parse_tera_error(&e, template, &Tree::null()))?;
        Ok(tera)
    }

    /// Parse a Tera error into a structured [`TemplateError`]
    fn parse_tera_error(&self, error: &tera::Error, main: &Template, data: &Tree) -> TemplateError {
        let messages = error_chain(error);
        let joined = messages.join("\n");

        let template_name = messages
            .iter()
            .rev()
            .find_map(|msg| TEMPLATE_NAME.captures(msg).and_then(|c| c.get(1)))
            .map_or_else(|| MAIN_TEMPLATE_NAME.to_string(), |m| m.as_str().to_string());

        let source = if template_name == MAIN_TEMPLATE_NAME {
            Some(main.source.as_str())
        } else {
            self.partials.get(&template_name).map(|p| p.source.as_str())
        };
        let line_number = extract_line_number(error);
        let context_lines = match (line_number, source) {
            (Some(line), Some(text)) => {
                Some(extract_context_lines(text, line, CONTEXT_LINES)).filter(|l| !l.is_empty())
            }
            _ => None,
        };
        let location = Box::new(ErrorLocation {
            template_name,
            line_number,
            context_lines,
        });

        if let Some(name) = TEMPLATE_NOT_FOUND.captures(&joined).and_then(|c| c.get(1)) {
            return TemplateError::MissingTemplate {
                name: name.as_str().to_string(),
                location,
            };
        }

        if let Some(variable) = VARIABLE_NOT_FOUND.captures(&joined).and_then(|c| c.get(1)) {
            let variable = variable.as_str().to_string();
            let available_variables = available_variables(data);
            let suggestions = find_similar_variables(&variable, &available_variables);
            return TemplateError::VariableNotFound {
                variable,
                available_variables: Box::new(available_variables),
                suggestions: Box::new(suggestions),
                location,
            };
        }

        TemplateError::SyntaxError {
            message: format_tera_error(&messages),
            location,
        }
    }
}

/// Every message in a Tera error's source chain, outermost first.
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

/// Top-level keys of the rendered tree, sorted.
fn available_variables(data: &Tree) -> Vec<String> {
    let mut vars: Vec<String> = data
        .as_mapping()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    vars.sort();
    vars
}

/// Find similar variable names using Levenshtein distance
fn find_similar_variables(target: &str, available: &[String]) -> Vec<String> {
    // Compare against the leading path segment as well as the full name
    let head = target.split('.').next().unwrap_or(target);

    let mut scored: Vec<_> = available
        .iter()
        .map(|var| (var.clone(), levenshtein(head, var).min(levenshtein(target, var))))
        .collect();

    scored.sort_by_key(|(_, dist)| *dist);

    let mut seen = HashSet::new();
    scored
        .into_iter()
        .filter(|(var, dist)| {
            *dist > 0 && *dist <= head.len() * SIMILARITY_THRESHOLD_PERCENT / 100 && seen.insert(var.clone())
        })
        .take(3)
        .map(|(var, _)| var)
        .collect()
}

/// Extract context lines around an error location
///
/// Returns up to `context_size` lines before and after the error line,
/// along with their line numbers (1-indexed).
fn extract_context_lines(
    content: &str,
    error_line: usize,
    context_size: usize,
) -> Vec<(usize, String)> {
    let lines: Vec<&str> = content.lines().collect();
    let total_lines = lines.len();

    // Tera uses 1-indexed line numbers
    if error_line == 0 || error_line > total_lines {
        return Vec::new();
    }

    let start = error_line.saturating_sub(context_size + 1);
    let end = (error_line + context_size).min(total_lines);

    lines[start..end]
        .iter()
        .enumerate()
        .map(|(idx, line)| (start + idx + 1, (*line).to_string()))
        .collect()
}

/// Extract line number from Tera error message
///
/// Tera includes line:column information in parse error messages.
/// Examples: "1:7", "15:23", "864:1"
fn extract_line_number(error: &tera::Error) -> Option<usize> {
    let error_msg = format!("{:?}", error);
    LINE_COLUMN
        .captures(&error_msg)
        .and_then(|caps| caps.get(1))
        .and_then(|line| line.as_str().parse::<usize>().ok())
}

/// Join the useful parts of a Tera error chain into one message.
///
/// Wrapper messages that only repeat "Failed to render/parse" are dropped
/// unless nothing else is left.
fn format_tera_error(messages: &[String]) -> String {
    let useful: Vec<&str> = messages
        .iter()
        .map(|msg| msg.trim())
        .filter(|msg| {
            !msg.is_empty() && !msg.starts_with("Failed to render") && !msg.starts_with("Failed to parse")
        })
        .collect();

    if useful.is_empty() {
        messages.first().cloned().unwrap_or_else(|| "Template error".to_string())
    } else {
        useful.join("\n  → ")
    }
}
