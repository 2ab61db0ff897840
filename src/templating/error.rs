//! Structured template error handling
//!
//! This module provides the error type raised when the template engine
//! rejects a template or the data rendered through it, together with the
//! detailed, user-friendly formatting shown by the CLI.

use std::fmt::Write as _;

/// Template failures with the location they occurred at
#[derive(Debug, Clone)]
pub enum TemplateError {
    /// The template referenced a field the document does not have
    VariableNotFound {
        variable: String,
        available_variables: Box<Vec<String>>,
        suggestions: Box<Vec<String>>,
        location: Box<ErrorLocation>,
    },

    /// The template itself is malformed, or a helper failed while rendering
    SyntaxError {
        message: String,
        location: Box<ErrorLocation>,
    },

    /// The template includes a partial that was never registered
    MissingTemplate {
        name: String,
        location: Box<ErrorLocation>,
    },
}

/// Location information for template errors
#[derive(Debug, Clone, Default)]
pub struct ErrorLocation {
    /// Name of the template being rendered when the error occurred
    pub template_name: String,
    /// Line number if available from Tera
    pub line_number: Option<usize>,
    /// Lines surrounding the error (1-indexed line number, text)
    pub context_lines: Option<Vec<(usize, String)>>,
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::VariableNotFound {
                variable,
                ..
            } => {
                write!(f, "Template variable not found: '{}'", variable)
            }
            TemplateError::SyntaxError {
                message,
                ..
            } => {
                write!(f, "Template syntax error: {}", message)
            }
            TemplateError::MissingTemplate {
                name,
                ..
            } => {
                write!(f, "Template or partial not found: '{}'", name)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

impl TemplateError {
    /// Location the error was raised at
    #[must_use]
    pub fn location(&self) -> &ErrorLocation {
        match self {
            TemplateError::VariableNotFound {
                location,
                ..
            }
            | TemplateError::SyntaxError {
                location,
                ..
            }
            | TemplateError::MissingTemplate {
                location,
                ..
            } => location,
        }
    }

    /// Generate user-friendly error message with context and suggestions
    #[must_use]
    pub fn format_with_context(&self) -> String {
        match self {
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
            } => format_syntax_error(message, location),
            TemplateError::MissingTemplate {
                name,
                location,
            } => format_missing_template_error(name, location),
        }
    }
}

/// Format a detailed "variable not found" error message
fn format_variable_not_found_error(
    variable: &str,
    available_variables: &[String],
    suggestions: &[String],
    location: &ErrorLocation,
) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Variable Not Found\n\n");
    let _ = writeln!(msg, "Variable: {}", variable);
    push_location(&mut msg, location);

    if !suggestions.is_empty() {
        msg.push_str("Did you mean one of these?\n");
        for suggestion in suggestions {
            let _ = writeln!(msg, "  - {}", suggestion);
        }
        msg.push('\n');
    }

    if !available_variables.is_empty() {
        msg.push_str("Available top-level fields:\n");
        for var in available_variables.iter().take(10) {
            let _ = writeln!(msg, "  {}", var);
        }
        if available_variables.len() > 10 {
            let _ = writeln!(msg, "  ... and {} more", available_variables.len() - 10);
        }
        msg.push('\n');
    }

    msg.push_str("Optional RAML fields are often absent; guard them with {% if field %}.\n");
    msg
}

/// Format syntax error
fn format_syntax_error(message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Syntax Error\n\n");
    let _ = writeln!(msg, "Error: {}", message);
    push_location(&mut msg, location);

    msg.push_str("SUGGESTION: Check template syntax for unclosed tags or invalid expressions.\n");
    msg.push_str("Common issues:\n");
    msg.push_str("  - Unclosed {{ }} or {% %} delimiters\n");
    msg.push_str("  - Invalid filter or tester names\n");
    msg.push_str("  - Missing quotes around string values\n");

    msg
}

fn format_missing_template_error(name: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Not Found\n\n");
    let _ = writeln!(msg, "Included name: {}", name);
    push_location(&mut msg, location);
    msg.push_str("Partials are registered under their configuration key, e.g. {% include \"resource\" %}.\n");

    msg
}

fn push_location(msg: &mut String, location: &ErrorLocation) {
    let _ = writeln!(msg, "Template: {}", location.template_name);
    if let Some(line) = location.line_number {
        let _ = writeln!(msg, "Line: {}", line);
    }
    msg.push('\n');

    if let Some(lines) = &location.context_lines {
        for (number, text) in lines {
            let marker = if Some(*number) == location.line_number {
                ">"
            } else {
                " "
            };
            let _ = writeln!(msg, "{} {:>4} | {}", marker, number, text);
        }
        msg.push('\n');
    }
}
