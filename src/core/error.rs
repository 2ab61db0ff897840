//! Error handling for raml2html
//!
//! This module provides the error taxonomy of the render pipeline and the
//! user-friendly reporting used by the command-line entry point. Two types
//! carry the design:
//! - [`RenderError`] - one variant per pipeline stage that can fail
//! - [`ErrorContext`] - wrapper that adds details and suggestions for CLI users
//!
//! # Error Categories
//!
//! - **Parsing**: [`RenderError::ParseError`] - malformed or unreadable source
//! - **Templating**: [`RenderError::TemplateError`] - missing field or malformed template
//! - **Post-processing**: [`RenderError::PostProcessError`] - the post-processor rejected the output
//! - **Configuration**: [`RenderError::ConfigError`] - a template override could not be loaded
//!
//! Every failure is terminal for the render call that produced it. Nothing is
//! retried and no partial output is returned.
//!
//! # Examples
//!
//! ```rust,no_run
//! use raml2html::core::{RenderError, user_friendly_error};
//!
//! let error = RenderError::PostProcessError {
//!     reason: "minified output is not valid UTF-8".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::templating::TemplateError;

/// The error type returned by every render pipeline stage.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The API description could not be read or parsed
    #[error("Failed to parse API description '{source_name}': {reason}")]
    ParseError {
        /// Path or label of the source document
        source_name: String,
        /// Parser diagnostic
        reason: String,
    },

    /// The template engine rejected the template or the data
    #[error(transparent)]
    TemplateError(#[from] TemplateError),

    /// The post-processing step rejected the rendered output
    #[error("Post-processing failed: {reason}")]
    PostProcessError {
        /// Diagnostic reported by the post-processor
        reason: String,
    },

    /// A configured template or partial could not be loaded
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },
}

impl RenderError {
    /// Build a [`RenderError::ParseError`].
    pub fn parse(source_name: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::ParseError {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Error wrapper with user-facing details and a suggested fix.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: anyhow::Error,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

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
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error to a user-friendly [`ErrorContext`]
///
/// [`RenderError`] variants get stage-specific suggestions. Template errors
/// contribute their formatted location (template, line, surrounding lines)
/// as details. Anything else is reported as-is.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let render_error = match error.downcast::<RenderError>() {
        Ok(render_error) => render_error,
        Err(other) => return ErrorContext::new(other),
    };

    match render_error {
        RenderError::ParseError {
            ..
        } => ErrorContext::new(render_error)
            .with_suggestion("Check that the input file exists and is valid RAML (YAML) syntax"),
        RenderError::TemplateError(template_error) => {
            let details = template_error.format_with_context();
            let suggestion = match &template_error {
                TemplateError::VariableNotFound {
                    ..
                } => "Guard optional fields with `{% if ... %}` or the `default` filter",
                TemplateError::MissingTemplate {
                    ..
                } => "Register the partial in the configuration or fix the include name",
                TemplateError::SyntaxError {
                    ..
                } => "Fix the template syntax at the reported line",
            };
            ErrorContext::new(RenderError::TemplateError(template_error))
                .with_details(details)
                .with_suggestion(suggestion)
        }
        RenderError::PostProcessError {
            ..
        } => ErrorContext::new(render_error)
            .with_suggestion("Run without --minify to inspect the unprocessed output"),
        RenderError::ConfigError {
            ..
        } => ErrorContext::new(render_error)
            .with_suggestion("Check the --template, --resource and --item paths"),
    }
}
