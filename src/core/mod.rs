//! Core error types for raml2html.
//!
//! - [`RenderError`] - one variant per failing pipeline stage
//! - [`ErrorContext`] / [`user_friendly_error`] - CLI-facing error reporting

pub mod error;

pub use error::{ErrorContext, RenderError, user_friendly_error};
