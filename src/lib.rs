//! raml2html - render RAML API descriptions as HTML
//!
//! raml2html reads a RAML document, reshapes it into a generic tree, puts the
//! HTTP methods of every resource into a canonical order, and renders the
//! result through Tera templates into a single HTML page.
//!
//! # Architecture Overview
//!
//! ```text
//! source ─▶ parser ─▶ Tree ─▶ normalize ─▶ Tree + config ─▶ templating ─▶ postprocess ─▶ HTML
//! ```
//!
//! - [`parser`] - [`DocumentSource`](parser::DocumentSource) and the RAML reader
//! - [`tree`] - the order-preserving document tree
//! - [`normalize`] - canonical method ordering (`GET, HEAD, POST, PUT, DELETE, TRACE, CONNECT`)
//! - [`templating`] - Tera binding, formatting helpers and template errors
//! - [`markdown`] - markdown conversion and sentence splitting used by the helpers
//! - [`config`] - render configuration and its builder
//! - [`postprocess`] - optional final step, HTML minification by default
//! - [`pipeline`] - the render orchestration tying the stages together
//! - [`core`] - error types and user-facing error reporting
//! - [`cli`] - the `raml2html` command
//!
//! # Example
//!
//! ```rust,no_run
//! use raml2html::config::build_default_configuration;
//! use raml2html::parser::DocumentSource;
//! use raml2html::pipeline::render;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), raml2html::core::RenderError> {
//! let config = build_default_configuration(true, None, None, None).await?;
//! let html = render(&DocumentSource::from(Path::new("api.raml")), &config).await?;
//! println!("{html}");
//! # Ok(())
//! # }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! raml2html api.raml > api.html
//! raml2html --https -i api.raml -o api.html
//! raml2html -t ./template.tera api.raml
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod markdown;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod postprocess;
pub mod templating;
pub mod tree;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
