//! Integration test suite for raml2html
//!
//! End-to-end tests for the `raml2html` binary and the public render API.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: flags, input forms, output destinations
//! - **error_scenarios**: exit codes and messages for each failure kind
//! - **rendering**: default templates, custom templates, post-processing

mod cli;
mod error_scenarios;
mod rendering;
