//! Test utilities for raml2html
//!
//! This module provides utilities for writing tests: opt-in logging and
//! fixtures for RAML documents and templates.
//!
//! # Example
//!
//! ```rust,no_run
//! use raml2html::test_utils::{RamlFixture, init_test_logging};
//!
//! fn my_test() -> anyhow::Result<()> {
//!     init_test_logging(None);
//!     let dir = tempfile::TempDir::new()?;
//!     let input = RamlFixture::petstore().write_to(dir.path())?;
//!     assert!(input.exists());
//!     Ok(())
//! }
//! ```

pub mod fixtures;

pub use fixtures::{PETSTORE_RAML, RamlFixture, TemplateFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// This function initializes the tracing subscriber for tests, but only once
/// regardless of how many times it's called. It respects the `RUST_LOG` environment
/// variable if set, or uses the provided log level.
///
/// To enable logging in tests via environment variable:
/// ```bash
/// RUST_LOG=raml2html=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            // No logging if neither is provided
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
