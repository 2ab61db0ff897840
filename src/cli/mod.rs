//! Command-line interface for raml2html.
//!
//! The binary renders one RAML file to HTML using the default configuration,
//! optionally with replacement templates.
//!
//! # Usage
//!
//! ```bash
//! # Render to stdout
//! raml2html api.raml
//!
//! # Render to a file with https links and minified output
//! raml2html --https --minify -i api.raml -o api.html
//!
//! # Use custom templates
//! raml2html -t ./template.tera -r ./resource.tera -m ./item.tera api.raml
//! ```
//!
//! Logs go to stderr, so stdout carries only the rendered document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

use crate::config::{BuildOptions, ConfigurationBuilder};
use crate::parser::DocumentSource;
use crate::pipeline::render;

/// Runtime settings derived from the command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter directive. `None` defers to `RUST_LOG`, falling back to `warn`.
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Render RAML API descriptions into a single HTML document.
#[derive(Parser, Debug)]
#[command(name = "raml2html", version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).multiple(true).args(["input", "file"])))]
pub struct Cli {
    /// RAML input file
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// RAML input file, ignored when `--input` is given
    #[arg(value_name = "INPUT")]
    file: Option<PathBuf>,

    /// Use https links in the generated output
    #[arg(short = 's', long)]
    https: bool,

    /// HTML output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Custom main template
    #[arg(short, long, value_name = "FILE", env = "RAML2HTML_TEMPLATE")]
    template: Option<PathBuf>,

    /// Custom `resource` partial
    #[arg(short, long, value_name = "FILE", env = "RAML2HTML_RESOURCE")]
    resource: Option<PathBuf>,

    /// Custom `item` partial
    #[arg(short = 'm', long, value_name = "FILE", env = "RAML2HTML_ITEM")]
    item: Option<PathBuf>,

    /// Unescape quotes and minify the generated HTML
    #[arg(long)]
    minify: bool,

    /// Leave out the `markdown_first_sentence` and `markdown_rest` helpers
    #[arg(long)]
    no_sentence_helpers: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// The file to render: `--input` wins over the positional argument.
    fn input_path(&self) -> Option<PathBuf> {
        self.input.clone().or_else(|| self.file.clone())
    }

    /// Render the input and write the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built, rendering fails,
    /// or the output cannot be written.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed CLI arguments.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
        }
    }

    /// Run with an explicit [`CliConfig`].
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let input = self.input_path().context("You need to specify the RAML input file")?;

        let mut builder = ConfigurationBuilder::new(self.https).options(BuildOptions {
            post_process: self.minify,
            sentence_helpers: !self.no_sentence_helpers,
        });
        if let Some(path) = self.template {
            builder = builder.template_path(path);
        }
        if let Some(path) = self.resource {
            builder = builder.resource_partial_path(path);
        }
        if let Some(path) = self.item {
            builder = builder.item_partial_path(path);
        }
        let configuration = builder.build().await?;

        let html = render(&DocumentSource::Path(input), &configuration).await?;

        match self.output {
            Some(path) => {
                tokio::fs::write(&path, &html)
                    .await
                    .with_context(|| format!("Failed to write output file: {}", path.display()))?;
                tracing::debug!("Wrote {} bytes to {}", html.len(), path.display());
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(html.as_bytes()).await.context("Failed to write to stdout")?;
                stdout.flush().await.context("Failed to write to stdout")?;
            }
        }

        Ok(())
    }
}
