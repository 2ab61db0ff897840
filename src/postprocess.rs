//! Post-processing of rendered output.
//!
//! A [`PostProcessor`] receives the complete template output and either
//! returns the transformed text or rejects it. The pipeline reports a
//! rejection as [`RenderError::PostProcessError`](crate::core::RenderError).
//!
//! The default step is [`HtmlMinifier`]: it unescapes `&quot;` entities and
//! minifies the markup with minify-html.

use anyhow::{Context, Result};
use minify_html::{Cfg, minify};

/// A final transformation applied to the rendered output.
pub trait PostProcessor: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str {
        "post-processor"
    }

    /// Transform `output`, or reject it with an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the output cannot be processed.
    fn process(&self, output: String) -> Result<String>;
}

impl<F> PostProcessor for F
where
    F: Fn(String) -> Result<String> + Send + Sync,
{
    fn process(&self, output: String) -> Result<String> {
        self(output)
    }
}

/// Unescapes `&quot;` and minifies the resulting HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMinifier;

impl HtmlMinifier {
    fn cfg() -> Cfg {
        Cfg {
            keep_closing_tags: true,
            keep_html_and_head_opening_tags: true,
            minify_css: true,
            ..Cfg::default()
        }
    }
}

impl PostProcessor for HtmlMinifier {
    fn name(&self) -> &str {
        "html-minifier"
    }

    fn process(&self, output: String) -> Result<String> {
        let unescaped = output.replace("&quot;", "\"");
        let minified = minify(unescaped.as_bytes(), &Self::cfg());
        String::from_utf8(minified).context("minified output is not valid UTF-8")
    }
}
