//! The render pipeline: source document in, rendered text out.
//!
//! One call to [`RenderPipeline::render`] runs these stages in order:
//!
//! 1. Resolve the configuration values templates can see (protocol, version)
//! 2. Bind the configured helpers and partials to a renderer for this call
//! 3. Read and parse the source; a parse failure ends the call
//! 4. Normalize the tree and attach the resolved configuration as `config`
//! 5. Render the main template
//! 6. Run the post-processor, if one is enabled
//!
//! Every call returns exactly one `Ok` or `Err`. Nothing is retried, and a
//! failing stage discards all work done by earlier stages.
//!
//! Helpers and partials are scoped to the call that uses them, so renders
//! running concurrently with different configurations do not interfere.

use crate::config::Configuration;
use crate::constants::{CONFIG_KEY, RAML2HTML_VERSION};
use crate::core::RenderError;
use crate::normalize::normalize;
use crate::parser::{DocumentParser, DocumentSource, RamlParser};
use crate::templating::TemplateRenderer;
use crate::tree::{Mapping, Tree};

/// Drives a document through parsing, normalization, rendering and post-processing.
#[derive(Debug, Clone, Default)]
pub struct RenderPipeline<P = RamlParser> {
    parser: P,
}

impl<P: DocumentParser> RenderPipeline<P> {
    pub const fn new(parser: P) -> Self {
        Self {
            parser,
        }
    }

    /// Render `source` with `config`.
    ///
    /// # Errors
    ///
    /// - [`RenderError::ParseError`] if the source cannot be read or parsed
    /// - [`RenderError::TemplateError`] if the template fails on the document
    /// - [`RenderError::PostProcessError`] if the post-processor rejects the output
    pub async fn render(
        &self,
        source: &DocumentSource,
        config: &Configuration,
    ) -> Result<String, RenderError> {
        let source_name = source.name();
        let resolved = resolved_config(config);
        tracing::debug!("Rendering {} with protocol {}", source_name, config.protocol());

        let renderer = TemplateRenderer::new(&config.helpers, &config.partials);

        let text = source.read().await?;
        let tree = self.parser.parse(&text, &source_name)?;

        let mut tree = normalize(tree);
        let root = tree.as_mapping_mut().ok_or_else(|| {
            RenderError::parse(&source_name, "document root must be a mapping to carry `config`")
        })?;
        root.insert(CONFIG_KEY.to_string(), resolved);

        let output = renderer.render(&config.template, &tree)?;

        match config.active_post_processor() {
            Some(processor) => {
                tracing::debug!("Post-processing output with {}", processor.name());
                processor.process(output).map_err(|e| RenderError::PostProcessError {
                    reason: format!("{e:#}"),
                })
            }
            None => Ok(output),
        }
    }
}

/// Render `source` with the RAML parser.
///
/// # Errors
///
/// See [`RenderPipeline::render`].
pub async fn render(source: &DocumentSource, config: &Configuration) -> Result<String, RenderError> {
    RenderPipeline::<RamlParser>::default().render(source, config).await
}

/// The `config` object visible to templates.
fn resolved_config(config: &Configuration) -> Tree {
    let flags = |names: Vec<&String>| -> Tree {
        Tree::Mapping(names.into_iter().map(|name| (name.clone(), Tree::from(true))).collect())
    };

    let mut resolved = Mapping::new();
    resolved.insert("https".to_string(), config.use_https.into());
    resolved.insert("protocol".to_string(), config.protocol().into());
    resolved.insert("version".to_string(), RAML2HTML_VERSION.into());
    resolved.insert("helpers".to_string(), flags(config.helpers.keys().collect()));
    resolved.insert("partials".to_string(), flags(config.partials.keys().collect()));
    Tree::Mapping(resolved)
}
