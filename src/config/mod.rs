//! Render configuration and its builder.
//!
//! A [`Configuration`] holds everything one render call needs besides the
//! source document: the protocol flag, the main template, the helper and
//! partial sets, and the optional post-processing step. It is assembled once
//! per render with [`ConfigurationBuilder`], adjusted through the `with_*`
//! overrides, and never mutated while a render is running.
//!
//! # Defaults
//!
//! The builder produces:
//! - the built-in Bootstrap `template`, `resource` and `item` templates, each
//!   replaceable by a file
//! - the default helper set (see [`default_helpers`])
//! - an [`HtmlMinifier`] post-processor that only runs when enabled
//!
//! Two defaults are switches in [`BuildOptions`]:
//! whether post-processing runs (off unless asked for) and whether the
//! sentence-splitting helpers are registered (on).
//!
//! # Examples
//!
//! ```rust,no_run
//! use raml2html::config::{BuildOptions, ConfigurationBuilder};
//!
//! # async fn example() -> Result<(), raml2html::core::RenderError> {
//! let config = ConfigurationBuilder::new(true)
//!     .template_path("./templates/custom.tera")
//!     .options(BuildOptions {
//!         post_process: true,
//!         ..BuildOptions::default()
//!     })
//!     .build()
//!     .await?;
//! assert_eq!(config.protocol(), "https:");
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{HTTP_PROTOCOL, HTTPS_PROTOCOL, ITEM_PARTIAL, RESOURCE_PARTIAL};
use crate::core::RenderError;
use crate::postprocess::{HtmlMinifier, PostProcessor};
pub use crate::templating::{Helper, HelperSet, PartialSet, Template, default_helpers};

const DEFAULT_TEMPLATE: &str = include_str!("../../templates/template.tera");
const DEFAULT_RESOURCE: &str = include_str!("../../templates/resource.tera");
const DEFAULT_ITEM: &str = include_str!("../../templates/item.tera");

/// Origin label of the embedded templates.
pub const BUILT_IN_ORIGIN: &str = "built-in";

/// Everything a render call needs besides the source document.
#[derive(Clone)]
pub struct Configuration {
    /// Emit `https:` links instead of `http:`
    pub use_https: bool,
    /// Main template
    pub template: Template,
    /// Helpers registered for this render, by name
    pub helpers: HelperSet,
    /// Partials registered for this render, by name
    pub partials: PartialSet,
    /// Post-processing step, if one is configured
    pub post_process: Option<Arc<dyn PostProcessor>>,
    /// Whether `post_process` runs
    pub post_process_enabled: bool,
}

impl Configuration {
    /// Configuration with the given template and nothing else.
    #[must_use]
    pub fn new(template: Template) -> Self {
        Self {
            use_https: false,
            template,
            helpers: HelperSet::new(),
            partials: PartialSet::new(),
            post_process: None,
            post_process_enabled: false,
        }
    }

    /// `"https:"` or `"http:"` depending on [`Self::use_https`].
    #[must_use]
    pub const fn protocol(&self) -> &'static str {
        if self.use_https {
            HTTPS_PROTOCOL
        } else {
            HTTP_PROTOCOL
        }
    }

    #[must_use]
    pub fn with_https(mut self, use_https: bool) -> Self {
        self.use_https = use_https;
        self
    }

    /// Add a helper, replacing any helper already registered under `name`.
    #[must_use]
    pub fn with_helper(mut self, name: impl Into<String>, helper: Helper) -> Self {
        self.helpers.insert(name.into(), helper);
        self
    }

    /// Add a partial, replacing any partial already registered under `name`.
    #[must_use]
    pub fn with_partial(mut self, name: impl Into<String>, partial: Template) -> Self {
        self.partials.insert(name.into(), partial);
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Install a post-processor and enable it.
    #[must_use]
    pub fn with_post_processor(mut self, processor: impl PostProcessor + 'static) -> Self {
        self.post_process = Some(Arc::new(processor));
        self.post_process_enabled = true;
        self
    }

    /// Turn the configured post-processor on or off.
    #[must_use]
    pub fn enable_post_process(mut self, enabled: bool) -> Self {
        self.post_process_enabled = enabled;
        self
    }

    /// The post-processor that will run, if any.
    #[must_use]
    pub fn active_post_processor(&self) -> Option<&dyn PostProcessor> {
        if self.post_process_enabled {
            self.post_process.as_deref()
        } else {
            None
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("use_https", &self.use_https)
            .field("template", &self.template)
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .field("partials", &self.partials.keys().collect::<Vec<_>>())
            .field("post_process", &self.post_process.as_ref().map(|p| p.name().to_string()))
            .field("post_process_enabled", &self.post_process_enabled)
            .finish()
    }
}

/// Switches for the defaults that are a matter of choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Run the default minifying post-processor
    pub post_process: bool,
    /// Register `markdown_first_sentence` and `markdown_rest`
    pub sentence_helpers: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            post_process: false,
            sentence_helpers: true,
        }
    }
}

/// Builds the default [`Configuration`], with optional template files.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    use_https: bool,
    template_path: Option<PathBuf>,
    resource_partial_path: Option<PathBuf>,
    item_partial_path: Option<PathBuf>,
    options: BuildOptions,
}

impl ConfigurationBuilder {
    #[must_use]
    pub fn new(use_https: bool) -> Self {
        Self {
            use_https,
            ..Self::default()
        }
    }

    /// Replace the built-in main template with a file.
    #[must_use]
    pub fn template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    /// Replace the built-in `resource` partial with a file.
    #[must_use]
    pub fn resource_partial_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.resource_partial_path = Some(path.into());
        self
    }

    /// Replace the built-in `item` partial with a file.
    #[must_use]
    pub fn item_partial_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.item_partial_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Load any override files and assemble the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ConfigError`] if an override file cannot be read.
    pub async fn build(self) -> Result<Configuration, RenderError> {
        let template =
            load_template(self.template_path.as_deref(), DEFAULT_TEMPLATE).await?;
        let resource =
            load_template(self.resource_partial_path.as_deref(), DEFAULT_RESOURCE).await?;
        let item = load_template(self.item_partial_path.as_deref(), DEFAULT_ITEM).await?;

        let mut config = Configuration::new(template)
            .with_https(self.use_https)
            .with_partial(RESOURCE_PARTIAL, resource)
            .with_partial(ITEM_PARTIAL, item);
        config.helpers = default_helpers(self.options.sentence_helpers);
        config.post_process = Some(Arc::new(HtmlMinifier));
        config.post_process_enabled = self.options.post_process;

        tracing::debug!("Built configuration: {:?}", config);
        Ok(config)
    }
}

/// Default configuration with optional template, `resource` and `item` files.
///
/// # Errors
///
/// Returns [`RenderError::ConfigError`] if an override file cannot be read.
pub async fn build_default_configuration(
    use_https: bool,
    template: Option<&Path>,
    resource: Option<&Path>,
    item: Option<&Path>,
) -> Result<Configuration, RenderError> {
    let mut builder = ConfigurationBuilder::new(use_https);
    builder.template_path = template.map(Path::to_path_buf);
    builder.resource_partial_path = resource.map(Path::to_path_buf);
    builder.item_partial_path = item.map(Path::to_path_buf);
    builder.build().await
}

async fn load_template(path: Option<&Path>, built_in: &str) -> Result<Template, RenderError> {
    let Some(path) = path else {
        return Ok(Template::new(BUILT_IN_ORIGIN, built_in));
    };

    let resolved = resolve_path(path)?;
    tracing::debug!("Loading template from {}", resolved.display());
    let source = tokio::fs::read_to_string(&resolved).await.map_err(|e| RenderError::ConfigError {
        message: format!("cannot read template '{}': {}", resolved.display(), e),
    })?;
    Ok(Template::new(resolved.display().to_string(), source))
}

/// Resolve paths starting with `.` against the current directory.
fn resolve_path(path: &Path) -> Result<PathBuf, RenderError> {
    if !path.to_string_lossy().starts_with('.') {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(|e| RenderError::ConfigError {
        message: format!("cannot determine current directory: {}", e),
    })?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templating::helpers::{MARKDOWN_FIRST_SENTENCE, MARKDOWN_REST};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_default_configuration() {
        let config = build_default_configuration(false, None, None, None).await.unwrap();

        assert_eq!(config.protocol(), "http:");
        assert_eq!(config.template.origin, BUILT_IN_ORIGIN);
        assert_eq!(config.partials.keys().collect::<Vec<_>>(), vec!["resource", "item"]);
        assert!(config.helpers.contains_key(MARKDOWN_FIRST_SENTENCE));
        // Constructed but inert until enabled
        assert!(config.post_process.is_some());
        assert!(config.active_post_processor().is_none());
    }

    #[tokio::test]
    async fn test_options_toggle_defaults() {
        let config = ConfigurationBuilder::new(true)
            .options(BuildOptions {
                post_process: true,
                sentence_helpers: false,
            })
            .build()
            .await
            .unwrap();

        assert_eq!(config.protocol(), "https:");
        assert!(config.active_post_processor().is_some());
        assert!(!config.helpers.contains_key(MARKDOWN_FIRST_SENTENCE));
        assert!(!config.helpers.contains_key(MARKDOWN_REST));
    }

    #[tokio::test]
    async fn test_override_files_are_loaded() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("main.tera");
        let resource = temp.path().join("resource.tera");
        tokio::fs::write(&template, "main").await.unwrap();
        tokio::fs::write(&resource, "res").await.unwrap();

        let config =
            build_default_configuration(false, Some(&template), Some(&resource), None).await.unwrap();

        assert_eq!(config.template.source, "main");
        assert_eq!(config.partials[RESOURCE_PARTIAL].source, "res");
        assert_eq!(config.partials[ITEM_PARTIAL].origin, BUILT_IN_ORIGIN);
    }

    #[tokio::test]
    async fn test_missing_override_is_config_error() {
        let err = ConfigurationBuilder::new(false)
            .item_partial_path("/definitely/not/here/item.tera")
            .build()
            .await
            .unwrap_err();

        match err {
            RenderError::ConfigError {
                message,
            } => assert!(message.contains("item.tera"), "{message}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_path() {
        let absolute = Path::new("/tmp/template.tera");
        assert_eq!(resolve_path(absolute).unwrap(), absolute);

        let relative = resolve_path(Path::new("./custom.tera")).unwrap();
        assert!(relative.is_absolute());
        assert!(relative.ends_with("custom.tera"));
    }

    #[test]
    fn test_overrides() {
        let config = Configuration::new(Template::inline("{{ title }}"))
            .with_partial("item", Template::inline("a"))
            .with_partial("item", Template::inline("b"))
            .with_post_processor(|s: String| -> anyhow::Result<String> { Ok(s) });

        assert_eq!(config.partials.len(), 1);
        assert_eq!(config.partials["item"].source, "b");
        assert!(config.active_post_processor().is_some());
        assert!(config.enable_post_process(false).active_post_processor().is_none());
    }
}
