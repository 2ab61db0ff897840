//! Tera-based HTML templating for normalized API documents.
//!
//! Rendering binds three things to a fresh Tera instance:
//! - the main template, registered as `raml2html.html` so autoescaping is on
//! - named partials, reachable with `{% include "<name>" %}`
//! - helpers: filters, testers and functions usable from any of the templates
//!
//! # Default Helpers
//!
//! - `markdown`: render a markdown string as HTML
//! - `markdown_first_sentence` / `markdown_rest`: split a description for summaries
//! - `schema_url_link`: link to a schema when the value is an http(s) URL
//! - `lock_icon`: padlock markup for secured methods
//! - `resource_block_needed` / `request_block_needed`: testers deciding whether a
//!   resource or request section has anything to show
//!
//! Filters that produce HTML are marked safe, so their output is inserted
//! without being escaped a second time.
//!
//! # Example
//!
//! ```rust,no_run
//! use raml2html::templating::{PartialSet, Template, TemplateRenderer, default_helpers};
//! use raml2html::tree::Tree;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let helpers = default_helpers(true);
//! let partials = PartialSet::new();
//! let renderer = TemplateRenderer::new(&helpers, &partials);
//!
//! let data = Tree::from_yaml_str("title: Pets\ndescription: A *pet* store.")?;
//! let html = renderer.render(
//!     &Template::inline("<h1>{{ title }}</h1>{{ description | markdown }}"),
//!     &data,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod helpers;
pub mod renderer;

pub use error::{ErrorLocation, TemplateError};
pub use helpers::{Helper, HelperSet, default_helpers};
pub use renderer::{PartialSet, Template, TemplateRenderer};
