//! Global constants used throughout the raml2html codebase.
//!
//! This module contains the reserved tree keys, template names and other
//! string constants that are shared between the parser, the normalizer,
//! the template engine binding and the CLI. Defining them centrally keeps
//! the contract between those pieces in one place.

/// Version marker stamped into every render configuration.
///
/// Templates can print it through `{{ config.version }}`.
pub const RAML2HTML_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Key under which a resource keeps its list of method descriptors.
pub const METHODS_KEY: &str = "methods";

/// Key inside a method descriptor naming the HTTP verb.
pub const METHOD_FIELD: &str = "method";

/// Key under which nested resources are stored.
pub const RESOURCES_KEY: &str = "resources";

/// Reserved key on the root mapping holding the resolved render configuration.
pub const CONFIG_KEY: &str = "config";

/// Protocol used for generated links when https is disabled.
pub const HTTP_PROTOCOL: &str = "http:";

/// Protocol used for generated links when https is enabled.
pub const HTTPS_PROTOCOL: &str = "https:";

/// Name the main template is registered under.
///
/// The `.html` suffix turns on Tera's autoescaping for the whole render,
/// including every partial reached through `{% include %}`.
pub const MAIN_TEMPLATE_NAME: &str = "raml2html.html";

/// Name of the partial rendering a single resource.
pub const RESOURCE_PARTIAL: &str = "resource";

/// Name of the partial rendering a single named parameter.
pub const ITEM_PARTIAL: &str = "item";

/// CSS class applied to every table produced by markdown conversion.
pub const TABLE_CSS_CLASS: &str = "table";
