//! Formatting helpers available to every template.
//!
//! The helpers are plain functions over template values. Each one is pure:
//! it reads its input and returns new output without touching shared state.
//! They reach Tera through three registration kinds:
//!
//! | Name | Kind | Usage |
//! |------|------|-------|
//! | `markdown` | filter | `{{ resource.description \| markdown }}` |
//! | `markdown_first_sentence` | filter | `{{ method.description \| markdown_first_sentence }}` |
//! | `markdown_rest` | filter | `{{ method.description \| markdown_rest }}` |
//! | `schema_url_link` | filter | `{{ body.schema \| schema_url_link }}` |
//! | `lock_icon` | filter | `{{ method.securedBy \| lock_icon }}` |
//! | `resource_block_needed` | tester | `{% if resource is resource_block_needed %}` |
//! | `request_block_needed` | tester | `{% if method is request_block_needed %}` |
//!
//! The HTML-producing filters report themselves as safe, so Tera's
//! autoescaping leaves their output alone.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tera::{Filter, Function, Tera, Test, Value};

use crate::markdown;

/// Markup returned by `lock_icon` for secured methods.
pub const LOCK_ICON_HTML: &str =
    r#" <span class="glyphicon glyphicon-lock" title="Authentication required"></span>"#;

pub const MARKDOWN: &str = "markdown";
pub const MARKDOWN_FIRST_SENTENCE: &str = "markdown_first_sentence";
pub const MARKDOWN_REST: &str = "markdown_rest";
pub const SCHEMA_URL_LINK: &str = "schema_url_link";
pub const LOCK_ICON: &str = "lock_icon";
pub const RESOURCE_BLOCK_NEEDED: &str = "resource_block_needed";
pub const REQUEST_BLOCK_NEEDED: &str = "request_block_needed";

/// Convert markdown to HTML; blank input gives an empty string.
#[must_use]
pub fn markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    markdown::to_html(text)
}

/// HTML of the first sentence of `text`, without a wrapping paragraph.
#[must_use]
pub fn markdown_first_sentence(text: &str) -> String {
    markdown::first_sentence_html(text)
}

/// HTML of every sentence after the first.
#[must_use]
pub fn markdown_rest(text: &str) -> String {
    markdown::rest_html(text)
}

/// Anchor labelled "Schema" when `text` looks like a schema URL.
///
/// Absolute `http`/`https` URLs and `../` relative paths qualify; anything
/// else (typically an inline schema) yields `None`.
#[must_use]
pub fn schema_url_link(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.starts_with("htt") || trimmed.starts_with("../") {
        Some(format!("<a href=\"{}\">Schema</a>", escape_attribute(trimmed)))
    } else {
        None
    }
}

/// Escape text for a double-quoted attribute value. URL slashes stay readable.
fn escape_attribute(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Lock icon markup when a method requires authentication.
///
/// A `null` entry in `securedBy` means "also reachable without security".
/// The first such entry is discarded; any entry left over means at least
/// one security scheme applies.
#[must_use]
pub fn lock_icon(secured_by: &[Value]) -> String {
    let mut schemes = secured_by.to_vec();
    if let Some(index) = schemes.iter().position(Value::is_null) {
        schemes.remove(index);
    }

    if schemes.is_empty() {
        String::new()
    } else {
        LOCK_ICON_HTML.to_string()
    }
}

/// Whether a method needs a request section.
///
/// Only query parameters, headers and body count. `uri_params` is accepted
/// for signature parity with the resource data but does not take part in
/// the decision. A field is absent when it is missing from the document; an
/// explicit `null` counts as present.
#[must_use]
pub fn request_block_needed(
    uri_params: Option<&Value>,
    query_params: Option<&Value>,
    header_params: Option<&Value>,
    body: Option<&Value>,
) -> bool {
    let _ = uri_params;
    query_params.is_some() || header_params.is_some() || body.is_some()
}

/// Whether a resource needs its own panel.
///
/// True when it has at least one method, or has both a description and a
/// parent URL.
#[must_use]
pub fn resource_block_needed(node: &Value) -> bool {
    let has_methods = node
        .get(crate::constants::METHODS_KEY)
        .and_then(Value::as_array)
        .is_some_and(|methods| !methods.is_empty());

    has_methods
        || (node.get("description").is_some_and(is_truthy)
            && node.get("parentUrl").is_some_and(is_truthy))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text content of a template value: strings as-is, null as nothing,
/// other scalars in their display form.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Filter whose output is already HTML and must not be escaped again.
struct SafeHtmlFilter {
    name: &'static str,
    render: fn(&Value) -> tera::Result<Value>,
}

impl Filter for SafeHtmlFilter {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        (self.render)(value).map_err(|e| tera::Error::msg(format!("{} filter error: {}", self.name, e)))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

fn text_value(value: &Value, render: fn(&str) -> String) -> Value {
    Value::String(text_of(value).map(|text| render(&text)).unwrap_or_default())
}

fn markdown_filter(value: &Value) -> tera::Result<Value> {
    Ok(text_value(value, markdown))
}

fn markdown_first_sentence_filter(value: &Value) -> tera::Result<Value> {
    Ok(text_value(value, markdown_first_sentence))
}

fn markdown_rest_filter(value: &Value) -> tera::Result<Value> {
    Ok(text_value(value, markdown_rest))
}

fn schema_url_link_filter(value: &Value) -> tera::Result<Value> {
    Ok(text_of(value)
        .and_then(|text| schema_url_link(&text))
        .map_or(Value::Null, Value::String))
}

fn lock_icon_filter(value: &Value) -> tera::Result<Value> {
    match value {
        Value::Null => Ok(Value::String(String::new())),
        Value::Array(items) => Ok(Value::String(lock_icon(items))),
        // A single scheme written without list brackets
        single => Ok(Value::String(lock_icon(std::slice::from_ref(single)))),
    }
}

fn resource_block_tester(value: Option<&Value>, _args: &[Value]) -> tera::Result<bool> {
    Ok(value.is_some_and(resource_block_needed))
}

fn request_block_tester(value: Option<&Value>, _args: &[Value]) -> tera::Result<bool> {
    Ok(value.is_some_and(|method| {
        request_block_needed(
            method.get("uriParameters"),
            method.get("queryParameters"),
            method.get("headers"),
            method.get("body"),
        )
    }))
}

/// A named extension of the template engine.
#[derive(Clone)]
pub enum Helper {
    Filter(Arc<dyn Filter>),
    Function(Arc<dyn Function>),
    Test(Arc<dyn Test>),
}

impl Helper {
    pub fn filter(filter: impl Filter + 'static) -> Self {
        Self::Filter(Arc::new(filter))
    }

    pub fn function(function: impl Function + 'static) -> Self {
        Self::Function(Arc::new(function))
    }

    pub fn test(test: impl Test + 'static) -> Self {
        Self::Test(Arc::new(test))
    }

    /// Register this helper on a Tera instance under `name`.
    ///
    /// Registering a name twice replaces the earlier helper of the same kind.
    pub(crate) fn register(&self, name: &str, tera: &mut Tera) {
        match self {
            Self::Filter(filter) => tera.register_filter(name, SharedFilter(Arc::clone(filter))),
            Self::Function(function) => {
                tera.register_function(name, SharedFunction(Arc::clone(function)));
            }
            Self::Test(test) => tera.register_tester(name, SharedTest(Arc::clone(test))),
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Filter(_) => "filter",
            Self::Function(_) => "function",
            Self::Test(_) => "test",
        }
    }
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Helper::{}", self.kind())
    }
}

struct SharedFilter(Arc<dyn Filter>);

impl Filter for SharedFilter {
    fn filter(&self, value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
        self.0.filter(value, args)
    }

    fn is_safe(&self) -> bool {
        self.0.is_safe()
    }
}

struct SharedFunction(Arc<dyn Function>);

impl Function for SharedFunction {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        self.0.call(args)
    }

    fn is_safe(&self) -> bool {
        self.0.is_safe()
    }
}

struct SharedTest(Arc<dyn Test>);

impl Test for SharedTest {
    fn test(&self, value: Option<&Value>, args: &[Value]) -> tera::Result<bool> {
        self.0.test(value, args)
    }
}

/// Named helpers, registered in insertion order.
pub type HelperSet = IndexMap<String, Helper>;

fn safe(name: &'static str, render: fn(&Value) -> tera::Result<Value>) -> (String, Helper) {
    (name.to_string(), Helper::filter(SafeHtmlFilter { name, render }))
}

/// The built-in helper library.
///
/// `sentence_helpers` controls whether `markdown_first_sentence` and
/// `markdown_rest` are part of the set.
#[must_use]
pub fn default_helpers(sentence_helpers: bool) -> HelperSet {
    let mut helpers = HelperSet::new();
    helpers.extend([safe(MARKDOWN, markdown_filter)]);
    if sentence_helpers {
        helpers.extend([
            safe(MARKDOWN_FIRST_SENTENCE, markdown_first_sentence_filter),
            safe(MARKDOWN_REST, markdown_rest_filter),
        ]);
    }
    helpers.extend([
        safe(SCHEMA_URL_LINK, schema_url_link_filter),
        safe(LOCK_ICON, lock_icon_filter),
        (RESOURCE_BLOCK_NEEDED.to_string(), Helper::test(resource_block_tester)),
        (REQUEST_BLOCK_NEEDED.to_string(), Helper::test(request_block_tester)),
    ]);
    helpers
}
