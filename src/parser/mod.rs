//! Reading API descriptions into document trees.
//!
//! The pipeline depends on the [`DocumentParser`] trait only. [`RamlParser`]
//! is the implementation used by default: it reads RAML as YAML and reshapes
//! the raw mapping into the layout the templates expect:
//!
//! - keys starting with `/` become entries of a `resources` sequence, nested
//!   resources inside their parent's `resources`
//! - each resource carries `relativeUri`, `parentUrl`, `uniqueId` and
//!   `displayName`
//! - HTTP verb keys become entries of the resource's `methods` sequence, each
//!   with a lower-case `method` field, in document order
//! - a method without `securedBy` inherits the one from its resource or, failing
//!   that, from the document root
//!
//! Traits, resource types and `!include` references are left as they are
//! written.

use std::path::{Path, PathBuf};

use crate::constants::{METHOD_FIELD, METHODS_KEY, RESOURCES_KEY};
use crate::core::RenderError;
use crate::tree::{Mapping, Tree};

/// Verbs recognised as method keys on a resource.
pub const HTTP_VERBS: [&str; 9] =
    ["get", "head", "post", "put", "patch", "delete", "options", "trace", "connect"];

const SECURED_BY: &str = "securedBy";
const DISPLAY_NAME: &str = "displayName";
const RELATIVE_URI: &str = "relativeUri";
const PARENT_URL: &str = "parentUrl";
const UNIQUE_ID: &str = "uniqueId";

/// Where an API description comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A file on disk
    Path(PathBuf),
    /// Text held in memory, with a label for error messages
    Inline {
        name: String,
        text: String,
    },
}

impl DocumentSource {
    /// Inline text labelled `<inline>`.
    pub fn inline(text: impl Into<String>) -> Self {
        Self::Inline {
            name: "<inline>".to_string(),
            text: text.into(),
        }
    }

    /// Label used in error messages and logs.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Inline {
                name,
                ..
            } => name.clone(),
        }
    }

    /// Read the raw document text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ParseError`] if the file cannot be read.
    pub async fn read(&self) -> Result<String, RenderError> {
        match self {
            Self::Path(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| RenderError::parse(self.name(), format!("cannot read file: {e}"))),
            Self::Inline {
                text,
                ..
            } => Ok(text.clone()),
        }
    }
}

impl From<PathBuf> for DocumentSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for DocumentSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

/// Turns document text into a [`Tree`].
pub trait DocumentParser: Send + Sync {
    /// Parse `text`; `source_name` labels any error.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ParseError`] when the text is not a valid document.
    fn parse(&self, text: &str, source_name: &str) -> Result<Tree, RenderError>;
}

/// RAML 0.8 / 1.0 reader built on the YAML parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct RamlParser;

impl DocumentParser for RamlParser {
    fn parse(&self, text: &str, source_name: &str) -> Result<Tree, RenderError> {
        let raw = Tree::from_yaml_str(text).map_err(|e| RenderError::parse(source_name, e))?;
        let Tree::Mapping(root) = raw else {
            return Err(RenderError::parse(source_name, "document root is not a mapping"));
        };

        let secured_by = root.get(SECURED_BY).cloned();
        let mut out = Mapping::with_capacity(root.len());
        let mut resources = Vec::new();

        for (key, value) in root {
            if is_resource_key(&key) {
                resources.push(build_resource(&key, value, "", secured_by.as_ref()));
            } else {
                out.insert(key, value);
            }
        }

        tracing::debug!("Parsed {} with {} top-level resource(s)", source_name, resources.len());
        if !resources.is_empty() {
            out.insert(RESOURCES_KEY.to_string(), Tree::Sequence(resources));
        }
        Ok(Tree::Mapping(out))
    }
}

fn is_resource_key(key: &str) -> bool {
    key.starts_with('/')
}

/// The lower-case verb if `key` names an HTTP method.
fn verb_of(key: &str) -> Option<&'static str> {
    HTTP_VERBS.iter().copied().find(|verb| verb.eq_ignore_ascii_case(key))
}

fn unique_id(full_path: &str) -> String {
    full_path
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .trim_matches('_')
        .to_string()
}

fn build_resource(
    relative_uri: &str,
    body: Tree,
    parent_url: &str,
    inherited_secured_by: Option<&Tree>,
) -> Tree {
    let body = match body {
        Tree::Mapping(map) => map,
        _ => Mapping::new(),
    };
    let full_path = format!("{parent_url}{relative_uri}");
    let secured_by = body.get(SECURED_BY).cloned().or_else(|| inherited_secured_by.cloned());

    let mut out = Mapping::new();
    out.insert(RELATIVE_URI.to_string(), relative_uri.into());
    out.insert(PARENT_URL.to_string(), parent_url.into());
    out.insert(UNIQUE_ID.to_string(), unique_id(&full_path).into());
    out.insert(DISPLAY_NAME.to_string(), relative_uri.into());

    let mut methods = Vec::new();
    let mut resources = Vec::new();
    for (key, value) in body {
        if is_resource_key(&key) {
            resources.push(build_resource(&key, value, &full_path, secured_by.as_ref()));
        } else if let Some(verb) = verb_of(&key) {
            methods.push(build_method(verb, value, secured_by.as_ref()));
        } else {
            out.insert(key, value);
        }
    }

    if !methods.is_empty() {
        out.insert(METHODS_KEY.to_string(), Tree::Sequence(methods));
    }
    if !resources.is_empty() {
        out.insert(RESOURCES_KEY.to_string(), Tree::Sequence(resources));
    }
    Tree::Mapping(out)
}

fn build_method(verb: &str, body: Tree, inherited_secured_by: Option<&Tree>) -> Tree {
    let mut out = Mapping::new();
    out.insert(METHOD_FIELD.to_string(), verb.into());
    if let Tree::Mapping(map) = body {
        out.extend(map);
    }
    if let Some(secured_by) = inherited_secured_by {
        out.entry(SECURED_BY.to_string()).or_insert_with(|| secured_by.clone());
    }
    Tree::Mapping(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::PETSTORE_RAML;

    fn parse(text: &str) -> Tree {
        RamlParser.parse(text, "test.raml").unwrap()
    }

    fn methods_of(resource: &Tree) -> Vec<&str> {
        resource
            .get(METHODS_KEY)
            .and_then(Tree::as_sequence)
            .unwrap_or_default()
            .iter()
            .filter_map(|m| m.get(METHOD_FIELD).and_then(Tree::as_str))
            .collect()
    }

    #[test]
    fn test_resources_are_collected() {
        let tree = parse(PETSTORE_RAML);
        assert_eq!(tree.get("title").and_then(Tree::as_str), Some("Pet Store"));
        assert!(tree.get("/pets").is_none());

        let resources = tree.get(RESOURCES_KEY).and_then(Tree::as_sequence).unwrap();
        assert_eq!(resources.len(), 1);
        let pets = &resources[0];
        assert_eq!(pets.get("relativeUri").and_then(Tree::as_str), Some("/pets"));
        assert_eq!(pets.get("parentUrl").and_then(Tree::as_str), Some(""));
        assert_eq!(pets.get("displayName").and_then(Tree::as_str), Some("Pets"));
        // Document order, not canonical order
        assert_eq!(methods_of(pets), vec!["post", "get"]);
    }

    #[test]
    fn test_nested_resources_get_parent_url() {
        let tree = parse(PETSTORE_RAML);
        let pets = &tree.get(RESOURCES_KEY).and_then(Tree::as_sequence).unwrap()[0];
        let nested = &pets.get(RESOURCES_KEY).and_then(Tree::as_sequence).unwrap()[0];

        assert_eq!(nested.get("relativeUri").and_then(Tree::as_str), Some("/{petId}"));
        assert_eq!(nested.get("parentUrl").and_then(Tree::as_str), Some("/pets"));
        assert_eq!(nested.get("uniqueId").and_then(Tree::as_str), Some("pets__petId"));
        assert_eq!(nested.get("displayName").and_then(Tree::as_str), Some("/{petId}"));
        assert_eq!(methods_of(nested), vec!["delete", "get"]);
    }

    #[test]
    fn test_secured_by_is_inherited() {
        let tree = parse(
            "title: API\nsecuredBy: [oauth_2_0]\n/a:\n  get:\n  post:\n    securedBy: [null]\n",
        );
        let a = &tree.get(RESOURCES_KEY).and_then(Tree::as_sequence).unwrap()[0];
        let methods = a.get(METHODS_KEY).and_then(Tree::as_sequence).unwrap();

        let get_secured = methods[0].get("securedBy").and_then(Tree::as_sequence).unwrap();
        assert_eq!(get_secured, &[Tree::from("oauth_2_0")]);
        let post_secured = methods[1].get("securedBy").and_then(Tree::as_sequence).unwrap();
        assert_eq!(post_secured, &[Tree::null()]);
    }

    #[test]
    fn test_verbs_are_case_insensitive() {
        let tree = parse("/a:\n  GET:\n    description: x\n");
        let a = &tree.get(RESOURCES_KEY).and_then(Tree::as_sequence).unwrap()[0];
        assert_eq!(methods_of(a), vec!["get"]);
    }

    #[test]
    fn test_invalid_documents() {
        let err = RamlParser.parse("title: [unclosed", "bad.raml").unwrap_err();
        assert!(matches!(err, RenderError::ParseError { ref source_name, .. } if source_name == "bad.raml"));

        let err = RamlParser.parse("- just\n- a list\n", "list.raml").unwrap_err();
        assert!(err.to_string().contains("not a mapping"));

        assert!(RamlParser.parse("", "empty.raml").is_err());
    }

    #[tokio::test]
    async fn test_unreadable_source_is_parse_error() {
        let source = DocumentSource::from(Path::new("/no/such/api.raml"));
        let err = source.read().await.unwrap_err();
        assert!(matches!(err, RenderError::ParseError { .. }));
        assert!(err.to_string().contains("/no/such/api.raml"));
    }

    #[tokio::test]
    async fn test_inline_source() {
        let source = DocumentSource::inline("title: x");
        assert_eq!(source.name(), "<inline>");
        assert_eq!(source.read().await.unwrap(), "title: x");
    }
}
