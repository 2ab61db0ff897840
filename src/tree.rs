//! Generic document tree produced by the parser and consumed by the renderer.
//!
//! A parsed API description is reduced to three shapes: scalars, ordered
//! sequences and order-preserving mappings with string keys. The tree is
//! owned by a single render call and serialized straight into the template
//! context, so it implements [`Serialize`] as plain JSON-like data.

use indexmap::IndexMap;
use serde::Serialize;

/// Mapping node with unique string keys kept in insertion order.
pub type Mapping = IndexMap<String, Tree>;

/// Leaf value of a [`Tree`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

/// Recursive document value: a scalar, a sequence or a mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Tree {
    Scalar(Scalar),
    Sequence(Vec<Tree>),
    Mapping(Mapping),
}

impl Tree {
    /// The `null` scalar.
    #[must_use]
    pub const fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Parse YAML text and convert it into a tree.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        Ok(Self::from(value))
    }

    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Tree]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Look up `key` when this node is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Tree> {
        self.as_mapping().and_then(|map| map.get(key))
    }
}

impl From<Scalar> for Tree {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for Tree {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for Tree {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::String(value))
    }
}

impl From<bool> for Tree {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Tree {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Integer(value))
    }
}

impl From<Vec<Tree>> for Tree {
    fn from(value: Vec<Tree>) -> Self {
        Self::Sequence(value)
    }
}

impl From<Mapping> for Tree {
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

impl From<serde_yaml::Value> for Tree {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => Self::null(),
            Value::Bool(b) => Self::from(b),
            Value::Number(n) => Self::Scalar(yaml_number(&n)),
            Value::String(s) => Self::from(s),
            Value::Sequence(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Mapping(map) => Self::Mapping(
                map.into_iter().map(|(key, value)| (yaml_key(key), Self::from(value))).collect(),
            ),
            // Tags such as `!include` carry no meaning for rendering
            Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Integer(i)
    } else {
        Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Render a YAML mapping key as a string (response codes arrive as integers).
fn yaml_key(key: serde_yaml::Value) -> String {
    use serde_yaml::Value;

    match key {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Tagged(tagged) => yaml_key(tagged.value),
        other => serde_yaml::to_string(&other).map(|s| s.trim().to_string()).unwrap_or_default(),
    }
}
