//! Translation file input definitions

use std::collections::HashMap;
use std::fmt;

use serde_json::{
    Number,
    Value,
};

/// A leaf value in a translation file.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Any JSON number
    Number(Number),
    /// A string
    String(String),
}

impl Scalar {
    /// Whether the value is worth showing: non-empty strings, non-zero numbers and `true`.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Number(number) => {
                if let Some(n) = number.as_i64() {
                    n != 0
                } else if let Some(n) = number.as_u64() {
                    n != 0
                } else {
                    number.as_f64().is_some_and(|n| n.abs() > 0.0)
                }
            }
            Self::String(text) => !text.is_empty(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::String(text) => f.write_str(text),
        }
    }
}

/// Parsed contents of one translation file.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationTree {
    /// Terminal value
    Leaf(Scalar),
    /// Array, walkable by numeric index
    List(Vec<TranslationTree>),
    /// Object
    Nested(HashMap<String, TranslationTree>),
}

impl TranslationTree {
    /// Parses a translation file.
    ///
    /// # Errors
    /// Returns the JSON error when `bytes` is not valid JSON.
    pub fn parse(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<Value>(bytes).map(Self::from)
    }

    /// Walks `path` one key at a time.
    ///
    /// List elements are addressed by their decimal index. A missing
    /// segment, or a segment applied to a leaf, yields `None`.
    #[must_use]
    pub fn walk<'a, I>(&self, path: I) -> Option<&Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        path.into_iter().try_fold(self, |node, segment| match node {
            Self::Nested(map) => map.get(segment),
            Self::List(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
            Self::Leaf(_) => None,
        })
    }

    /// Like [`walk`](Self::walk), but only succeeds when the path ends on a leaf.
    #[must_use]
    pub fn leaf_at<'a, I>(&self, path: I) -> Option<&Scalar>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self.walk(path)? {
            Self::Leaf(scalar) => Some(scalar),
            Self::List(_) | Self::Nested(_) => None,
        }
    }
}

impl From<Value> for TranslationTree {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Leaf(Scalar::Null),
            Value::Bool(value) => Self::Leaf(Scalar::Bool(value)),
            Value::Number(number) => Self::Leaf(Scalar::Number(number)),
            Value::String(text) => Self::Leaf(Scalar::String(text)),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Nested(map.into_iter().map(|(key, value)| (key, Self::from(value))).collect())
            }
        }
    }
}
