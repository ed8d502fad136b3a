//! Core type definitions for model translation
//!
//! This module contains the target-independent attribute type
//! classification and the generated output map.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Classification of a raw attribute type token
///
/// Tokens are matched exactly and case-sensitively. Anything outside the
/// known keywords becomes [`AttributeType::Custom`], which is how references
/// to other generated classes come through, together with array tokens like
/// `int[]` and generics other than `List<...>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum AttributeType {
    /// `String`
    String,
    /// `Date`
    Date,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `boolean`
    Boolean,
    /// `List<T>`, holding the text between `List<` and the final `>`
    List(String),
    /// Any other token, kept verbatim
    Custom(String),
}

impl AttributeType {
    /// Classify a raw type token
    pub fn from_token(token: &str) -> Self {
        match token {
            "String" => AttributeType::String,
            "Date" => AttributeType::Date,
            "int" => AttributeType::Int,
            "float" => AttributeType::Float,
            "boolean" => AttributeType::Boolean,
            _ => match token.strip_prefix("List<") {
                Some(rest) => {
                    let element = match rest.rfind('>') {
                        Some(close) => &rest[..close],
                        None => rest,
                    };
                    AttributeType::List(element.to_string())
                }
                None => AttributeType::Custom(token.to_string()),
            },
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::String => write!(f, "String"),
            AttributeType::Date => write!(f, "Date"),
            AttributeType::Int => write!(f, "int"),
            AttributeType::Float => write!(f, "float"),
            AttributeType::Boolean => write!(f, "boolean"),
            AttributeType::List(element) => write!(f, "List<{}>", element),
            AttributeType::Custom(raw) => write!(f, "{}", raw),
        }
    }
}

/// Generated source units keyed by file name
///
/// Ordered by file name so the same model always yields the same iteration
/// order and serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GeneratedFiles {
    files: BTreeMap<String, String>,
}

impl GeneratedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a unit, replacing any previous unit with the same name
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(name.into(), content.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
