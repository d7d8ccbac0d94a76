//! # Property Values
//!
//! `PropertyValue` is the dynamic value space of the schema engine: the
//! four shapes a resolved field can take. Conversions from the obvious
//! Rust types keep construction call sites terse, and the `Debug`
//! rendering uses each shape's native literal syntax, which is what the
//! single-line record representation embeds.

use cyntel_core::{Identifier, Timestamp};

/// A resolved property value.
#[derive(Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// A text value (also carries identifiers and opaque pattern strings).
    String(String),
    /// A strict boolean.
    Boolean(bool),
    /// A second-precision UTC timestamp.
    Timestamp(Timestamp),
    /// A list of text values (e.g. labels).
    List(Vec<String>),
}

impl PropertyValue {
    /// The value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as a timestamp, if it is one.
    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// The value as a string list, if it is one.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Render the value as a JSON value; timestamps become their
    /// ISO 8601 Z-suffixed string.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::Timestamp(ts) => serde_json::Value::String(ts.to_iso8601()),
            Self::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|s| serde_json::Value::String(s.clone()))
                    .collect(),
            ),
        }
    }
}

impl std::fmt::Debug for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Timestamp(ts) => write!(f, "{ts:?}"),
            Self::List(items) => f.debug_list().entries(items).finish(),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Timestamp> for PropertyValue {
    fn from(ts: Timestamp) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<&Identifier> for PropertyValue {
    fn from(id: &Identifier) -> Self {
        Self::String(id.to_string())
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PropertyValue {
    fn from(items: [&str; N]) -> Self {
        Self::List(items.iter().map(|s| s.to_string()).collect())
    }
}
