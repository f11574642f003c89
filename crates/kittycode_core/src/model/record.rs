//! Generic document record.
//!
//! # Invariants
//! - `id` is opaque; callers must not infer structure from it.
//! - `fields` is ordered by name so listings and logs are deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wraps an identifier obtained from a store or a previous listing.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh random identifier (v4 UUID, simple form).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Scalar attribute value.
///
/// Serialized untagged so persisted documents are plain JSON objects.
/// Whole JSON numbers decode as `Integer`, fractional ones as `Number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            Self::Integer(_) | Self::Number(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Number(_) | Self::Text(_) => None,
        }
    }

    /// Numeric value, widening integers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Returns whether this value counts as "not provided" for required checks.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(value) => value.trim().is_empty(),
            Self::Integer(_) | Self::Number(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        Self::Integer(i64::from(value))
    }
}

/// Named scalar attributes of one record.
pub type Fields = BTreeMap<String, FieldValue>;

/// Builds a `Fields` map from `(name, value)` pairs.
pub fn fields<K, V, I>(pairs: I) -> Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}

/// One document in a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub fields: Fields,
}

impl Record {
    pub fn new(id: RecordId, fields: Fields) -> Self {
        Self { id, fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text value of `name`, or `None` when absent or not text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Integer value of `name`, or `None` when absent or not an integer.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_integer)
    }

    /// Applies a partial update: supplied fields replace, others stay.
    pub fn merge(&mut self, patch: &Fields) {
        for (name, value) in patch {
            self.fields.insert(name.clone(), value.clone());
        }
    }
}
