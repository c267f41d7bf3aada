//! Parameter registers
//!
//! A [`ParameterRegister`] is an ordered mapping from parameter key to a
//! scalar or a sequence of values. It carries inbound URL/request
//! parameters into a render and collects the values producers contribute.
//!
//! Keys keep the position of their first insertion. Writing an existing key
//! replaces its value in place, so the last writer wins without reordering
//! the register.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Separator used when a sequence is rendered as a single string.
pub const VALUE_SEPARATOR: &str = ", ";

/// A parameter value: either a single string or an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    Sequence(Vec<String>),
}

impl ParamValue {
    /// The individual values, one element for a scalar.
    pub fn values(&self) -> Vec<&str> {
        match self {
            ParamValue::Scalar(value) => vec![value.as_str()],
            ParamValue::Sequence(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// True for a sequence holding more than one value.
    pub fn is_multi(&self) -> bool {
        matches!(self, ParamValue::Sequence(values) if values.len() > 1)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Scalar(value) => f.write_str(value),
            ParamValue::Sequence(values) => f.write_str(&values.join(VALUE_SEPARATOR)),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Sequence(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::Sequence(values.into_iter().map(str::to_string).collect())
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ParamValue::Scalar(value) => serializer.serialize_str(value),
            ParamValue::Sequence(values) => values.serialize(serializer),
        }
    }
}

/// Ordered key/value register used for request and producer parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterRegister {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterRegister {
    /// Create an empty register
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter. An existing key keeps its position and takes the
    /// new value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove a parameter, returning its value
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Copy every entry of `other` into this register in `other`'s order.
    /// Keys already present are overwritten.
    pub fn merge(&mut self, other: &ParameterRegister) {
        for (key, value) in &other.entries {
            self.set(key.clone(), value.clone());
        }
    }

    /// Iterate over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the register is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten to a string mapping, joining sequences with
    /// [`VALUE_SEPARATOR`]. This is the form handed to template engines.
    pub fn to_flat_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

impl Serialize for ParameterRegister {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterRegister {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut register = ParameterRegister::new();
        for (key, value) in iter {
            register.set(key, value);
        }
        register
    }
}
