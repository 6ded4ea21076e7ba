//! Raw attribute values attached to document nodes.
//!
//! The parser hands every node over with a mapping of attribute name to raw
//! value. Most values arrive as text; class-like attributes arrive as lists.
//! This module owns the coercion rules applied when such a value is consumed:
//!
//! - numeric reads parse text into `f64` and write the number back in place,
//! - list reads turn a space-separated text value into a list in place.
//!
//! No validation beyond what the directive option specs already performed is
//! done here.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoordError;

/// Ordered class tags of a node.
pub const CLASSES: &str = "classes";
/// Identifiers assigned by the parser.
pub const IDS: &str = "ids";
/// Duplicate names; preferred over [`IDS`] when naming a slide.
pub const DUPNAMES: &str = "dupnames";
/// Name of the positioning function selected for a slide.
pub const FUNC: &str = "func";

/// Prefix shared by every presentation data attribute.
pub const DATA_PREFIX: &str = "data-";

/// A single raw attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl AttrValue {
    /// Returns the numeric interpretation of this value, if it has one.
    ///
    /// Text is trimmed and parsed; lists are never numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(number) => Some(*number),
            AttrValue::Text(text) => text.trim().parse().ok(),
            AttrValue::List(_) => None,
        }
    }

    /// Coerce this value to a number for the attribute `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::InvalidNumber`] for text that does not parse and
    /// [`CoordError::NotNumeric`] for lists.
    pub fn to_number(&self, key: &str) -> Result<f64, CoordError> {
        match self {
            AttrValue::List(_) => Err(CoordError::NotNumeric {
                key: key.to_string(),
            }),
            other => other.as_number().ok_or_else(|| CoordError::InvalidNumber {
                key: key.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Borrow the text of a [`AttrValue::Text`] value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the items of a [`AttrValue::List`] value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Convert this value into a list in place and borrow it mutably.
    ///
    /// Text and numbers are split on whitespace.
    pub fn make_list(&mut self) -> &mut Vec<String> {
        match self {
            AttrValue::List(items) => items,
            other => {
                let items = other
                    .to_string()
                    .split_whitespace()
                    .map(String::from)
                    .collect();
                *other = AttrValue::List(items);
                other.make_list()
            }
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Number(number) => write!(f, "{number}"),
            AttrValue::Text(text) => write!(f, "{text}"),
            AttrValue::List(items) => write!(f, "{}", items.join(" ")),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(number: f64) -> Self {
        AttrValue::Number(number)
    }
}

impl From<u64> for AttrValue {
    fn from(number: u64) -> Self {
        AttrValue::Number(number as f64)
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::Text(text.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(text)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(items: Vec<String>) -> Self {
        AttrValue::List(items)
    }
}

/// The attribute mapping of one node, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, AttrValue>);

impl Attributes {
    /// Create an empty attribute mapping.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a value, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.0.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the text of a textual attribute.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttrValue::as_text)
    }

    /// Borrow a list attribute, or an empty slice if it is absent or not a list.
    pub fn list(&self, key: &str) -> &[String] {
        self.get(key).and_then(AttrValue::as_list).unwrap_or_default()
    }

    /// Borrow a list attribute mutably, creating or coercing it as needed.
    pub fn list_mut(&mut self, key: &str) -> &mut Vec<String> {
        self.0
            .entry(key.to_string())
            .or_insert_with(|| AttrValue::List(Vec::new()))
            .make_list()
    }

    pub fn classes(&self) -> &[String] {
        self.list(CLASSES)
    }

    pub fn classes_mut(&mut self) -> &mut Vec<String> {
        self.list_mut(CLASSES)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| c == class)
    }

    pub fn ids(&self) -> &[String] {
        self.list(IDS)
    }

    pub fn dupnames(&self) -> &[String] {
        self.list(DUPNAMES)
    }

    /// Read a numeric attribute without modifying the mapping.
    ///
    /// Returns `Ok(None)` when the attribute is absent.
    ///
    /// # Errors
    ///
    /// Returns a [`CoordError`] if the value is present but not numeric.
    pub fn number(&self, key: &str) -> Result<Option<f64>, CoordError> {
        self.get(key).map(|value| value.to_number(key)).transpose()
    }

    /// Read a numeric attribute, storing `default` first if it is absent.
    ///
    /// Textual values are replaced by their parsed number, so after the first
    /// call the attribute is always present and numeric.
    ///
    /// # Errors
    ///
    /// Returns a [`CoordError`] if the stored value is not numeric; the value
    /// is left untouched in that case.
    pub fn number_or_insert(&mut self, key: &str, default: f64) -> Result<f64, CoordError> {
        let value = self
            .0
            .entry(key.to_string())
            .or_insert(AttrValue::Number(default));
        let number = value.to_number(key)?;
        *value = AttrValue::Number(number);
        Ok(number)
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
