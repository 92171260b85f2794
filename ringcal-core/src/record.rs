//! Measurement records produced by contour analysis.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Source image file name.
pub const FILE_NAME: &str = "File Name";
/// Ring multiplier the record was measured on.
pub const MULTIPLIER: &str = "Multiplier";
/// Number of contour/ring intersections.
pub const INTERSECTION_NUMBER: &str = "Intersection Number";
/// Number of bends found.
pub const NUMBER_OF_BENDS: &str = "Number of Bends";
/// Sum of all bend angles.
pub const TOTAL_MEANDERING_ANGLE: &str = "Total Meandering Angle at All Bends";

/// Fixed leading fields every record must carry, in column order.
pub const REQUIRED_FIELDS: [&str; 4] = [FILE_NAME, MULTIPLIER, INTERSECTION_NUMBER, NUMBER_OF_BENDS];

const BEND_PREFIX: &str = "Bend";
const BEND_SUFFIX: &str = "_External_Angle";

/// Field name for the external angle of bend `index` (1-based).
#[must_use]
pub fn bend_field(index: usize) -> String {
    format!("{BEND_PREFIX}{index}{BEND_SUFFIX}")
}

/// Extracts the bend index from a `Bend<N>_External_Angle` field name.
#[must_use]
pub fn parse_bend_index(name: &str) -> Option<usize> {
    let digits = name.strip_prefix(BEND_PREFIX)?.strip_suffix(BEND_SUFFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if any.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
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

/// Results for one analyzed ring: field name to value.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MeasurementRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl MeasurementRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Highest bend index present, 0 if none.
    #[must_use]
    pub fn max_bend_index(&self) -> usize {
        self.field_names()
            .filter_map(parse_bend_index)
            .max()
            .unwrap_or(0)
    }

    /// The record's file name, when present as text.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.get(FILE_NAME).and_then(FieldValue::as_text)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MeasurementRecord
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
