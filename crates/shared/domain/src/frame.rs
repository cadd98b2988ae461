//! Typed feature rows: the handoff between feature derivation and a classifier.
//!
//! A [`FeatureRow`] keeps its columns in insertion order and serializes as a JSON object
//! in that order. A [`FeatureFrame`] is the tabular batch a classifier consumes.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Integer(i64),
    Number(f64),
    Category(String),
}

impl FeatureValue {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            Self::Integer(value) => Some(*value as f64),
            Self::Category(_) => None,
        }
    }

    #[must_use]
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Category(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Number(_) => "number",
            Self::Category(_) => "category",
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Category(value) => f.write_str(value),
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u8> for FeatureValue {
    fn from(value: u8) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        Self::Category(value.to_owned())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

/// Named feature values in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    cells: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.push(column, value);
        self
    }

    /// Appends a column, replacing the value in place if the column already exists.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<FeatureValue>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.cells.push((column, value)),
        }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.cells.iter().find(|(name, _)| name == column).map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &FeatureValue> {
        self.cells.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn into_parts(self) -> (Vec<String>, Vec<FeatureValue>) {
        self.cells.into_iter().unzip()
    }
}

impl Serialize for FeatureRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FeatureRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = FeatureRow;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of feature names to numbers or strings")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut row = FeatureRow::new();
                while let Some((name, value)) = access.next_entry::<String, FeatureValue>()? {
                    row.push(name, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// Column-named batch of rows sharing one column order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    columns: Vec<String>,
    rows: Vec<Vec<FeatureValue>>,
}

impl FeatureFrame {
    /// One-row frame whose columns are the row's columns.
    #[must_use]
    pub fn single(row: FeatureRow) -> Self {
        let (columns, values) = row.into_parts();
        Self { columns, rows: vec![values] }
    }

    /// Builds a frame from rows that must all share the first row's column order.
    ///
    /// Returns `None` for an empty iterator or a row with different columns.
    pub fn from_rows(rows: impl IntoIterator<Item = FeatureRow>) -> Option<Self> {
        let mut rows = rows.into_iter();
        let mut frame = Self::single(rows.next()?);
        for row in rows {
            let (columns, values) = row.into_parts();
            if columns != frame.columns {
                return None;
            }
            frame.rows.push(values);
        }
        Some(frame)
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<FeatureValue>] {
        &self.rows
    }

    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
