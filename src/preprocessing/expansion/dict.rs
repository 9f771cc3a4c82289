//! Deep extraction from string-encoded mapping columns.
//!
//! Each cell holds a JSON object. Every outer key becomes an attribute group;
//! the values recorded for it depend on the shape of the value:
//!
//! | value              | recorded values                    |
//! |--------------------|------------------------------------|
//! | object             | its key names                      |
//! | array of scalars   | each element                       |
//! | string             | the string itself                  |
//! | number / bool      | the JSON text (`3`, `true`)        |
//! | null               | `null`                             |
//!
//! Values of a nested object are never inspected, so nesting deeper than one
//! level is accepted and ignored. Empty cells (missing, blank, `null` or `{}`)
//! are recorded under the [`EMPTY_GROUP`] sentinel at fit time; at transform
//! time they are skipped and leave their row all zero.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::expansion::ColumnExpander;
use crate::preprocessing::traits::{set_attributes, AttributeExtractor, Segment};
use crate::sparse::LilMatrix;
use serde_json::{Map, Value};

/// Group key recorded for empty cells.
pub const EMPTY_GROUP: &str = "<empty>";

/// Value recorded under [`EMPTY_GROUP`].
pub const EMPTY_VALUE: &str = "true";

/// Parses cells as JSON objects and expands nested objects into their keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct DictExtractor;

impl DictExtractor {
    /// Parse a cell; `None` for missing, blank, `null` and `{}` cells.
    fn mapping(
        column: &str,
        row: usize,
        cell: Option<&str>,
    ) -> Result<Option<Map<String, Value>>, PreprocessingError> {
        match cell.map(str::trim).filter(|c| !c.is_empty()) {
            Some(cell) => Self::parse(column, row, cell),
            None => Ok(None),
        }
    }

    fn mapping_attributes(
        column: &str,
        row: usize,
        map: &Map<String, Value>,
    ) -> Result<Vec<(String, String)>, PreprocessingError> {
        let mut attributes = Vec::new();
        for (key, value) in map {
            for inner in Self::extract_values(column, row, key, value)? {
                attributes.push((key.clone(), inner));
            }
        }
        Ok(attributes)
    }

    fn parse(
        column: &str,
        row: usize,
        cell: &str,
    ) -> Result<Option<Map<String, Value>>, PreprocessingError> {
        let malformed = |reason: String| PreprocessingError::MalformedValue {
            column: column.to_string(),
            row,
            reason,
        };
        match serde_json::from_str::<Value>(cell).map_err(|e| malformed(e.to_string()))? {
            Value::Null => Ok(None),
            Value::Object(map) if map.is_empty() => Ok(None),
            Value::Object(map) => Ok(Some(map)),
            other => Err(malformed(format!(
                "expected a mapping, found {}",
                kind_of(&other)
            ))),
        }
    }

    /// Resolve one mapping value into the attribute values it contributes.
    fn extract_values(
        column: &str,
        row: usize,
        key: &str,
        value: &Value,
    ) -> Result<Vec<String>, PreprocessingError> {
        match value {
            Value::Object(inner) => Ok(inner.keys().cloned().collect()),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    scalar_text(item).ok_or_else(|| PreprocessingError::MalformedValue {
                        column: column.to_string(),
                        row,
                        reason: format!(
                            "key `{}` holds a list containing {}",
                            key,
                            kind_of(item)
                        ),
                    })
                })
                .collect(),
            scalar => Ok(scalar_text(scalar).into_iter().collect()),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

impl AttributeExtractor for DictExtractor {
    const KIND: &'static str = "dict";

    fn cell_attributes(
        &self,
        column: &str,
        row: usize,
        cell: Option<&str>,
    ) -> Result<Vec<(String, String)>, PreprocessingError> {
        match Self::mapping(column, row, cell)? {
            Some(map) => Self::mapping_attributes(column, row, &map),
            None => Ok(vec![(EMPTY_GROUP.to_string(), EMPTY_VALUE.to_string())]),
        }
    }

    /// Empty cells set nothing, even when the sentinel was fitted.
    fn populate_row(
        &self,
        segment: &Segment<'_>,
        row: usize,
        cell: Option<&str>,
        out: &mut LilMatrix,
    ) -> Result<(), PreprocessingError> {
        let Some(map) = Self::mapping(segment.column, row, cell)? else {
            return Ok(());
        };
        let attributes = Self::mapping_attributes(segment.column, row, &map)?;
        set_attributes(segment, row, &attributes, out)
    }
}

/// One-hot expander for columns of string-encoded mappings.
///
/// # Example
/// ```rust
/// use column_expander::dataset::InMemoryTable;
/// use column_expander::preprocessing::{DictColumnExpander, TransformOptions};
///
/// let table = InMemoryTable::new()
///     .with_str_column("attrs", [r#"{"color": {"red": 1, "blue": 2}, "size": "large"}"#])
///     .unwrap();
///
/// let mut expander = DictColumnExpander::new(["attrs"]);
/// expander.fit(&table, None).unwrap();
/// assert_eq!(
///     expander.get_feature_names(false).unwrap(),
///     &["color_red", "color_blue", "size_large"]
/// );
///
/// let out = expander.transform(&table, TransformOptions::default()).unwrap();
/// assert_eq!(out.to_dense(), vec![vec![1.0, 1.0, 1.0]]);
/// ```
pub type DictColumnExpander = ColumnExpander<DictExtractor>;
