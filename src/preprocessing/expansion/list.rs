//! Shallow extraction from comma-delimited string columns.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::expansion::ColumnExpander;
use crate::preprocessing::traits::AttributeExtractor;

/// Splits cells on `,` and treats every trimmed token as an attribute.
///
/// All tokens of a column share one group keyed by the column name, so the
/// derived names are `"{column}{delim}{token}"`. Empty tokens and missing
/// cells contribute nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListExtractor;

impl AttributeExtractor for ListExtractor {
    const KIND: &'static str = "list";

    fn cell_attributes(
        &self,
        column: &str,
        _row: usize,
        cell: Option<&str>,
    ) -> Result<Vec<(String, String)>, PreprocessingError> {
        Ok(cell
            .into_iter()
            .flat_map(|cell| cell.split(','))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| (column.to_string(), token.to_string()))
            .collect())
    }
}

/// One-hot expander for comma-delimited category lists.
///
/// # Example
/// ```rust
/// use column_expander::dataset::InMemoryTable;
/// use column_expander::preprocessing::{ListColumnExpander, TransformOptions};
///
/// let train = InMemoryTable::new()
///     .with_str_column("genres", ["drama, comedy", "comedy"])
///     .unwrap();
/// let mut expander = ListColumnExpander::new(["genres"]);
/// expander.fit(&train, None).unwrap();
///
/// // "horror" was never seen, so it is ignored.
/// let test = InMemoryTable::new()
///     .with_str_column("genres", ["horror, drama"])
///     .unwrap();
/// let out = expander.transform(&test, TransformOptions::default()).unwrap();
/// assert_eq!(out.to_dense(), vec![vec![1.0, 0.0]]);
/// ```
pub type ListColumnExpander = ColumnExpander<ListExtractor>;
