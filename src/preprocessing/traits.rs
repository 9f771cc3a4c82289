//! Extraction strategy trait shared by the column expanders.
//!
//! A [`ColumnExpander`](crate::preprocessing::ColumnExpander) owns the
//! fit/transform protocol; an [`AttributeExtractor`] decides how a single cell
//! breaks down into `(group, value)` attributes. The remaining capabilities
//! (vocabulary building, column naming and row population) have default
//! implementations driven by that one hook.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::expansion::{AttributeSet, HandleUnknown};
use crate::sparse::LilMatrix;
use std::collections::HashMap;

/// Build `"{key}{delim}{value}"` for each value, preserving value order.
pub fn create_column_names<I, S>(key: &str, values: I, delim: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| format!("{}{}{}", key, delim, value.as_ref()))
        .collect()
}

/// Full and drop-first column lists derived from one attribute set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnNames {
    pub full: Vec<String>,
    pub slim: Vec<String>,
}

/// Everything `populate_row` needs to know about one extraction column.
#[derive(Debug)]
pub struct Segment<'a> {
    /// Name of the extraction column.
    pub column: &'a str,
    /// Attributes fitted for this column.
    pub attributes: &'a AttributeSet,
    /// `(group, value)` → absolute output index, for the selected column list.
    ///
    /// Keyed on the pair rather than the rendered name, since distinct pairs
    /// such as `("a", "b_c")` and `("a_b", "c")` can render identically.
    pub lookup: HashMap<(&'a str, &'a str), usize>,
    pub delim: &'a str,
    pub handle_unknown: HandleUnknown,
}

/// Strategy for discovering attributes in the cells of a compressed column.
pub trait AttributeExtractor: Clone + Default {
    /// Identifier stored with persisted parameters.
    const KIND: &'static str;

    /// Break one cell into `(group, value)` attributes.
    ///
    /// `column` is the extraction column the cell belongs to and `row` its
    /// position, both used for grouping and error reporting.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::MalformedValue`] if the cell cannot be parsed.
    fn cell_attributes(
        &self,
        column: &str,
        row: usize,
        cell: Option<&str>,
    ) -> Result<Vec<(String, String)>, PreprocessingError>;

    /// Collect the attribute set of a whole column.
    fn pull_attributes(
        &self,
        column: &str,
        cells: &[Option<&str>],
    ) -> Result<AttributeSet, PreprocessingError> {
        let mut attributes = AttributeSet::new();
        for (row, cell) in cells.iter().enumerate() {
            for (group, value) in self.cell_attributes(column, row, *cell)? {
                attributes.insert(&group, value);
            }
        }
        Ok(attributes)
    }

    /// Derive full and slim column names; slim drops the first value of each group.
    fn derive_column_names(&self, attributes: &AttributeSet, delim: &str) -> ColumnNames {
        let mut names = ColumnNames::default();
        for (group, vocabulary) in attributes.groups() {
            let group_names = create_column_names(group, vocabulary.iter(), delim);
            names.slim.extend(group_names.iter().skip(1).cloned());
            names.full.extend(group_names);
        }
        names
    }

    /// Set the output columns of `row` that match the attributes of `cell`.
    fn populate_row(
        &self,
        segment: &Segment<'_>,
        row: usize,
        cell: Option<&str>,
        out: &mut LilMatrix,
    ) -> Result<(), PreprocessingError> {
        let attributes = self.cell_attributes(segment.column, row, cell)?;
        set_attributes(segment, row, &attributes, out)
    }
}

/// Set one output column per attribute of `row`.
///
/// Attributes without an output column are skipped, unless they were never
/// seen at fit time and `handle_unknown` is [`HandleUnknown::Error`].
pub fn set_attributes(
    segment: &Segment<'_>,
    row: usize,
    attributes: &[(String, String)],
    out: &mut LilMatrix,
) -> Result<(), PreprocessingError> {
    for (group, value) in attributes {
        if let Some(&col) = segment.lookup.get(&(group.as_str(), value.as_str())) {
            out.set(row, col, 1.0);
        } else if segment.handle_unknown == HandleUnknown::Error
            && !segment.attributes.contains(group, value)
        {
            return Err(PreprocessingError::UnknownAttribute {
                column: segment.column.to_string(),
                name: format!("{}{}{}", group, segment.delim, value),
            });
        }
    }
    Ok(())
}

/// Map each `(group, value)` of `attributes` to its absolute output index.
///
/// Indices start at `offset` and follow the column order of
/// [`AttributeExtractor::derive_column_names`]; with `drop_first` the first
/// value of each group gets no index.
pub fn segment_lookup(
    attributes: &AttributeSet,
    offset: usize,
    drop_first: bool,
) -> HashMap<(&str, &str), usize> {
    let skip = usize::from(drop_first);
    attributes
        .groups()
        .flat_map(|(group, vocabulary)| vocabulary.iter().skip(skip).map(move |value| (group, value)))
        .enumerate()
        .map(|(i, pair)| (pair, offset + i))
        .collect()
}
