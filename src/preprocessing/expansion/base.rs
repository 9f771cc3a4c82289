//! The fit/transform protocol shared by every column expander.

use crate::dataset::ColumnSource;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::expansion::{AttributeSet, HandleUnknown, TransformOptions};
use crate::preprocessing::traits::{
    create_column_names, segment_lookup, AttributeExtractor, Segment,
};
use crate::serialization::SerializableParams;
use crate::sparse::LilMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Expands one or more compressed columns into one-hot sparse features.
///
/// The extraction strategy `E` decides how cells break down into attributes;
/// see [`ListColumnExpander`](super::ListColumnExpander) and
/// [`DictColumnExpander`](super::DictColumnExpander).
///
/// # Example
/// ```rust
/// use column_expander::dataset::InMemoryTable;
/// use column_expander::preprocessing::{ListColumnExpander, TransformOptions};
///
/// let table = InMemoryTable::new()
///     .with_str_column("col", ["a, b", "b, c"])
///     .unwrap();
///
/// let mut expander = ListColumnExpander::new(["col"]);
/// expander.fit(&table, None).unwrap();
/// assert_eq!(
///     expander.get_feature_names(false).unwrap(),
///     &["col_a", "col_b", "col_c"]
/// );
///
/// let out = expander.transform(&table, TransformOptions::default()).unwrap();
/// assert_eq!(out.shape(), (2, 3));
/// ```
#[derive(Clone, Debug)]
pub struct ColumnExpander<E: AttributeExtractor> {
    extraction_cols: Vec<String>,
    delim: String,
    handle_unknown: HandleUnknown,
    extractor: E,
    state: Option<FittedState>,
}

#[derive(Clone, Debug, PartialEq)]
struct FittedState {
    attributes: Vec<AttributeSet>,
    full_columns: Vec<String>,
    slim_columns: Vec<String>,
    /// Per extraction column: (full width, slim width).
    widths: Vec<(usize, usize)>,
}

impl FittedState {
    fn columns(&self, drop_first: bool) -> &[String] {
        if drop_first {
            &self.slim_columns
        } else {
            &self.full_columns
        }
    }

    fn width(&self, idx: usize, drop_first: bool) -> usize {
        let (full, slim) = self.widths[idx];
        if drop_first {
            slim
        } else {
            full
        }
    }
}

/// Serializable parameters of a fitted expander.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpanderParams {
    /// Extraction strategy the parameters were fitted with.
    pub kind: String,
    pub extraction_cols: Vec<String>,
    pub delim: String,
    pub handle_unknown: HandleUnknown,
    /// Attribute set per extraction column, in `extraction_cols` order.
    pub attributes: Vec<AttributeSet>,
}

impl<E: AttributeExtractor> ColumnExpander<E> {
    /// Create an unfitted expander over the given columns, using `"_"` as delimiter.
    pub fn new<I, S>(extraction_cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extraction_cols: extraction_cols.into_iter().map(Into::into).collect(),
            delim: "_".to_string(),
            handle_unknown: HandleUnknown::default(),
            extractor: E::default(),
            state: None,
        }
    }

    /// Set the separator placed between key and value in derived column names.
    pub fn with_delim(mut self, delim: impl Into<String>) -> Self {
        self.delim = delim.into();
        self
    }

    /// Set the strategy for attributes unseen at fit time.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }

    pub fn extraction_cols(&self) -> &[String] {
        &self.extraction_cols
    }

    pub fn delim(&self) -> &str {
        &self.delim
    }

    pub fn handle_unknown(&self) -> HandleUnknown {
        self.handle_unknown
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Naming helper: `"{key}{delim}{value}"` for each value.
    pub fn create_column_names<I, S>(&self, key: &str, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        create_column_names(key, values, &self.delim)
    }

    /// Learn the attribute vocabulary of every extraction column.
    ///
    /// When `y` is given, its same-named columns are appended to those of `x`
    /// before extraction, broadening the vocabulary. A failed fit leaves the
    /// previous state untouched.
    ///
    /// # Errors
    /// - [`PreprocessingError::InvalidParameter`] if no extraction column is
    ///   configured or the delimiter is empty
    /// - [`PreprocessingError::MissingColumn`] if a column is absent from `x` or `y`
    /// - [`PreprocessingError::MalformedValue`] if a cell cannot be parsed
    pub fn fit(
        &mut self,
        x: &dyn ColumnSource,
        y: Option<&dyn ColumnSource>,
    ) -> Result<&mut Self, PreprocessingError> {
        if self.extraction_cols.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "at least one extraction column is required".to_string(),
            ));
        }
        if self.delim.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "delimiter must not be empty".to_string(),
            ));
        }

        let mut attributes = Vec::with_capacity(self.extraction_cols.len());
        let mut full_columns = Vec::new();
        let mut slim_columns = Vec::new();
        let mut widths = Vec::with_capacity(self.extraction_cols.len());

        for column in &self.extraction_cols {
            let mut cells = x.column(column)?;
            if let Some(y) = y {
                cells.extend(y.column(column)?);
            }

            let set = self.extractor.pull_attributes(column, &cells)?;
            let names = self.extractor.derive_column_names(&set, &self.delim);
            debug!(
                kind = E::KIND,
                column = column.as_str(),
                rows = cells.len(),
                groups = set.len(),
                features = names.full.len(),
                "fitted extraction column"
            );

            widths.push((names.full.len(), names.slim.len()));
            full_columns.extend(names.full);
            slim_columns.extend(names.slim);
            attributes.push(set);
        }

        self.state = Some(FittedState {
            attributes,
            full_columns,
            slim_columns,
            widths,
        });
        Ok(self)
    }

    /// One-hot encode `x` into a sparse matrix aligned with the fitted columns.
    ///
    /// The output has `x.n_rows()` rows and `get_feature_names(drop_first)`
    /// columns, whatever attributes `x` contains.
    ///
    /// # Errors
    /// - [`PreprocessingError::NotFitted`] if called before `fit`
    /// - [`PreprocessingError::MissingColumn`] if an extraction column is absent
    /// - [`PreprocessingError::MalformedValue`] if a cell cannot be parsed
    /// - [`PreprocessingError::UnknownAttribute`] under [`HandleUnknown::Error`]
    pub fn transform(
        &self,
        x: &dyn ColumnSource,
        options: TransformOptions,
    ) -> Result<LilMatrix, PreprocessingError> {
        let state = self.state.as_ref().ok_or(PreprocessingError::NotFitted)?;
        let names = state.columns(options.drop_first);
        let n_rows = x.n_rows();
        let mut out = LilMatrix::zeros(n_rows, names.len());

        if options.verbose {
            info!(kind = E::KIND, rows = n_rows, "starting transformation");
        }

        let mut offset = 0;
        for (idx, column) in self.extraction_cols.iter().enumerate() {
            let cells = x.column(column)?;
            if cells.len() != n_rows {
                return Err(PreprocessingError::InvalidShape {
                    expected: format!("{} rows", n_rows),
                    got: format!("{} rows in column `{}`", cells.len(), column),
                });
            }

            let width = state.width(idx, options.drop_first);
            let segment = Segment {
                column: column.as_str(),
                attributes: &state.attributes[idx],
                lookup: segment_lookup(&state.attributes[idx], offset, options.drop_first),
                delim: self.delim.as_str(),
                handle_unknown: self.handle_unknown,
            };

            let progress = Progress::new(options.verbose, column, n_rows);
            for (row, cell) in cells.iter().enumerate() {
                progress.tick(row);
                self.extractor.populate_row(&segment, row, *cell, &mut out)?;
            }
            offset += width;
        }

        if options.verbose {
            info!(kind = E::KIND, nnz = out.nnz(), "transformation complete");
        }
        Ok(out)
    }

    /// Fit on `x` (and optionally `y`), then transform `x`.
    pub fn fit_transform(
        &mut self,
        x: &dyn ColumnSource,
        y: Option<&dyn ColumnSource>,
        options: TransformOptions,
    ) -> Result<LilMatrix, PreprocessingError> {
        self.fit(x, y)?;
        self.transform(x, options)
    }

    /// Output column names: slim when `drop_first`, full otherwise.
    pub fn get_feature_names(&self, drop_first: bool) -> Result<&[String], PreprocessingError> {
        self.state
            .as_ref()
            .map(|state| state.columns(drop_first))
            .ok_or(PreprocessingError::NotFitted)
    }

    /// Number of output columns for the selected column list.
    pub fn n_features_out(&self, drop_first: bool) -> Result<usize, PreprocessingError> {
        self.get_feature_names(drop_first).map(<[String]>::len)
    }

    /// Fitted attribute sets, one per extraction column.
    pub fn attributes(&self) -> Result<&[AttributeSet], PreprocessingError> {
        self.state
            .as_ref()
            .map(|state| state.attributes.as_slice())
            .ok_or(PreprocessingError::NotFitted)
    }

    /// Extract fitted parameters as a serializable representation.
    pub fn extract_params(&self) -> Result<ExpanderParams, PreprocessingError> {
        Ok(ExpanderParams {
            kind: E::KIND.to_string(),
            extraction_cols: self.extraction_cols.clone(),
            delim: self.delim.clone(),
            handle_unknown: self.handle_unknown,
            attributes: self.attributes()?.to_vec(),
        })
    }

    /// Rebuild a fitted expander; column names are re-derived from the attributes.
    pub fn from_params(params: ExpanderParams) -> Result<Self, PreprocessingError> {
        if params.kind != E::KIND {
            return Err(PreprocessingError::InvalidParameter(format!(
                "parameters were fitted by a `{}` expander, not `{}`",
                params.kind,
                E::KIND
            )));
        }
        if params.delim.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "delimiter must not be empty".to_string(),
            ));
        }
        if params.attributes.len() != params.extraction_cols.len() {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} attribute sets", params.extraction_cols.len()),
                got: format!("{}", params.attributes.len()),
            });
        }

        let extractor = E::default();
        let mut full_columns = Vec::new();
        let mut slim_columns = Vec::new();
        let mut widths = Vec::with_capacity(params.attributes.len());
        for set in &params.attributes {
            let names = extractor.derive_column_names(set, &params.delim);
            widths.push((names.full.len(), names.slim.len()));
            full_columns.extend(names.full);
            slim_columns.extend(names.slim);
        }

        Ok(Self {
            extraction_cols: params.extraction_cols,
            delim: params.delim,
            handle_unknown: params.handle_unknown,
            extractor,
            state: Some(FittedState {
                attributes: params.attributes,
                full_columns,
                slim_columns,
                widths,
            }),
        })
    }

    /// Save the fitted expander to a file.
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), PreprocessingError> {
        let bytes = self.extract_params()?.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a fitted expander from a file.
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, PreprocessingError> {
        let bytes = std::fs::read(path)?;
        let params = ExpanderParams::from_bytes(&bytes)?;
        Self::from_params(params)
    }
}

/// Percentage-complete notifications roughly every 10% of rows.
struct Progress<'a> {
    enabled: bool,
    column: &'a str,
    total: usize,
    step: usize,
}

impl<'a> Progress<'a> {
    fn new(enabled: bool, column: &'a str, total: usize) -> Self {
        let step = ((total as f64) * 0.1).round().max(1.0) as usize;
        Self {
            enabled,
            column,
            total,
            step,
        }
    }

    fn tick(&self, row: usize) {
        if self.enabled && row % self.step == 0 {
            info!(
                column = self.column,
                "{:.2}% completed",
                100.0 * row as f64 / self.total as f64
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::InMemoryTable;
    use crate::preprocessing::expansion::ListExtractor;

    type Expander = ColumnExpander<ListExtractor>;

    fn table(values: &[&str]) -> InMemoryTable {
        InMemoryTable::new()
            .with_str_column("col", values.iter().copied())
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let expander = Expander::new(["col"]);
        assert_eq!(expander.delim(), "_");
        assert_eq!(expander.handle_unknown(), HandleUnknown::Ignore);
        assert_eq!(expander.extraction_cols(), &["col".to_string()]);
        assert!(!expander.is_fitted());
    }

    #[test]
    fn test_transform_before_fit() {
        let expander = Expander::new(["col"]);
        let result = expander.transform(&table(&["a"]), TransformOptions::default());
        assert!(matches!(result, Err(PreprocessingError::NotFitted)));
    }

    #[test]
    fn test_feature_names_before_fit() {
        let expander = Expander::new(["col"]);
        assert!(matches!(
            expander.get_feature_names(true),
            Err(PreprocessingError::NotFitted)
        ));
        assert!(expander.extract_params().is_err());
    }

    #[test]
    fn test_fit_without_columns() {
        let mut expander = Expander::new(Vec::<String>::new());
        let result = expander.fit(&table(&["a"]), None);
        assert!(matches!(result, Err(PreprocessingError::InvalidParameter(_))));
    }

    #[test]
    fn test_fit_rejects_empty_delim() {
        let mut expander = Expander::new(["col"]).with_delim("");
        let result = expander.fit(&table(&["a"]), None);
        assert!(matches!(result, Err(PreprocessingError::InvalidParameter(_))));
        assert!(!expander.is_fitted());
    }

    #[test]
    fn test_from_params_rejects_empty_delim() {
        let mut expander = Expander::new(["col"]);
        expander.fit(&table(&["a"]), None).unwrap();
        let mut params = expander.extract_params().unwrap();
        params.delim.clear();
        assert!(matches!(
            Expander::from_params(params),
            Err(PreprocessingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_failed_fit_keeps_previous_state() {
        let mut expander = Expander::new(["col"]);
        expander.fit(&table(&["a, b"]), None).unwrap();

        let other = InMemoryTable::new().with_str_column("other", ["x"]).unwrap();
        assert!(expander.fit(&other, None).is_err());
        assert_eq!(expander.get_feature_names(false).unwrap(), &["col_a", "col_b"]);
    }

    #[test]
    fn test_fit_returns_self_for_chaining() {
        let mut expander = Expander::new(["col"]);
        let n = expander
            .fit(&table(&["a, b"]), None)
            .unwrap()
            .n_features_out(true)
            .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn test_fit_with_labels_broadens_vocabulary() {
        let mut expander = Expander::new(["col"]);
        let labels = table(&["z"]);
        expander.fit(&table(&["a"]), Some(&labels)).unwrap();
        assert_eq!(expander.get_feature_names(false).unwrap(), &["col_a", "col_z"]);
    }

    #[test]
    fn test_fit_with_labels_missing_column() {
        let mut expander = Expander::new(["col"]);
        let labels = InMemoryTable::new().with_str_column("other", ["z"]).unwrap();
        let result = expander.fit(&table(&["a"]), Some(&labels));
        assert!(matches!(result, Err(PreprocessingError::MissingColumn { .. })));
        assert!(!expander.is_fitted());
    }

    #[test]
    fn test_create_column_names_uses_delim() {
        let expander = Expander::new(["col"]).with_delim("__");
        assert_eq!(expander.create_column_names("k", ["v"]), vec!["k__v"]);
    }

    #[test]
    fn test_params_round_trip() {
        let mut expander = Expander::new(["col"]).with_delim("|");
        expander.fit(&table(&["a, b", "c"]), None).unwrap();

        let restored = Expander::from_params(expander.extract_params().unwrap()).unwrap();
        assert_eq!(
            restored.get_feature_names(false).unwrap(),
            expander.get_feature_names(false).unwrap()
        );
        assert_eq!(
            restored.get_feature_names(true).unwrap(),
            expander.get_feature_names(true).unwrap()
        );
    }

    #[test]
    fn test_from_params_wrong_kind() {
        let mut expander = Expander::new(["col"]);
        expander.fit(&table(&["a"]), None).unwrap();
        let mut params = expander.extract_params().unwrap();
        params.kind = "other".to_string();
        assert!(matches!(
            Expander::from_params(params),
            Err(PreprocessingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let mut expander = Expander::new(["col"]);
        expander.fit(&table(&["a, b", "b, c"]), None).unwrap();

        let temp_file = std::env::temp_dir().join("test_list_expander.bin");
        expander.save_to_file(&temp_file).unwrap();
        let loaded = Expander::load_from_file(&temp_file).unwrap();

        assert_eq!(
            loaded.get_feature_names(false).unwrap(),
            expander.get_feature_names(false).unwrap()
        );
        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_progress_step_never_zero() {
        assert_eq!(Progress::new(true, "col", 3).step, 1);
        assert_eq!(Progress::new(true, "col", 0).step, 1);
        assert_eq!(Progress::new(true, "col", 100).step, 10);
    }
}
