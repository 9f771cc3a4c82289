use crate::dataset::ColumnSource;
use crate::preprocessing::PreprocessingError;

/// Owned table of named string columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InMemoryTable {
    n_rows: usize,
    columns: Vec<(String, Vec<Option<String>>)>,
}

impl InMemoryTable {
    /// Create a table with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, cells)` pairs.
    pub fn from_columns<I, N>(columns: I) -> Result<Self, PreprocessingError>
    where
        I: IntoIterator<Item = (N, Vec<Option<String>>)>,
        N: Into<String>,
    {
        columns
            .into_iter()
            .try_fold(Self::new(), |table, (name, cells)| {
                table.with_column(name, cells)
            })
    }

    /// Add a column of optional cells.
    ///
    /// The first column fixes the row count; every later column must match it.
    pub fn with_column<N, I, C>(mut self, name: N, cells: I) -> Result<Self, PreprocessingError>
    where
        N: Into<String>,
        I: IntoIterator<Item = Option<C>>,
        C: Into<String>,
    {
        let name = name.into();
        if self.columns.iter().any(|(existing, _)| *existing == name) {
            return Err(PreprocessingError::InvalidParameter(format!(
                "duplicate column `{}`",
                name
            )));
        }
        let cells: Vec<Option<String>> = cells.into_iter().map(|c| c.map(Into::into)).collect();
        if self.columns.is_empty() {
            self.n_rows = cells.len();
        } else if cells.len() != self.n_rows {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} rows", self.n_rows),
                got: format!("{} rows in column `{}`", cells.len(), name),
            });
        }
        self.columns.push((name, cells));
        Ok(self)
    }

    /// Add a column where every cell is present.
    pub fn with_str_column<N, I, C>(self, name: N, cells: I) -> Result<Self, PreprocessingError>
    where
        N: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.with_column(name, cells.into_iter().map(Some))
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }
}

impl ColumnSource for InMemoryTable {
    fn n_rows(&self) -> usize {
        self.n_rows
    }

    fn column(&self, name: &str) -> Result<Vec<Option<&str>>, PreprocessingError> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, cells)| cells.iter().map(|c| c.as_deref()).collect())
            .ok_or_else(|| PreprocessingError::missing_column(name))
    }

    fn has_column(&self, name: &str) -> bool {
        self.column_names().any(|existing| existing == name)
    }
}
