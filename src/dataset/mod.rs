//! Tabular input abstractions.
//!
//! Expanders read their input through the [`ColumnSource`] trait: a table of
//! equally long, named columns whose cells are optional strings. A `None` cell
//! is a missing value and is treated like an empty string by the extractors.
//!
//! # Example
//!
//! ```rust
//! use column_expander::dataset::{ColumnSource, InMemoryTable};
//!
//! let table = InMemoryTable::new()
//!     .with_str_column("tags", ["a, b", "b, c"])
//!     .unwrap();
//!
//! assert_eq!(table.n_rows(), 2);
//! assert_eq!(table.column("tags").unwrap(), vec![Some("a, b"), Some("b, c")]);
//! assert!(table.column("missing").is_err());
//! ```

use crate::preprocessing::PreprocessingError;

pub mod memory;
pub use self::memory::InMemoryTable;

/// Column-addressable tabular data.
///
/// Row positions are always `0..n_rows()`; there is no label-based index.
pub trait ColumnSource {
    /// Number of rows in every column.
    fn n_rows(&self) -> usize;

    /// Borrow the cells of the named column.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::MissingColumn`] if no column has that name.
    fn column(&self, name: &str) -> Result<Vec<Option<&str>>, PreprocessingError>;

    /// Whether the table has a column with the given name.
    fn has_column(&self, name: &str) -> bool {
        self.column(name).is_ok()
    }
}
