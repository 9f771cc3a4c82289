//! Data preprocessing transformers for compressed categorical columns.
//!
//! # Design Philosophy
//!
//! - **Fixed output layout**: the feature columns are decided at fit time and
//!   every later transform is aligned to them.
//! - **Pluggable extraction**: one [`ColumnExpander`] drives fitting and
//!   transforming; an [`AttributeExtractor`] strategy decides how a cell is
//!   split into attributes.
//! - **Serializable**: fitted expanders can be saved and loaded.
//! - **sklearn-compatible**: `fit`, `transform`, `fit_transform` and
//!   `get_feature_names` behave like their scikit-learn namesakes.
//!
//! # Available Transformers
//!
//! - [`ListColumnExpander`]: comma-delimited category lists
//! - [`DictColumnExpander`]: JSON mappings with one level of nesting
//!
//! # Example
//!
//! ```rust
//! use column_expander::dataset::InMemoryTable;
//! use column_expander::preprocessing::{ListColumnExpander, TransformOptions};
//!
//! let train = InMemoryTable::new()
//!     .with_str_column("col", ["a, b", "b, c"])
//!     .unwrap();
//!
//! let mut expander = ListColumnExpander::new(["col"]);
//! let train_features = expander
//!     .fit_transform(&train, None, TransformOptions::default())
//!     .unwrap();
//! assert_eq!(train_features.shape(), (2, 3));
//!
//! let test = InMemoryTable::new().with_str_column("col", ["a, c"]).unwrap();
//! let test_features = expander.transform(&test, TransformOptions::default()).unwrap();
//! assert_eq!(test_features.to_dense(), vec![vec![1.0, 0.0, 1.0]]);
//! ```

pub mod error;
pub mod expansion;
pub mod traits;

// Re-export main types
pub use error::PreprocessingError;
pub use expansion::{
    AttributeSet, ColumnExpander, DictColumnExpander, DictExtractor, ExpanderConfig,
    ExpanderParams, HandleUnknown, ListColumnExpander, ListExtractor, TransformOptions,
    Vocabulary,
};
pub use traits::{create_column_names, AttributeExtractor, ColumnNames, Segment};
