//! # column-expander
//!
//! One-hot expansion of "compressed" categorical columns: cells that pack
//! several categories into a comma-delimited string, or several attributes
//! into a JSON mapping.
//!
//! ## Core Design Principles
//!
//! - **Fit/transform alignment**: the output columns are fixed at fit time;
//!   unseen attributes never add columns.
//! - **Deterministic layout**: vocabularies keep first-seen order, so the
//!   feature names of a fit are reproducible.
//! - **Strategy seam**: list-style and dict-style columns share one expander
//!   and differ only in their [`AttributeExtractor`](preprocessing::AttributeExtractor).
//! - **Sparse output**: results are [`LilMatrix`] values that can be read
//!   back densely or as an `ndarray` matrix.
//!
//! ## Quick Start
//!
//! ```rust
//! use column_expander::dataset::InMemoryTable;
//! use column_expander::preprocessing::{DictColumnExpander, TransformOptions};
//!
//! let train = InMemoryTable::new()
//!     .with_str_column("attrs", [r#"{"size": "large"}"#, r#"{"size": "small"}"#])
//!     .unwrap();
//!
//! let mut expander = DictColumnExpander::new(["attrs"]);
//! expander.fit(&train, None).unwrap();
//!
//! let out = expander
//!     .transform(&train, TransformOptions::new().drop_first(true))
//!     .unwrap();
//! assert_eq!(expander.get_feature_names(true).unwrap(), &["size_small"]);
//! assert_eq!(out.to_dense(), vec![vec![0.0], vec![1.0]]);
//! ```
//!
//! ## Module Structure
//!
//! - `dataset` — column-addressable tabular input
//! - `preprocessing` — the column expanders and their extraction strategies
//! - `sparse` — list-of-lists sparse output matrix
//! - `serialization` — byte-level persistence of fitted parameters

/// Tabular input abstractions.
pub mod dataset;

/// Column expansion transformers.
pub mod preprocessing;

/// Persistence of fitted parameters.
pub mod serialization;

/// Sparse output matrix.
pub mod sparse;

pub use dataset::{ColumnSource, InMemoryTable};
pub use preprocessing::{
    DictColumnExpander, ListColumnExpander, PreprocessingError, TransformOptions,
};
pub use sparse::LilMatrix;
