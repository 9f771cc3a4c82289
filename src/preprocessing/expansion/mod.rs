//! Column expansion transformers.
//!
//! A compressed column packs several categorical facts into one cell. The
//! expanders in this module learn the vocabulary of such columns and turn
//! them into one binary feature per attribute.
//!
//! ## ListColumnExpander
//! Shallow extraction from comma-delimited strings.
//!
//! ```ignore
//! // col: ["a, b", "b, c"]
//! // features: col_a, col_b, col_c
//! // "a, c" -> [1, 0, 1]
//! ```
//!
//! ## DictColumnExpander
//! Deep extraction from JSON mappings; a nested mapping contributes its keys.
//!
//! ```ignore
//! // attrs: [{"color": {"red": 1, "blue": 2}}]
//! // features: color_red, color_blue
//! ```
//!
//! # Design Notes
//!
//! - Vocabularies are insertion-ordered, so feature order follows the order
//!   attributes are first seen and repeated fits on the same rows agree.
//! - The output columns are fixed at fit time. Unseen attributes are ignored
//!   by default and seen-but-absent attributes produce all-zero columns.
//! - `drop_first` removes the first-seen value of every group (a list column,
//!   or one outer key of a dict column).

mod base;
mod config;
pub mod dict;
mod list;
mod vocabulary;

pub use base::{ColumnExpander, ExpanderParams};
pub use config::ExpanderConfig;
pub use dict::{DictColumnExpander, DictExtractor, EMPTY_GROUP, EMPTY_VALUE};
pub use list::{ListColumnExpander, ListExtractor};
pub use vocabulary::{AttributeSet, Vocabulary};

/// Strategy for handling attributes unseen at fit time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    /// Skip unseen attributes; their rows stay zero in that region.
    #[default]
    Ignore,
    /// Fail the transform on the first unseen attribute.
    Error,
}

/// Per-call options for `transform` and `fit_transform`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Use the slim column list (one column fewer per group).
    pub drop_first: bool,
    /// Emit progress events roughly every 10% of rows.
    pub verbose: bool,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drop_first(mut self, drop_first: bool) -> Self {
        self.drop_first = drop_first;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
