//! Declarative expander configuration.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::expansion::{ColumnExpander, HandleUnknown};
use crate::preprocessing::traits::AttributeExtractor;
use serde::{Deserialize, Serialize};

fn default_delim() -> String {
    "_".to_string()
}

/// Constructor settings of a column expander, loadable from JSON.
///
/// ```rust
/// use column_expander::preprocessing::{DictColumnExpander, ExpanderConfig};
///
/// let config = ExpanderConfig::from_json(r#"{"extraction_cols": ["attrs"], "delim": "="}"#).unwrap();
/// let expander: DictColumnExpander = config.build();
/// assert_eq!(expander.delim(), "=");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpanderConfig {
    pub extraction_cols: Vec<String>,
    #[serde(default = "default_delim")]
    pub delim: String,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
}

impl ExpanderConfig {
    pub fn new<I, S>(extraction_cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extraction_cols: extraction_cols.into_iter().map(Into::into).collect(),
            delim: default_delim(),
            handle_unknown: HandleUnknown::default(),
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, PreprocessingError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PreprocessingError::InvalidParameter(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PreprocessingError> {
        if self.extraction_cols.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "extraction_cols must name at least one column".to_string(),
            ));
        }
        if self.delim.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "delim must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build an unfitted expander with these settings.
    pub fn build<E: AttributeExtractor>(&self) -> ColumnExpander<E> {
        ColumnExpander::new(self.extraction_cols.iter().cloned())
            .with_delim(self.delim.clone())
            .with_handle_unknown(self.handle_unknown)
    }
}
