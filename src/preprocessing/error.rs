//! Error types for column expansion.

use thiserror::Error;

/// Error type for fitting and transforming compressed columns.
#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// `transform` or a fitted accessor was called before `fit`.
    #[error("Not fitted: transformer must be fit before use")]
    NotFitted,
    /// A configured extraction column is absent from the supplied table.
    #[error("Missing column: `{column}`")]
    MissingColumn { column: String },
    /// A cell could not be parsed by the extraction strategy.
    #[error("Malformed value in column `{column}` at row {row}: {reason}")]
    MalformedValue {
        column: String,
        row: usize,
        reason: String,
    },
    /// An attribute unseen at fit time, raised only under `HandleUnknown::Error`.
    #[error("Unknown attribute `{name}` in column `{column}`")]
    UnknownAttribute { column: String, name: String },
    /// Shape mismatch between expected and actual table dimensions.
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape { expected: String, got: String },
    /// Invalid constructor or configuration value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl PreprocessingError {
    pub(crate) fn missing_column(column: &str) -> Self {
        PreprocessingError::MissingColumn {
            column: column.to_string(),
        }
    }
}

impl From<std::io::Error> for PreprocessingError {
    fn from(err: std::io::Error) -> Self {
        PreprocessingError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_fitted() {
        let err = PreprocessingError::NotFitted;
        assert!(err.to_string().contains("Not fitted"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = PreprocessingError::missing_column("tags");
        assert_eq!(err.to_string(), "Missing column: `tags`");
    }

    #[test]
    fn test_error_display_malformed_value() {
        let err = PreprocessingError::MalformedValue {
            column: "attrs".to_string(),
            row: 3,
            reason: "expected value".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("`attrs`"));
        assert!(msg.contains("row 3"));
    }

    #[test]
    fn test_error_display_unknown_attribute() {
        let err = PreprocessingError::UnknownAttribute {
            column: "tags".to_string(),
            name: "tags_z".to_string(),
        };
        assert!(err.to_string().contains("tags_z"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: PreprocessingError = io_err.into();
        assert!(matches!(err, PreprocessingError::IoError(_)));
    }

    #[test]
    fn test_error_from_bincode_error() {
        let bad_bytes: &[u8] = &[0xff, 0xff, 0xff, 0xff];
        let bincode_result: Result<String, bincode::Error> = bincode::deserialize(bad_bytes);
        if let Err(e) = bincode_result {
            let err: PreprocessingError = e.into();
            assert!(matches!(err, PreprocessingError::SerializationError(_)));
        }
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PreprocessingError::InvalidParameter("test".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
