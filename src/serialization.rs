//! On-disk format of fitted expander parameters.
//!
//! A parameter file is a 4-byte magic tag, one format version byte, then the
//! bincode encoding of [`ExpanderParams`]. The header lets `load_from_file`
//! reject foreign or truncated files with a clear error instead of decoding
//! garbage into a vocabulary.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::expansion::ExpanderParams;

/// Leading bytes of every parameter file.
pub const MAGIC: &[u8; 4] = b"CXPR";

/// Current layout of the encoded parameters.
pub const FORMAT_VERSION: u8 = 1;

const HEADER_LEN: usize = MAGIC.len() + 1;

/// Parameters that can be written to and read back from a parameter file.
pub trait SerializableParams: Sized {
    /// Encode the parameters, header included.
    fn to_bytes(&self) -> Result<Vec<u8>, PreprocessingError>;

    /// Decode parameters previously produced by [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    /// - [`PreprocessingError::SerializationError`] if the header is missing,
    ///   the version is unsupported, or the payload does not decode
    fn from_bytes(bytes: &[u8]) -> Result<Self, PreprocessingError>;
}

impl SerializableParams for ExpanderParams {
    fn to_bytes(&self) -> Result<Vec<u8>, PreprocessingError> {
        let payload = bincode::serialize(self)?;
        let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
        bytes.extend_from_slice(MAGIC);
        bytes.push(FORMAT_VERSION);
        bytes.extend(payload);
        Ok(bytes)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, PreprocessingError> {
        let payload = bytes
            .strip_prefix(MAGIC.as_slice())
            .ok_or_else(|| {
                PreprocessingError::SerializationError(
                    "not a column expander parameter file".to_string(),
                )
            })?;
        match payload.split_first() {
            Some((&FORMAT_VERSION, rest)) => Ok(bincode::deserialize(rest)?),
            Some((version, _)) => Err(PreprocessingError::SerializationError(format!(
                "unsupported parameter format version {}",
                version
            ))),
            None => Err(PreprocessingError::SerializationError(
                "parameter file ends after the header".to_string(),
            )),
        }
    }
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::SerializationError(err.to_string())
    }
}
