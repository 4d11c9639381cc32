use crate::models::ColumnKey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Missing column: {0}")]
    MissingColumn(ColumnKey),

    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Lookup failures point at an identifier mismatch between caller and data,
    /// everything else is a malformed input or configuration.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, CoreError::MissingColumn(_))
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
