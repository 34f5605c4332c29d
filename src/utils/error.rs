use thiserror::Error;

use crate::domain::model::ValueKind;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("XML parsing error: {0}")]
    XmlError(#[from] xml::reader::Error),

    #[error("Unsupported top-level JSON type: {found} (expected {expected})")]
    UnsupportedRoot {
        found: ValueKind,
        expected: &'static str,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, EtlError>;
