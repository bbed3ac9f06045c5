//! Error types for Criteria Core

use thiserror::Error;

/// Core error type
///
/// Structural problems in a condition tree are never errors: tree edits
/// degrade to no-ops and decoding degrades to empty nodes. This type only
/// covers explicit lookups and raw text parsing.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Operator '{operator}' is not applicable to field type '{field_type}'")]
    InapplicableOperator { operator: String, field_type: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
