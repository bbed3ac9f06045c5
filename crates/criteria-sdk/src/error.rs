//! SDK error types

use criteria_core::{CoreError, Diagnostic, NodePath};
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Field catalog could not be loaded
    #[error("Catalog error: {0}")]
    CatalogError(String),

    /// Core error (unknown field, inapplicable operator, bad JSON)
    #[error("{0}")]
    Core(#[from] CoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The filter cannot be submitted yet
    #[error("Filter is incomplete: {}", format_diagnostics(.0))]
    Incomplete(Vec<Diagnostic>),

    /// Operator chosen before a field
    #[error("No field selected at {0}")]
    NoFieldSelected(NodePath),
}

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
