//! Criteria SDK
//!
//! High-level API for building filter criteria: an edit session that owns the
//! condition tree, checks edits against the field catalog, and produces the
//! payload sent to the backend.

pub mod builder;
pub mod config;
pub mod editor;
pub mod error;

// Re-export main types
pub use builder::FilterEditorBuilder;
pub use config::{load_catalog, EditorConfig};
pub use editor::{FilterEditor, Removal};
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use criteria_core::{
    Condition, Diagnostic, FieldCatalog, FieldDefinition, GroupOperator, NodePath,
    OperatorDescriptor, RangeBound,
};
