//! Criteria Core - Condition tree model for filter and criteria builders
//!
//! This crate provides the pieces every criteria editor shares:
//! - Condition model (leaf predicates and AND/OR groups)
//! - Operator catalog (which operators are legal for which field types)
//! - Tree operations (pure, path-addressed edits)
//! - Field path extraction and completeness validation
//! - Wire codec (discriminated JSON)

pub mod catalog;
pub mod codec;
pub mod condition;
pub mod error;
pub mod paths;
pub mod tree;
pub mod validator;

#[cfg(test)]
mod property_tests;

// Re-export commonly used types
pub use catalog::{FieldCatalog, FieldDefinition, OperatorDescriptor, OperatorShape};
pub use codec::{decode, encode, WireCodec, GROUP_BEAN};
pub use condition::{
    empty_group, empty_leaf, Condition, Group, GroupOperator, Leaf, NodePath, RangeBound,
    TypedValue, ValueSlot,
};
pub use error::{CoreError, Result};
pub use paths::extract_field_paths;
pub use validator::{diagnose, is_complete, Diagnostic, Issue};
