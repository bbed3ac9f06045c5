//! Operator and field catalogs
//!
//! The operator catalog is a static declarative table: every operator a leaf
//! may use, the wire discriminator it serializes to, the field types it is
//! legal for, and the shape of value it takes. The field catalog is the
//! externally supplied list of field aliases and their data types.

mod field;
mod operator;

pub use field::{FieldCatalog, FieldDefinition};
pub use operator::{
    check_applicable, describe, describe_bean, operators_for, OperatorDescriptor, OperatorShape,
    OPERATORS,
};
