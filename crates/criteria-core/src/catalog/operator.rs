//! Static operator table

use crate::error::{CoreError, Result};
use serde::Serialize;
use std::fmt;

/// Shape of the value an operator takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperatorShape {
    /// One value (`age > 18`)
    SingleValue,
    /// A from/to pair (`age BETWEEN 18 AND 65`)
    Range,
    /// No value (`email IS NULL`)
    NoValue,
}

impl fmt::Display for OperatorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorShape::SingleValue => f.write_str("single-value"),
            OperatorShape::Range => f.write_str("range"),
            OperatorShape::NoValue => f.write_str("no-value"),
        }
    }
}

/// One row of the operator table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorDescriptor {
    /// Wire discriminator written as `@bean`
    pub wire_bean: &'static str,
    /// Operator key written as `operation`
    pub key: &'static str,
    /// Human readable label
    pub label: &'static str,
    /// Short field type names this operator is legal for
    pub applicable_types: &'static [&'static str],
    pub shape: OperatorShape,
}

impl OperatorDescriptor {
    /// Returns true if this operator is legal for `field_type`
    pub fn applies_to(&self, field_type: &str) -> bool {
        self.applicable_types.contains(&field_type)
    }
}

const ALL_TYPES: &[&str] = &[
    "String",
    "Character",
    "Integer",
    "Long",
    "Short",
    "Byte",
    "Double",
    "Float",
    "BigDecimal",
    "BigInteger",
    "Boolean",
    "LocalDate",
    "LocalDateTime",
    "LocalTime",
    "ZonedDateTime",
    "Date",
    "UUID",
];

const ORDERED_TYPES: &[&str] = &[
    "String",
    "Integer",
    "Long",
    "Short",
    "Byte",
    "Double",
    "Float",
    "BigDecimal",
    "BigInteger",
    "LocalDate",
    "LocalDateTime",
    "LocalTime",
    "ZonedDateTime",
    "Date",
];

const RANGE_TYPES: &[&str] = &[
    "Integer",
    "Long",
    "Short",
    "Byte",
    "Double",
    "Float",
    "BigDecimal",
    "BigInteger",
    "LocalDate",
    "LocalDateTime",
    "LocalTime",
    "ZonedDateTime",
    "Date",
];

const TEXT_TYPES: &[&str] = &["String", "Character"];

/// Every operator, in display order
pub static OPERATORS: &[OperatorDescriptor] = &[
    OperatorDescriptor {
        wire_bean: "criteria.condition.Equals",
        key: "EQUALS",
        label: "equals",
        applicable_types: ALL_TYPES,
        shape: OperatorShape::SingleValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.NotEquals",
        key: "NOT_EQUAL",
        label: "not equal",
        applicable_types: ALL_TYPES,
        shape: OperatorShape::SingleValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.IEquals",
        key: "IEQUALS",
        label: "equals (ignore case)",
        applicable_types: TEXT_TYPES,
        shape: OperatorShape::SingleValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.INotEquals",
        key: "INOT_EQUAL",
        label: "not equal (ignore case)",
        applicable_types: TEXT_TYPES,
        shape: OperatorShape::SingleValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.GreaterThan",
        key: "GREATER_THAN",
        label: "greater than",
        applicable_types: ORDERED_TYPES,
        shape: OperatorShape::SingleValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.GreaterOrEqual",
        key: "GREATER_OR_EQUAL",
        label: "greater or equal",
        applicable_types: ORDERED_TYPES,
        shape: OperatorShape::SingleValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.LessThan",
        key: "LESS_THAN",
        label: "less than",
        applicable_types: ORDERED_TYPES,
        shape: OperatorShape::SingleValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.LessOrEqual",
        key: "LESS_OR_EQUAL",
        label: "less or equal",
        applicable_types: ORDERED_TYPES,
        shape: OperatorShape::SingleValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.Between",
        key: "BETWEEN",
        label: "between",
        applicable_types: RANGE_TYPES,
        shape: OperatorShape::Range,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.BetweenInclusive",
        key: "BETWEEN_INCLUSIVE",
        label: "between (inclusive)",
        applicable_types: RANGE_TYPES,
        shape: OperatorShape::Range,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.Contains",
        key: "CONTAINS",
        label: "contains",
        applicable_types: TEXT_TYPES,
        shape: OperatorShape::SingleValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.NotContains",
        key: "NOT_CONTAINS",
        label: "does not contain",
        applicable_types: TEXT_TYPES,
        shape: OperatorShape::SingleValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.StartsWith",
        key: "STARTS_WITH",
        label: "starts with",
        applicable_types: TEXT_TYPES,
        shape: OperatorShape::SingleValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.EndsWith",
        key: "ENDS_WITH",
        label: "ends with",
        applicable_types: TEXT_TYPES,
        shape: OperatorShape::SingleValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.Like",
        key: "LIKE",
        label: "like",
        applicable_types: TEXT_TYPES,
        shape: OperatorShape::SingleValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.IsNull",
        key: "IS_NULL",
        label: "is null",
        applicable_types: ALL_TYPES,
        shape: OperatorShape::NoValue,
    },
    OperatorDescriptor {
        wire_bean: "criteria.condition.NotNull",
        key: "NOT_NULL",
        label: "is not null",
        applicable_types: ALL_TYPES,
        shape: OperatorShape::NoValue,
    },
];

/// Operators legal for `field_type`, in table order.
///
/// An unknown type yields an empty list.
pub fn operators_for(field_type: &str) -> Vec<&'static OperatorDescriptor> {
    OPERATORS
        .iter()
        .filter(|op| op.applies_to(field_type))
        .collect()
}

/// Look up an operator by key
pub fn describe(key: &str) -> Option<&'static OperatorDescriptor> {
    OPERATORS.iter().find(|op| op.key == key)
}

/// Look up an operator by wire discriminator
pub fn describe_bean(wire_bean: &str) -> Option<&'static OperatorDescriptor> {
    OPERATORS.iter().find(|op| op.wire_bean == wire_bean)
}

/// Look up an operator and check it is legal for `field_type`
pub fn check_applicable(key: &str, field_type: &str) -> Result<&'static OperatorDescriptor> {
    let op = describe(key).ok_or_else(|| CoreError::UnknownOperator(key.to_string()))?;
    if op.applies_to(field_type) {
        Ok(op)
    } else {
        Err(CoreError::InapplicableOperator {
            operator: key.to_string(),
            field_type: field_type.to_string(),
        })
    }
}
