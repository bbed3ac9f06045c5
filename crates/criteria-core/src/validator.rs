//! Completeness validation
//!
//! A tree may only be submitted once every leaf names a field, an operator,
//! and the value(s) that operator requires, and every group has at least one
//! child. Incompleteness is not an error; callers show it as a blocking
//! validation message.

use crate::catalog::{describe, OperatorShape};
use crate::condition::{Condition, Leaf, NodePath, RangeBound, ValueSlot};
use std::fmt;
use thiserror::Error;

/// Why a node is incomplete
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    #[error("group has no conditions")]
    EmptyGroup,

    #[error("no field selected")]
    MissingField,

    #[error("no operator selected")]
    MissingOperator,

    #[error("value is required")]
    MissingValue,

    #[error("'{bound}' value is required")]
    MissingRangeBound { bound: RangeBound },

    #[error("operator '{operation}' expects a {expected} value")]
    ShapeMismatch {
        operation: String,
        expected: OperatorShape,
    },
}

/// An issue together with the node it was found at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: NodePath,
    pub issue: Issue,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.issue)
    }
}

/// Returns true if `node` can be submitted
pub fn is_complete(node: &Condition) -> bool {
    match node {
        Condition::Leaf(leaf) => leaf_issues(leaf).is_empty(),
        Condition::Group(group) => {
            !group.children.is_empty() && group.children.iter().all(is_complete)
        }
    }
}

/// Every reason `node` is incomplete, in depth-first order.
///
/// Empty exactly when [`is_complete`] is true.
pub fn diagnose(node: &Condition) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut stack = vec![(node, NodePath::root())];

    while let Some((node, path)) = stack.pop() {
        match node {
            Condition::Leaf(leaf) => {
                diagnostics.extend(leaf_issues(leaf).into_iter().map(|issue| Diagnostic {
                    path: path.clone(),
                    issue,
                }));
            }
            Condition::Group(group) => {
                if group.children.is_empty() {
                    diagnostics.push(Diagnostic {
                        path: path.clone(),
                        issue: Issue::EmptyGroup,
                    });
                }
                for (index, child) in group.children.iter().enumerate().rev() {
                    stack.push((child, path.child(index)));
                }
            }
        }
    }

    diagnostics
}

fn leaf_issues(leaf: &Leaf) -> Vec<Issue> {
    let mut issues = Vec::new();
    if !leaf.has_field() {
        issues.push(Issue::MissingField);
    }
    if !leaf.has_operator() {
        issues.push(Issue::MissingOperator);
        return issues;
    }

    // Unknown operator keys fall back to whatever the leaf stores.
    let expected = describe(&leaf.operation)
        .map(|op| op.shape)
        .unwrap_or_else(|| leaf.slot.shape());

    match (expected, &leaf.slot) {
        (OperatorShape::NoValue, _) => {}
        (OperatorShape::SingleValue, ValueSlot::Single(value)) => {
            if value.is_blank() {
                issues.push(Issue::MissingValue);
            }
        }
        (OperatorShape::Range, ValueSlot::Range { from, to }) => {
            if from.is_blank() {
                issues.push(Issue::MissingRangeBound {
                    bound: RangeBound::From,
                });
            }
            if to.is_blank() {
                issues.push(Issue::MissingRangeBound {
                    bound: RangeBound::To,
                });
            }
        }
        (expected, _) => issues.push(Issue::ShapeMismatch {
            operation: leaf.operation.clone(),
            expected,
        }),
    }

    issues
}
