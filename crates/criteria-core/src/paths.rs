//! Field path extraction
//!
//! Collects the field names a condition tree references so the caller can
//! fetch their column definitions before rendering the tree. Aliases are
//! computed columns the caller already knows about and are skipped.

use crate::condition::Condition;
use std::collections::HashSet;

/// Distinct field paths referenced by the leaves of `node`, in depth-first
/// first-occurrence order.
///
/// Empty field names and members of `excluded_aliases` are skipped. The walk
/// uses an explicit stack, so nesting depth is bounded only by memory.
pub fn extract_field_paths(node: &Condition, excluded_aliases: &HashSet<String>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut paths = Vec::new();

    for leaf in node.leaves() {
        let field = leaf.field_name.as_str();
        if field.is_empty() || excluded_aliases.contains(field) {
            continue;
        }
        if seen.insert(field) {
            paths.push(field.to_string());
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::describe;
    use crate::condition::{Group, GroupOperator, Leaf, TypedValue};

    fn leaf(field: &str, op: &str, value: &str) -> Leaf {
        Leaf::single(field, describe(op).unwrap(), TypedValue::new("String", value))
    }

    fn nested() -> Condition {
        Condition::Group(
            Group::new(GroupOperator::And)
                .with_child(leaf("age", "GREATER_THAN", "18"))
                .with_child(
                    Group::new(GroupOperator::Or)
                        .with_child(leaf("name", "EQUALS", "x"))
                        .with_child(leaf("name", "EQUALS", "y")),
                ),
        )
    }

    #[test]
    fn test_first_occurrence_order() {
        let paths = extract_field_paths(&nested(), &HashSet::new());
        assert_eq!(paths, vec!["age", "name"]);
    }

    #[test]
    fn test_excludes_aliases() {
        let aliases: HashSet<String> = ["age".to_string()].into_iter().collect();
        assert_eq!(extract_field_paths(&nested(), &aliases), vec!["name"]);
    }

    #[test]
    fn test_skips_unset_fields() {
        let tree = Condition::Group(Group::empty());
        assert!(extract_field_paths(&tree, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_deep_nesting() {
        let mut tree = Group::new(GroupOperator::And).with_child(leaf("level0", "EQUALS", "a"));
        for depth in 1..=64 {
            tree = Group::new(GroupOperator::Or)
                .with_child(leaf(&format!("level{}", depth), "EQUALS", "a"))
                .with_child(tree);
        }
        let paths = extract_field_paths(&Condition::Group(tree), &HashSet::new());
        assert_eq!(paths.len(), 65);
        assert_eq!(paths[0], "level64");
        assert_eq!(paths[64], "level0");
    }
}
