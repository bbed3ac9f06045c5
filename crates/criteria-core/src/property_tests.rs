//! Property tests for the condition tree
//!
//! Trees are generated through the model constructors and tree operations
//! only, the way an editor builds them.

use proptest::prelude::*;
use serde_json::Value;
use std::collections::HashSet;

use crate::catalog::{operators_for, OperatorShape, OPERATORS};
use crate::codec::{decode, encode};
use crate::condition::{Condition, Group, GroupOperator, Leaf, NodePath, RangeBound};
use crate::paths::extract_field_paths;
use crate::tree;
use crate::validator::{diagnose, is_complete};

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators
// ═══════════════════════════════════════════════════════════════════════════

/// Field types, including some the catalog does not know
fn field_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("String".to_string()),
        Just("Integer".to_string()),
        Just("LocalDate".to_string()),
        Just("Boolean".to_string()),
        Just("UUID".to_string()),
        "[A-Za-z]{1,12}",
    ]
}

fn field_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("age".to_string()),
        Just("name".to_string()),
        Just("status".to_string()),
        Just("created.at".to_string()),
    ]
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::String(String::new())),
        "[a-z]{1,8}".prop_map(Value::String),
        (-1000i64..1000).prop_map(Value::from),
        any::<bool>().prop_map(Value::Bool),
    ]
}

/// A leaf built by selecting a field, optionally an operator, then values
fn leaf_strategy() -> impl Strategy<Value = Leaf> {
    (
        field_name_strategy(),
        "[a-zA-Z.]{0,20}",
        prop::option::of(0..OPERATORS.len()),
        scalar_strategy(),
        scalar_strategy(),
    )
        .prop_map(|(field, type_tag, op_index, first, second)| {
            let mut leaf = Leaf::empty();
            leaf.select_field(field, type_tag);
            if let Some(index) = op_index {
                let op = &OPERATORS[index];
                leaf.select_operator(op, None);
                match op.shape {
                    OperatorShape::SingleValue => {
                        leaf.set_value(first, None);
                    }
                    OperatorShape::Range => {
                        leaf.set_bound(RangeBound::From, first, None);
                        leaf.set_bound(RangeBound::To, second, None);
                    }
                    OperatorShape::NoValue => {}
                }
            }
            leaf
        })
}

fn group_operator_strategy() -> impl Strategy<Value = GroupOperator> {
    prop_oneof![Just(GroupOperator::And), Just(GroupOperator::Or)]
}

fn tree_strategy() -> impl Strategy<Value = Condition> {
    let leaf = leaf_strategy().prop_map(Condition::Leaf);
    let node = leaf.prop_recursive(5, 48, 4, |inner| {
        (group_operator_strategy(), prop::collection::vec(inner, 0..4))
            .prop_map(|(operator, children)| Condition::Group(Group { operator, children }))
    });
    (group_operator_strategy(), prop::collection::vec(node, 0..4))
        .prop_map(|(operator, children)| Condition::Group(Group { operator, children }))
}

/// Paths of every leaf in the tree
fn leaf_paths(node: &Condition) -> Vec<NodePath> {
    let mut paths = Vec::new();
    let mut stack = vec![(node, NodePath::root())];
    while let Some((node, path)) = stack.pop() {
        match node {
            Condition::Leaf(_) => paths.push(path),
            Condition::Group(group) => {
                for (index, child) in group.children.iter().enumerate() {
                    stack.push((child, path.child(index)));
                }
            }
        }
    }
    paths
}

// ═══════════════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn operators_for_only_returns_applicable(field_type in field_type_strategy()) {
        for op in operators_for(&field_type) {
            prop_assert!(op.applicable_types.contains(&field_type.as_str()));
        }
    }

    #[test]
    fn encode_decode_round_trip(tree in tree_strategy()) {
        prop_assert_eq!(decode(&encode(&tree)), tree);
    }

    #[test]
    fn select_operator_is_idempotent(leaf in leaf_strategy(), op_index in 0..OPERATORS.len()) {
        let op = &OPERATORS[op_index];
        let mut once = leaf.clone();
        once.select_operator(op, None);
        let mut twice = once.clone();
        twice.select_operator(op, None);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn update_leaf_field_clears_operator(tree in tree_strategy(), field in "[a-z]{1,8}") {
        for path in leaf_paths(&tree) {
            let next = tree::update_leaf_field(&tree, &path, &field, "java.lang.String");
            let leaf = next.leaf(&path).unwrap();
            prop_assert_eq!(leaf.operation.as_str(), "");
            prop_assert_eq!(leaf.operator_bean.as_str(), "");
            prop_assert_eq!(leaf.field_name.as_str(), field.as_str());
        }
    }

    #[test]
    fn extracted_paths_are_distinct_and_not_aliases(
        tree in tree_strategy(),
        aliases in prop::collection::hash_set(field_name_strategy(), 0..3),
    ) {
        let paths = extract_field_paths(&tree, &aliases);
        let unique: HashSet<_> = paths.iter().collect();
        prop_assert_eq!(unique.len(), paths.len());
        for path in &paths {
            prop_assert!(!aliases.contains(path));
            prop_assert!(!path.is_empty());
        }
    }

    #[test]
    fn diagnose_agrees_with_is_complete(tree in tree_strategy()) {
        prop_assert_eq!(diagnose(&tree).is_empty(), is_complete(&tree));
    }

    #[test]
    fn tree_ops_never_modify_input(tree in tree_strategy()) {
        let before = tree.clone();
        let _ = tree::remove_child(&tree, &NodePath::root(), 0);
        let _ = tree::insert_child(&tree, &NodePath::root(), Condition::Leaf(Leaf::empty()), None);
        let _ = tree::set_group_operator(&tree, &NodePath::root(), GroupOperator::Or);
        prop_assert_eq!(tree, before);
    }
}
