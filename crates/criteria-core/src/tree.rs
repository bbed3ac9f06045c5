//! Path-addressed tree edits
//!
//! Every function takes the current tree by reference and returns a new one;
//! the input is never modified. A path that does not resolve, or resolves to
//! the wrong kind of node, leaves the tree unchanged. Stale paths are normal
//! in an interactive editor, so these are logged at debug level and otherwise
//! ignored.

use crate::catalog::OperatorDescriptor;
use crate::condition::{Condition, Group, GroupOperator, NodePath, RangeBound};
use serde_json::Value;

/// Clone `tree`, apply `edit` to the node at `path`, and keep the result
/// only if the edit reports success.
fn apply<F>(tree: &Condition, path: &NodePath, op: &str, edit: F) -> Condition
where
    F: FnOnce(&mut Condition) -> bool,
{
    let mut next = tree.clone();
    let applied = next.get_mut(path).map(edit).unwrap_or(false);
    if applied {
        next
    } else {
        log::debug!("{} at {} did not apply, tree unchanged", op, path);
        tree.clone()
    }
}

/// Replace the operator of the group at `path`
pub fn set_group_operator(tree: &Condition, path: &NodePath, operator: GroupOperator) -> Condition {
    apply(tree, path, "set_group_operator", |node| match node {
        Condition::Group(group) => {
            group.operator = operator;
            true
        }
        Condition::Leaf(_) => false,
    })
}

/// Position at which [`insert_child`] places `child` in `group`.
///
/// `index` defaults to the end and is clamped to the child count. Leaves are
/// kept ahead of nested groups: once the group has a nested group, a new leaf
/// goes to the front of the group unless an explicit `index` places it
/// earlier than the first nested group.
///
/// Front, not "just before the first group": adding a condition to
/// `[leaf, group]` yields `[new, leaf, group]`, the order the filter screen
/// shows new rows in. For `[l1, l2, group]` the new leaf is also at index 0.
pub fn insertion_index(group: &Group, child: &Condition, index: Option<usize>) -> usize {
    let len = group.children.len();
    match (child, group.first_group_index()) {
        (Condition::Leaf(_), Some(first_group)) => index.unwrap_or(0).min(first_group),
        _ => index.unwrap_or(len).min(len),
    }
}

/// Insert `child` into the group at `group_path`, see [`insertion_index`]
pub fn insert_child(
    tree: &Condition,
    group_path: &NodePath,
    child: Condition,
    index: Option<usize>,
) -> Condition {
    apply(tree, group_path, "insert_child", |node| match node {
        Condition::Group(group) => {
            let at = insertion_index(group, &child, index);
            group.children.insert(at, child);
            true
        }
        Condition::Leaf(_) => false,
    })
}

/// Remove the child at `index` of the group at `group_path`.
///
/// Removing the last child leaves an empty group.
pub fn remove_child(tree: &Condition, group_path: &NodePath, index: usize) -> Condition {
    apply(tree, group_path, "remove_child", |node| match node {
        Condition::Group(group) if index < group.children.len() => {
            group.children.remove(index);
            true
        }
        _ => false,
    })
}

/// Replace the node at `path` (the root included) with `node`
pub fn replace_child(tree: &Condition, path: &NodePath, node: Condition) -> Condition {
    apply(tree, path, "replace_child", |target| {
        *target = node;
        true
    })
}

/// Select a new field for the leaf at `path`.
///
/// Clears the operator and resets the value to an empty one tagged with
/// `field_type_tag`.
pub fn update_leaf_field(
    tree: &Condition,
    path: &NodePath,
    field_name: &str,
    field_type_tag: &str,
) -> Condition {
    apply(tree, path, "update_leaf_field", |node| match node {
        Condition::Leaf(leaf) => {
            leaf.select_field(field_name, field_type_tag);
            true
        }
        Condition::Group(_) => false,
    })
}

/// Select an operator for the leaf at `path`, reshaping its value storage.
///
/// The new values are tagged with `type_tag`, or with the tag the leaf
/// already stores when `None`. After a no-value operator the leaf stores no
/// tag, so pass the field type to keep it.
pub fn update_leaf_operator(
    tree: &Condition,
    path: &NodePath,
    operator: &OperatorDescriptor,
    type_tag: Option<&str>,
) -> Condition {
    apply(tree, path, "update_leaf_operator", |node| match node {
        Condition::Leaf(leaf) => {
            leaf.select_operator(operator, type_tag);
            true
        }
        Condition::Group(_) => false,
    })
}

/// Set the single value of the leaf at `path`.
///
/// The type tag is kept unless `type_tag` is given.
pub fn update_leaf_value(
    tree: &Condition,
    path: &NodePath,
    value: Value,
    type_tag: Option<&str>,
) -> Condition {
    apply(tree, path, "update_leaf_value", |node| match node {
        Condition::Leaf(leaf) => leaf.set_value(value, type_tag),
        Condition::Group(_) => false,
    })
}

/// Set one end of the range of the leaf at `path`.
///
/// The type tag is kept unless `type_tag` is given.
pub fn update_leaf_range(
    tree: &Condition,
    path: &NodePath,
    bound: RangeBound,
    value: Value,
    type_tag: Option<&str>,
) -> Condition {
    apply(tree, path, "update_leaf_range", |node| match node {
        Condition::Leaf(leaf) => leaf.set_bound(bound, value, type_tag),
        Condition::Group(_) => false,
    })
}
