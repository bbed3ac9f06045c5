//! Condition node types

use super::path::NodePath;
use crate::catalog::{OperatorDescriptor, OperatorShape};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Boolean combinator of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupOperator {
    /// Every child must hold
    #[default]
    And,
    /// At least one child must hold
    Or,
}

impl GroupOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupOperator::And => "AND",
            GroupOperator::Or => "OR",
        }
    }

    /// Parse `AND` / `OR`, ignoring ASCII case
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("AND") {
            Some(GroupOperator::And)
        } else if s.eq_ignore_ascii_case("OR") {
            Some(GroupOperator::Or)
        } else {
            None
        }
    }
}

impl fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payload tagged with its wire type (e.g. `java.lang.Integer`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedValue {
    #[serde(rename = "@type")]
    pub type_tag: String,
    pub value: Value,
}

impl TypedValue {
    pub fn new(type_tag: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            type_tag: type_tag.into(),
            value: value.into(),
        }
    }

    /// Empty string value with no type tag
    pub fn empty() -> Self {
        Self::typed_empty("")
    }

    /// Empty string value carrying `type_tag`
    pub fn typed_empty(type_tag: impl Into<String>) -> Self {
        Self::new(type_tag, Value::String(String::new()))
    }

    /// True when no usable payload has been entered.
    ///
    /// `null`, `""` and `[]` are blank; `0` and `false` are real values.
    pub fn is_blank(&self) -> bool {
        match &self.value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }
}

/// Which end of a range a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeBound {
    From,
    To,
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBound::From => f.write_str("from"),
            RangeBound::To => f.write_str("to"),
        }
    }
}

/// Value storage of a leaf.
///
/// A leaf holds a single value, a from/to pair, or nothing, never a mix.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValueSlot {
    /// No payload (`IS_NULL` style operators)
    #[default]
    None,
    /// One payload
    Single(TypedValue),
    /// Lower and upper bound
    Range { from: TypedValue, to: TypedValue },
}

impl ValueSlot {
    /// Operator shape this storage corresponds to
    pub fn shape(&self) -> OperatorShape {
        match self {
            ValueSlot::None => OperatorShape::NoValue,
            ValueSlot::Single(_) => OperatorShape::SingleValue,
            ValueSlot::Range { .. } => OperatorShape::Range,
        }
    }

    pub fn value(&self) -> Option<&TypedValue> {
        match self {
            ValueSlot::Single(value) => Some(value),
            _ => None,
        }
    }

    pub fn bound(&self, bound: RangeBound) -> Option<&TypedValue> {
        match (self, bound) {
            (ValueSlot::Range { from, .. }, RangeBound::From) => Some(from),
            (ValueSlot::Range { to, .. }, RangeBound::To) => Some(to),
            _ => None,
        }
    }

    /// Empty storage of the given shape, tagged with `type_tag`
    pub fn empty_for(shape: OperatorShape, type_tag: &str) -> Self {
        match shape {
            OperatorShape::NoValue => ValueSlot::None,
            OperatorShape::SingleValue => ValueSlot::Single(TypedValue::typed_empty(type_tag)),
            OperatorShape::Range => ValueSlot::Range {
                from: TypedValue::typed_empty(type_tag),
                to: TypedValue::typed_empty(type_tag),
            },
        }
    }

    /// First non-empty type tag stored in the slot
    pub fn type_tag(&self) -> &str {
        match self {
            ValueSlot::None => "",
            ValueSlot::Single(value) => &value.type_tag,
            ValueSlot::Range { from, to } => {
                if from.type_tag.is_empty() {
                    &to.type_tag
                } else {
                    &from.type_tag
                }
            }
        }
    }
}

/// A predicate on a single field
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// Wire discriminator of the operator (empty = unset)
    pub operator_bean: String,
    /// Dotted path into the field catalog (empty = unset)
    pub field_name: String,
    /// Operator key (empty = unset)
    pub operation: String,
    pub slot: ValueSlot,
}

impl Default for Leaf {
    fn default() -> Self {
        Self::empty()
    }
}

impl Leaf {
    /// Leaf with every field unset and an empty single value
    pub fn empty() -> Self {
        Self {
            operator_bean: String::new(),
            field_name: String::new(),
            operation: String::new(),
            slot: ValueSlot::Single(TypedValue::empty()),
        }
    }

    /// Single-value leaf, e.g. `age > 18`
    pub fn single(
        field_name: impl Into<String>,
        operator: &OperatorDescriptor,
        value: TypedValue,
    ) -> Self {
        Self::with_slot(field_name, operator, ValueSlot::Single(value))
    }

    /// Range leaf, e.g. `age BETWEEN 18 AND 65`
    pub fn range(
        field_name: impl Into<String>,
        operator: &OperatorDescriptor,
        from: TypedValue,
        to: TypedValue,
    ) -> Self {
        Self::with_slot(field_name, operator, ValueSlot::Range { from, to })
    }

    /// Leaf without payload, e.g. `email IS NULL`
    pub fn no_value(field_name: impl Into<String>, operator: &OperatorDescriptor) -> Self {
        Self::with_slot(field_name, operator, ValueSlot::None)
    }

    fn with_slot(
        field_name: impl Into<String>,
        operator: &OperatorDescriptor,
        slot: ValueSlot,
    ) -> Self {
        Self {
            operator_bean: operator.wire_bean.to_string(),
            field_name: field_name.into(),
            operation: operator.key.to_string(),
            slot,
        }
    }

    pub fn value(&self) -> Option<&TypedValue> {
        self.slot.value()
    }

    pub fn bound(&self, bound: RangeBound) -> Option<&TypedValue> {
        self.slot.bound(bound)
    }

    pub fn has_field(&self) -> bool {
        !self.field_name.is_empty()
    }

    pub fn has_operator(&self) -> bool {
        !self.operation.is_empty()
    }

    /// Select a new field.
    ///
    /// Operator legality and value typing depend on the field type, so the
    /// operator is cleared and the value reset to an empty one of `type_tag`.
    pub fn select_field(&mut self, field_name: impl Into<String>, type_tag: impl Into<String>) {
        self.field_name = field_name.into();
        self.operation.clear();
        self.operator_bean.clear();
        self.slot = ValueSlot::Single(TypedValue::typed_empty(type_tag));
    }

    /// Select an operator and reshape the value storage to match it.
    ///
    /// The storage is always replaced with an empty one tagged with
    /// `type_tag`, or with the tag the current storage carries. A no-value
    /// slot carries no tag, so callers that know the field type should pass
    /// it.
    pub fn select_operator(&mut self, operator: &OperatorDescriptor, type_tag: Option<&str>) {
        let type_tag = match type_tag {
            Some(tag) => tag.to_string(),
            None => self.slot.type_tag().to_string(),
        };
        self.operation = operator.key.to_string();
        self.operator_bean = operator.wire_bean.to_string();
        self.slot = ValueSlot::empty_for(operator.shape, &type_tag);
    }

    /// Set the single value. Returns false if the leaf holds no single value.
    pub fn set_value(&mut self, value: Value, type_tag: Option<&str>) -> bool {
        match &mut self.slot {
            ValueSlot::Single(current) => {
                assign(current, value, type_tag);
                true
            }
            _ => false,
        }
    }

    /// Set one end of a range. Returns false if the leaf holds no range.
    pub fn set_bound(&mut self, bound: RangeBound, value: Value, type_tag: Option<&str>) -> bool {
        match (&mut self.slot, bound) {
            (ValueSlot::Range { from, .. }, RangeBound::From) => {
                assign(from, value, type_tag);
                true
            }
            (ValueSlot::Range { to, .. }, RangeBound::To) => {
                assign(to, value, type_tag);
                true
            }
            _ => false,
        }
    }
}

fn assign(target: &mut TypedValue, value: Value, type_tag: Option<&str>) {
    target.value = value;
    if let Some(tag) = type_tag {
        target.type_tag = tag.to_string();
    }
}

/// A boolean combinator over an ordered list of children
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub operator: GroupOperator,
    pub children: Vec<Condition>,
}

impl Default for Group {
    fn default() -> Self {
        Self::empty()
    }
}

impl Group {
    /// Group with no children
    pub fn new(operator: GroupOperator) -> Self {
        Self {
            operator,
            children: Vec::new(),
        }
    }

    /// AND group holding one empty leaf
    pub fn empty() -> Self {
        Self {
            operator: GroupOperator::And,
            children: vec![Condition::Leaf(Leaf::empty())],
        }
    }

    /// Append a child
    pub fn with_child(mut self, child: impl Into<Condition>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Index of the first nested group, if any
    pub fn first_group_index(&self) -> Option<usize> {
        self.children.iter().position(Condition::is_group)
    }
}

/// A node of a condition tree
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Leaf(Leaf),
    Group(Group),
}

impl From<Leaf> for Condition {
    fn from(leaf: Leaf) -> Self {
        Condition::Leaf(leaf)
    }
}

impl From<Group> for Condition {
    fn from(group: Group) -> Self {
        Condition::Group(group)
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::Group(Group::empty())
    }
}

impl Condition {
    pub fn is_group(&self) -> bool {
        matches!(self, Condition::Group(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Condition::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Condition::Leaf(leaf) => Some(leaf),
            Condition::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Condition::Group(group) => Some(group),
            Condition::Leaf(_) => None,
        }
    }

    /// Node at `path`, if it exists
    pub fn get(&self, path: &NodePath) -> Option<&Condition> {
        let mut node = self;
        for &index in path.indices() {
            node = node.as_group()?.children.get(index)?;
        }
        Some(node)
    }

    /// Mutable node at `path`, if it exists
    pub fn get_mut(&mut self, path: &NodePath) -> Option<&mut Condition> {
        let mut node = self;
        for &index in path.indices() {
            node = match node {
                Condition::Group(group) => group.children.get_mut(index)?,
                Condition::Leaf(_) => return None,
            };
        }
        Some(node)
    }

    /// Leaf at `path`, if the path resolves to a leaf
    pub fn leaf(&self, path: &NodePath) -> Option<&Leaf> {
        self.get(path).and_then(Condition::as_leaf)
    }

    /// Group at `path`, if the path resolves to a group
    pub fn group(&self, path: &NodePath) -> Option<&Group> {
        self.get(path).and_then(Condition::as_group)
    }

    /// Depth-first iterator over all leaves, in child order
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    /// Number of levels in the tree; a lone leaf has depth 1
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            if let Condition::Group(group) = node {
                stack.extend(group.children.iter().map(|child| (child, depth + 1)));
            }
        }
        max
    }
}

/// Iterator returned by [`Condition::leaves`]
pub struct Leaves<'a> {
    stack: Vec<&'a Condition>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Leaf;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Condition::Leaf(leaf) => return Some(leaf),
                Condition::Group(group) => self.stack.extend(group.children.iter().rev()),
            }
        }
        None
    }
}
