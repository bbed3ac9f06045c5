//! Wire codec
//!
//! Converts condition trees to and from the discriminated JSON consumed by the
//! backend query engine:
//!
//! ```json
//! {
//!   "@bean": "criteria.condition.GroupCondition",
//!   "operator": "AND",
//!   "conditions": [
//!     {
//!       "@bean": "criteria.condition.Between",
//!       "fieldName": "age",
//!       "operation": "BETWEEN",
//!       "from": { "@type": "java.lang.Integer", "value": 18 },
//!       "to": { "@type": "java.lang.Integer", "value": 65 }
//!     }
//!   ]
//! }
//! ```
//!
//! Decoding never fails on shape: anything that is not a recognizable group
//! becomes a leaf, and missing keys take their empty-constructor defaults.

use crate::catalog::{describe, describe_bean, OperatorShape};
use crate::condition::{Condition, Group, GroupOperator, Leaf, TypedValue, ValueSlot};
use crate::error::Result;
use serde_json::{Map, Value};

/// Default wire discriminator of a group
pub const GROUP_BEAN: &str = "criteria.condition.GroupCondition";

const BEAN_KEY: &str = "@bean";
const TYPE_KEY: &str = "@type";

/// Codec bound to a group discriminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireCodec {
    group_bean: String,
}

impl Default for WireCodec {
    fn default() -> Self {
        Self::new(GROUP_BEAN)
    }
}

impl WireCodec {
    /// Create a codec recognizing `group_bean` as the group discriminator
    pub fn new(group_bean: impl Into<String>) -> Self {
        Self {
            group_bean: group_bean.into(),
        }
    }

    pub fn group_bean(&self) -> &str {
        &self.group_bean
    }

    /// Encode a tree. Absent value slots are omitted, never written as null.
    pub fn encode(&self, node: &Condition) -> Value {
        match node {
            Condition::Group(group) => {
                let mut obj = Map::new();
                obj.insert(BEAN_KEY.to_string(), Value::String(self.group_bean.clone()));
                obj.insert(
                    "operator".to_string(),
                    Value::String(group.operator.as_str().to_string()),
                );
                obj.insert(
                    "conditions".to_string(),
                    Value::Array(group.children.iter().map(|c| self.encode(c)).collect()),
                );
                Value::Object(obj)
            }
            Condition::Leaf(leaf) => encode_leaf(leaf),
        }
    }

    /// Decode a tree, degrading malformed input to incomplete nodes
    pub fn decode(&self, json: &Value) -> Condition {
        let Some(obj) = json.as_object() else {
            log::debug!("condition is not a JSON object, using an empty leaf");
            return Condition::Leaf(Leaf::empty());
        };

        match obj.get(BEAN_KEY).and_then(Value::as_str) {
            Some(bean) if bean == self.group_bean => Condition::Group(self.decode_group(obj)),
            _ => Condition::Leaf(decode_leaf(obj)),
        }
    }

    /// Encode a tree as compact JSON text
    pub fn encode_string(&self, node: &Condition) -> String {
        self.encode(node).to_string()
    }

    /// Decode JSON text. Only text that is not JSON at all is an error.
    pub fn decode_str(&self, text: &str) -> Result<Condition> {
        let json: Value = serde_json::from_str(text)?;
        Ok(self.decode(&json))
    }

    fn decode_group(&self, obj: &Map<String, Value>) -> Group {
        let operator = match obj.get("operator").and_then(Value::as_str) {
            Some(raw) => GroupOperator::parse(raw).unwrap_or_else(|| {
                log::debug!("unknown group operator '{}', using AND", raw);
                GroupOperator::And
            }),
            None => GroupOperator::And,
        };

        let children = match obj.get("conditions") {
            Some(Value::Array(items)) => items.iter().map(|item| self.decode(item)).collect(),
            Some(other) => {
                log::debug!("group conditions is not an array: {}", other);
                Vec::new()
            }
            None => Vec::new(),
        };

        Group { operator, children }
    }
}

/// Encode with the default group discriminator
pub fn encode(node: &Condition) -> Value {
    WireCodec::default().encode(node)
}

/// Decode with the default group discriminator
pub fn decode(json: &Value) -> Condition {
    WireCodec::default().decode(json)
}

/// Encode as compact JSON text with the default group discriminator
pub fn encode_string(node: &Condition) -> String {
    WireCodec::default().encode_string(node)
}

/// Decode JSON text with the default group discriminator
pub fn decode_str(text: &str) -> Result<Condition> {
    WireCodec::default().decode_str(text)
}

fn encode_leaf(leaf: &Leaf) -> Value {
    let mut obj = Map::new();
    obj.insert(BEAN_KEY.to_string(), Value::String(leaf.operator_bean.clone()));
    obj.insert("fieldName".to_string(), Value::String(leaf.field_name.clone()));
    obj.insert("operation".to_string(), Value::String(leaf.operation.clone()));
    match &leaf.slot {
        ValueSlot::None => {}
        ValueSlot::Single(value) => {
            obj.insert("value".to_string(), encode_typed(value));
        }
        ValueSlot::Range { from, to } => {
            obj.insert("from".to_string(), encode_typed(from));
            obj.insert("to".to_string(), encode_typed(to));
        }
    }
    Value::Object(obj)
}

fn encode_typed(value: &TypedValue) -> Value {
    let mut obj = Map::new();
    obj.insert(TYPE_KEY.to_string(), Value::String(value.type_tag.clone()));
    obj.insert("value".to_string(), value.value.clone());
    Value::Object(obj)
}

fn decode_leaf(obj: &Map<String, Value>) -> Leaf {
    let mut operator_bean = string_field(obj, BEAN_KEY);
    let field_name = string_field(obj, "fieldName");
    let mut operation = string_field(obj, "operation");
    // Either half of the operator identifies the other.
    if operation.is_empty() {
        if let Some(op) = describe_bean(&operator_bean) {
            operation = op.key.to_string();
        }
    } else if operator_bean.is_empty() {
        if let Some(op) = describe(&operation) {
            operator_bean = op.wire_bean.to_string();
        }
    }

    let value = typed_field(obj, "value");
    let from = typed_field(obj, "from");
    let to = typed_field(obj, "to");

    let slot = match describe(&operation).map(|op| op.shape) {
        Some(OperatorShape::NoValue) => ValueSlot::None,
        Some(OperatorShape::Range) => ValueSlot::Range {
            from: from.unwrap_or_else(TypedValue::empty),
            to: to.unwrap_or_else(TypedValue::empty),
        },
        Some(OperatorShape::SingleValue) => {
            ValueSlot::Single(value.unwrap_or_else(TypedValue::empty))
        }
        // Unknown operator: keep whatever storage the payload carries. A named
        // operator without any value key takes no value; an unset one is an
        // empty leaf.
        None => match (from, to, value) {
            (None, None, None) if !operation.is_empty() || !operator_bean.is_empty() => {
                ValueSlot::None
            }
            (None, None, value) => ValueSlot::Single(value.unwrap_or_else(TypedValue::empty)),
            (from, to, _) => ValueSlot::Range {
                from: from.unwrap_or_else(TypedValue::empty),
                to: to.unwrap_or_else(TypedValue::empty),
            },
        },
    };

    Leaf {
        operator_bean,
        field_name,
        operation,
        slot,
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => {
            log::debug!("'{}' is not a string: {}", key, other);
            String::new()
        }
    }
}

fn typed_field(obj: &Map<String, Value>, key: &str) -> Option<TypedValue> {
    match obj.get(key)? {
        Value::Null => None,
        Value::Object(inner) => Some(TypedValue {
            type_tag: string_field(inner, TYPE_KEY),
            value: inner
                .get("value")
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
        }),
        // A bare scalar is taken as an untyped value.
        other => Some(TypedValue::new("", other.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OperatorDescriptor;
    use crate::condition::RangeBound;
    use serde_json::json;

    #[test]
    fn test_encode_empty_group() {
        let json = encode(&Condition::Group(Group::empty()));
        assert_eq!(
            json,
            json!({
                "@bean": GROUP_BEAN,
                "operator": "AND",
                "conditions": [{
                    "@bean": "",
                    "fieldName": "",
                    "operation": "",
                    "value": { "@type": "", "value": "" }
                }]
            })
        );
    }

    #[test]
    fn test_encode_no_value_leaf_omits_slots() {
        let leaf = Leaf::no_value("email", describe("IS_NULL").unwrap());
        let json = encode(&Condition::Leaf(leaf));
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("value"));
        assert!(!obj.contains_key("from"));
        assert!(!obj.contains_key("to"));
    }

    #[test]
    fn test_decode_non_object() {
        assert_eq!(decode(&json!(42)), Condition::Leaf(Leaf::empty()));
        assert_eq!(decode(&json!(null)), Condition::Leaf(Leaf::empty()));
    }

    #[test]
    fn test_decode_unknown_bean_is_leaf() {
        let node = decode(&json!({ "@bean": "something.Else", "operator": "OR" }));
        let leaf = node.as_leaf().unwrap();
        assert_eq!(leaf.operator_bean, "something.Else");
        assert_eq!(leaf.field_name, "");
        assert_eq!(leaf.slot, ValueSlot::None);

        let node = decode(&json!({ "fieldName": "age" }));
        assert_eq!(node.as_leaf().unwrap().slot, ValueSlot::Single(TypedValue::empty()));
    }

    #[test]
    fn test_custom_no_value_operator_round_trip() {
        let custom = OperatorDescriptor {
            wire_bean: "com.example.IsEmpty",
            key: "IS_EMPTY",
            label: "is empty",
            applicable_types: &["String"],
            shape: OperatorShape::NoValue,
        };
        let node = Condition::Leaf(Leaf::no_value("name", &custom));
        assert_eq!(decode(&encode(&node)), node);
    }

    #[test]
    fn test_decode_group_defaults() {
        let node = decode(&json!({ "@bean": GROUP_BEAN, "operator": "NAND", "conditions": "x" }));
        let group = node.as_group().unwrap();
        assert_eq!(group.operator, GroupOperator::And);
        assert!(group.children.is_empty());
    }

    #[test]
    fn test_decode_fills_operation_from_bean() {
        let node = decode(&json!({
            "@bean": "criteria.condition.Between",
            "fieldName": "age",
            "from": { "@type": "java.lang.Integer", "value": 18 }
        }));
        let leaf = node.as_leaf().unwrap();
        assert_eq!(leaf.operation, "BETWEEN");
        assert_eq!(leaf.bound(RangeBound::From), Some(&TypedValue::new("java.lang.Integer", 18)));
        assert_eq!(leaf.bound(RangeBound::To), Some(&TypedValue::empty()));
    }

    #[test]
    fn test_custom_group_bean() {
        let codec = WireCodec::new("com.example.Group");
        let json = codec.encode(&Condition::Group(Group::new(GroupOperator::Or)));
        assert_eq!(json["@bean"], "com.example.Group");
        assert!(codec.decode(&json).is_group());
        // the default codec does not recognize it
        assert!(decode(&json).is_leaf());
    }

    #[test]
    fn test_decode_str_rejects_invalid_json() {
        assert!(decode_str("{").is_err());
        assert!(decode_str("[]").unwrap().is_leaf());
    }
}
