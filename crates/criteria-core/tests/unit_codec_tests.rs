//! Unit tests for the wire codec

use criteria_core::catalog::describe;
use criteria_core::*;
use serde_json::json;

#[test]
fn test_decode_saved_criteria() -> anyhow::Result<()> {
    let saved = r#"{
        "@bean": "criteria.condition.GroupCondition",
        "operator": "AND",
        "conditions": [
            {
                "@bean": "criteria.condition.GreaterThan",
                "fieldName": "age",
                "operation": "GREATER_THAN",
                "value": { "@type": "java.lang.Integer", "value": 18 }
            },
            {
                "@bean": "criteria.condition.GroupCondition",
                "operator": "OR",
                "conditions": [
                    {
                        "@bean": "criteria.condition.Equals",
                        "fieldName": "name",
                        "operation": "EQUALS",
                        "value": { "@type": "java.lang.String", "value": "x" }
                    },
                    {
                        "@bean": "criteria.condition.IsNull",
                        "fieldName": "email",
                        "operation": "IS_NULL"
                    }
                ]
            }
        ]
    }"#;

    let tree = codec::decode_str(saved)?;
    assert!(is_complete(&tree));

    let root = tree.as_group().unwrap();
    assert_eq!(root.operator, GroupOperator::And);
    assert_eq!(
        tree.leaf(&NodePath::from([0])).unwrap().value(),
        Some(&TypedValue::new("java.lang.Integer", 18))
    );
    assert_eq!(tree.group(&NodePath::from([1])).unwrap().operator, GroupOperator::Or);
    assert_eq!(tree.leaf(&NodePath::from([1, 1])).unwrap().slot, ValueSlot::None);

    // re-encoding yields the same document
    let original: serde_json::Value = serde_json::from_str(saved)?;
    assert_eq!(encode(&tree), original);
    Ok(())
}

#[test]
fn test_decode_fills_bean_from_operation() {
    let tree = decode(&json!({
        "fieldName": "age",
        "operation": "EQUALS",
        "value": { "@type": "java.lang.Integer", "value": 30 }
    }));

    let leaf = tree.as_leaf().unwrap();
    assert_eq!(leaf.operator_bean, "criteria.condition.Equals");
    assert_eq!(encode(&tree)["@bean"], "criteria.condition.Equals");

    // an unknown operation leaves the discriminator alone
    let tree = decode(&json!({ "fieldName": "age", "operation": "SOUNDS_LIKE" }));
    assert_eq!(tree.as_leaf().unwrap().operator_bean, "");
}

#[test]
fn test_malformed_leaf_degrades_to_incomplete() {
    let tree = decode(&json!({
        "@bean": GROUP_BEAN,
        "operator": "AND",
        "conditions": [
            { "fieldName": 12, "operation": null },
            "not even an object"
        ]
    }));

    let group = tree.as_group().unwrap();
    assert_eq!(group.children.len(), 2);
    assert_eq!(group.children[1], Condition::Leaf(Leaf::empty()));

    let first = group.children[0].as_leaf().unwrap();
    assert_eq!(first.field_name, "");
    assert_eq!(first.operation, "");
    assert!(!is_complete(&tree));
}

#[test]
fn test_range_leaf_drops_stray_value() {
    let tree = decode(&json!({
        "@bean": "criteria.condition.Between",
        "fieldName": "age",
        "operation": "BETWEEN",
        "value": { "@type": "java.lang.Integer", "value": 1 },
        "from": { "@type": "java.lang.Integer", "value": 18 },
        "to": { "@type": "java.lang.Integer", "value": 65 }
    }));

    let json = encode(&tree);
    assert!(json.get("value").is_none());
    assert_eq!(json["from"]["value"], 18);
}

#[test]
fn test_round_trip_of_edited_tree() {
    let path = NodePath::from([0]);
    let mut tree = Condition::from(empty_group());
    tree = tree::update_leaf_field(&tree, &path, "created", "java.time.LocalDate");
    tree = tree::update_leaf_operator(&tree, &path, describe("BETWEEN_INCLUSIVE").unwrap(), None);
    tree = tree::update_leaf_range(&tree, &path, RangeBound::From, json!("2024-01-01"), None);
    tree = tree::insert_child(&tree, &NodePath::root(), Group::empty().into(), None);

    let text = codec::encode_string(&tree);
    assert_eq!(codec::decode_str(&text).unwrap(), tree);
}
