//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating raw inputs and
//! field types, together with the engine properties checked against them.

#![cfg(test)]

use crate::built_in;
use crate::engine::convert;
use crate::error::ErrorKind;
use crate::record::FieldValue;
use crate::registry::SchemaRegistry;
use crate::schema::{FieldType, RecordSchema};
use proptest::collection::vec;
use proptest::prelude::*;
use serde_json::{json, Value};

/// Strategy for raw scalar values of any JSON kind
pub fn raw_scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

/// Strategy for integers written either as numbers or as decimal strings
pub fn raw_integer_strategy() -> impl Strategy<Value = (Value, i64)> {
    any::<i64>().prop_flat_map(|n| {
        prop_oneof![Just((json!(n), n)), Just((json!(n.to_string()), n))]
    })
}

/// Strategy for field names usable as record keys
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}"
}

/// Strategy for nested field types built only from leaves and sequences
pub fn field_type_strategy() -> impl Strategy<Value = FieldType> {
    let leaf = prop_oneof![
        Just(FieldType::leaf(built_in::any())),
        Just(FieldType::leaf(built_in::string())),
    ];
    leaf.prop_recursive(3, 8, 1, |inner| inner.prop_map(FieldType::sequence))
}

/// Raw value that fits a leaf/sequence type produced by [`field_type_strategy`]
fn raw_for(field_type: &FieldType) -> BoxedStrategy<Value> {
    match field_type {
        FieldType::Leaf(converter) if converter.name() == "string" => {
            "[a-z]{0,6}".prop_map(Value::String).boxed()
        }
        FieldType::Leaf(_) => raw_scalar_strategy().boxed(),
        FieldType::Sequence(inner) => vec(raw_for(inner), 0..4).prop_map(Value::Array).boxed(),
        FieldType::Record(_) => Just(json!({})).boxed(),
    }
}

proptest! {
    #[test]
    fn prop_integer_leaf_matches_parse((raw, expected) in raw_integer_strategy()) {
        let registry = SchemaRegistry::default();
        let value = convert(&registry, &FieldType::leaf(built_in::integer()), &raw).unwrap();
        prop_assert_eq!(value, FieldValue::Scalar(json!(expected)));
    }

    #[test]
    fn prop_sequence_preserves_length_and_order(items in vec(raw_integer_strategy(), 0..20)) {
        let registry = SchemaRegistry::default();
        let raw = Value::Array(items.iter().map(|(raw, _)| raw.clone()).collect());
        let ty = FieldType::sequence(FieldType::leaf(built_in::integer()));

        let converted = convert(&registry, &ty, &raw).unwrap();
        let converted = converted.as_sequence().unwrap();
        prop_assert_eq!(converted.len(), items.len());
        for (value, (_, expected)) in converted.iter().zip(items.iter()) {
            prop_assert_eq!(value, &FieldValue::Scalar(json!(*expected)));
        }
    }

    #[test]
    fn prop_nested_sequences_convert_elementwise(
        (ty, raw) in field_type_strategy().prop_flat_map(|ty| {
            let raw = raw_for(&ty);
            (Just(ty), raw)
        })
    ) {
        let registry = SchemaRegistry::default();
        let whole = convert(&registry, &ty, &raw).unwrap();
        if let (FieldType::Sequence(inner), Value::Array(items)) = (&ty, &raw) {
            let converted = whole.as_sequence().unwrap();
            prop_assert_eq!(converted.len(), items.len());
            for (i, item) in items.iter().enumerate() {
                prop_assert_eq!(&converted[i], &convert(&registry, inner, item).unwrap());
            }
        }
    }

    #[test]
    fn prop_any_missing_key_is_reported(
        names in proptest::collection::btree_set(field_name_strategy(), 1..6),
        drop_index in any::<prop::sample::Index>(),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mut builder = RecordSchema::builder("R");
        for name in &names {
            builder = builder.field(name.clone(), FieldType::leaf(built_in::any()));
        }
        let registry = SchemaRegistry::builder()
            .register(builder.build().unwrap())
            .unwrap()
            .build();

        let dropped = drop_index.get(&names).clone();
        let raw: serde_json::Map<String, Value> = names
            .iter()
            .filter(|name| **name != dropped)
            .map(|name| (name.clone(), json!(1)))
            .collect();

        let err = registry.convert_record("R", &Value::Object(raw)).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::MissingField);
        prop_assert_eq!(err.path().last_field(), Some(dropped.as_str()));
    }

    #[test]
    fn prop_non_mapping_record_input_is_mismatch(raw in raw_scalar_strategy()) {
        let registry = SchemaRegistry::builder()
            .register(RecordSchema::builder("R").build().unwrap())
            .unwrap()
            .build();
        let err = registry.convert_record("R", &raw).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }
}
