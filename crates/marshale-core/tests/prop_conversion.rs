//! Property-based tests for the conversion engine
//!
//! These tests verify invariants that should hold for all raw inputs
//! converted through nested record declarations.

use marshale_core::{built_in, ErrorKind, FieldType, FieldValue, RecordSchema, SchemaRegistry};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

// Strategy functions for property testing

/// Strategy for a raw point whose coordinates may be numbers or strings
fn raw_point_strategy() -> impl Strategy<Value = (Value, (i64, i64))> {
    (any::<i32>(), any::<i32>(), any::<bool>()).prop_map(|(x, y, as_text)| {
        let (x, y) = (i64::from(x), i64::from(y));
        let raw = if as_text {
            json!({"x": x.to_string(), "y": y.to_string()})
        } else {
            json!({"x": x, "y": y})
        };
        (raw, (x, y))
    })
}

/// Strategy for keys that are never declared fields
fn extra_keys_strategy() -> impl Strategy<Value = Map<String, Value>> {
    btree_map("extra_[a-z]{1,6}", any::<i32>().prop_map(|n| json!(n)), 0..5)
        .prop_map(|extras| extras.into_iter().collect())
}

fn geometry_registry() -> SchemaRegistry {
    let point = RecordSchema::builder("Point")
        .field("x", FieldType::leaf(built_in::integer()))
        .field("y", FieldType::leaf(built_in::integer()))
        .build()
        .unwrap();
    let polyline = RecordSchema::builder("Polyline")
        .field("label", FieldType::leaf(built_in::string()))
        .field("points", FieldType::sequence(FieldType::record("Point")))
        .build()
        .unwrap();

    SchemaRegistry::builder()
        .register(point)
        .unwrap()
        .register(polyline)
        .unwrap()
        .build_validated()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_nested_records_convert_like_top_level(
        points in vec(raw_point_strategy(), 0..12),
        label in "[a-z]{0,8}",
    ) {
        let registry = geometry_registry();
        let raw_points: Vec<Value> = points.iter().map(|(raw, _)| raw.clone()).collect();
        let raw = json!({"label": label, "points": raw_points});

        let polyline = registry.convert_record("Polyline", &raw).unwrap();
        let converted = polyline.get("points").and_then(FieldValue::as_sequence).unwrap();
        prop_assert_eq!(converted.len(), points.len());

        for (value, (raw_point, (x, y))) in converted.iter().zip(points.iter()) {
            let direct = registry.convert_record("Point", raw_point).unwrap();
            prop_assert_eq!(value.as_record(), Some(&direct));
            prop_assert_eq!(direct.to_json(), json!({"x": x, "y": y}));
        }
    }

    #[test]
    fn prop_extra_keys_never_change_the_result(
        (raw_point, _) in raw_point_strategy(),
        extras in extra_keys_strategy(),
    ) {
        let registry = geometry_registry();
        let mut padded = raw_point.as_object().unwrap().clone();
        padded.extend(extras);

        let plain = registry.convert_record("Point", &raw_point).unwrap();
        let with_extras = registry.convert_record("Point", &Value::Object(padded)).unwrap();
        prop_assert_eq!(plain, with_extras);
    }

    #[test]
    fn prop_bad_element_is_located_by_index(
        points in vec(raw_point_strategy(), 1..10),
        bad in any::<prop::sample::Index>(),
    ) {
        let registry = geometry_registry();
        let bad_index = bad.index(points.len());
        let raw_points: Vec<Value> = points
            .iter()
            .enumerate()
            .map(|(i, (raw, _))| {
                if i == bad_index {
                    json!({"x": "nope", "y": 0})
                } else {
                    raw.clone()
                }
            })
            .collect();

        let err = registry
            .convert_record("Polyline", &json!({"label": "l", "points": raw_points}))
            .unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::ConverterFailure);
        prop_assert_eq!(err.path().to_string(), format!("$.points[{}].x", bad_index));
    }

    #[test]
    fn prop_conversion_is_deterministic((raw, _) in raw_point_strategy()) {
        let registry = geometry_registry();
        let first = registry.convert_record("Point", &raw).unwrap();
        let second = registry.convert_record("Point", &raw).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_scalar_for_sequence_field_is_mismatch(scalar in prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z]{0,8}".prop_map(Value::String),
    ]) {
        let registry = geometry_registry();
        let err = registry
            .convert_record("Polyline", &json!({"label": "l", "points": scalar}))
            .unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        prop_assert_eq!(err.path().to_string(), "$.points");
    }
}
