//! Type-directed recursive conversion
//!
//! [`convert`] dispatches on the declared [`FieldType`]:
//! - `Leaf` applies the converter to the raw value as-is
//! - `Record` requires a mapping and converts each declared field in order
//! - `Sequence` requires an array and converts each element in order
//!
//! [`convert_record`] is the `Record` case invoked at the root, so top-level
//! and nested records share one code path. The first failure aborts the
//! whole conversion; no partial record is returned.
//!
//! Copyright (c) 2025 Marshale Team
//! Licensed under the Apache-2.0 license

use crate::error::{ConversionError, Shape};
use crate::path::{FieldPath, PathSegment};
use crate::record::{FieldValue, Record};
use crate::registry::SchemaRegistry;
use crate::schema::FieldType;
use serde_json::Value as JsonValue;
use tracing::{debug, trace};

/// Convert a raw value against a declared field type
pub fn convert(
    registry: &SchemaRegistry,
    field_type: &FieldType,
    raw: &JsonValue,
) -> Result<FieldValue, ConversionError> {
    let mut path = FieldPath::root();
    convert_at(registry, field_type, raw, &mut path).inspect_err(log_failure)
}

/// Convert a raw mapping into a record of the given type
pub fn convert_record(
    registry: &SchemaRegistry,
    type_id: &str,
    raw: &JsonValue,
) -> Result<Record, ConversionError> {
    debug!(type_id, "Converting record");
    let mut path = FieldPath::root();
    let record = convert_record_at(registry, type_id, raw, &mut path).inspect_err(log_failure)?;
    debug!(type_id, fields = record.len(), "Record converted");
    Ok(record)
}

fn log_failure(err: &ConversionError) {
    debug!(kind = %err.kind(), path = %err.path(), error = %err, "Conversion failed");
}

fn convert_at(
    registry: &SchemaRegistry,
    field_type: &FieldType,
    raw: &JsonValue,
    path: &mut FieldPath,
) -> Result<FieldValue, ConversionError> {
    match field_type {
        FieldType::Leaf(converter) => converter
            .convert(raw)
            .map(FieldValue::Scalar)
            .map_err(|source| ConversionError::ConverterFailure {
                path: path.clone(),
                converter: converter.name().to_string(),
                source,
            }),
        FieldType::Record(type_id) => {
            convert_record_at(registry, type_id, raw, path).map(FieldValue::Record)
        }
        FieldType::Sequence(inner) => {
            let items = raw.as_array().ok_or_else(|| ConversionError::TypeMismatch {
                path: path.clone(),
                expected: Shape::Sequence,
                found: Shape::of(raw),
            })?;

            let mut converted = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(index));
                let value = convert_at(registry, inner, item, path)?;
                path.pop();
                converted.push(value);
            }
            Ok(FieldValue::Sequence(converted))
        }
    }
}

fn convert_record_at(
    registry: &SchemaRegistry,
    type_id: &str,
    raw: &JsonValue,
    path: &mut FieldPath,
) -> Result<Record, ConversionError> {
    let schema = registry
        .get(type_id)
        .ok_or_else(|| ConversionError::UnknownType {
            path: path.clone(),
            type_id: type_id.to_string(),
        })?;

    let mapping = raw.as_object().ok_or_else(|| ConversionError::TypeMismatch {
        path: path.clone(),
        expected: Shape::Mapping,
        found: Shape::of(raw),
    })?;

    let mut fields = Vec::with_capacity(schema.fields().len());
    for descriptor in schema.fields() {
        path.push(PathSegment::Field(descriptor.name.clone()));
        let raw_value = mapping
            .get(&descriptor.name)
            .ok_or_else(|| ConversionError::MissingField {
                path: path.clone(),
                field: descriptor.name.clone(),
            })?;
        trace!(path = %path, field_type = %descriptor.field_type, "Converting field");
        let value = convert_at(registry, &descriptor.field_type, raw_value, path)?;
        path.pop();
        fields.push((descriptor.name.clone(), value));
    }

    Ok(Record::new(schema.type_id().to_string(), fields))
}
