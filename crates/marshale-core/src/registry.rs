//! Schema registry: record type id → ordered field list
//!
//! The registry is assembled once with [`SchemaRegistryBuilder`] and is
//! read-only afterwards. It is `Send + Sync`, so a single instance can be
//! shared behind an `Arc` by any number of concurrent conversions.
//!
//! Copyright (c) 2025 Marshale Team
//! Licensed under the Apache-2.0 license

use crate::engine;
use crate::error::{ConversionError, SchemaError};
use crate::path::FieldPath;
use crate::record::{FieldValue, Record};
use crate::schema::{FieldDescriptor, FieldType, RecordSchema};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Immutable table of declared record types
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, RecordSchema>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::new()
    }

    pub fn get(&self, type_id: &str) -> Option<&RecordSchema> {
        self.schemas.get(type_id)
    }

    /// Declared fields of a record type, in order
    pub fn get_fields(&self, type_id: &str) -> Result<&[FieldDescriptor], ConversionError> {
        self.get(type_id)
            .map(RecordSchema::fields)
            .ok_or_else(|| ConversionError::UnknownType {
                path: FieldPath::root(),
                type_id: type_id.to_string(),
            })
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.schemas.contains_key(type_id)
    }

    /// Registered type ids in sorted order
    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn schemas(&self) -> impl Iterator<Item = &RecordSchema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Check that every record reference resolves to a registered type
    pub fn validate(&self) -> Result<(), SchemaError> {
        for schema in self.schemas.values() {
            for field in schema.fields() {
                for reference in field.field_type.references() {
                    if !self.contains(reference) {
                        return Err(SchemaError::UnresolvedReference {
                            type_id: schema.type_id().to_string(),
                            field: field.name.clone(),
                            reference: reference.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// See [`engine::convert_record`]
    pub fn convert_record(
        &self,
        type_id: &str,
        raw: &JsonValue,
    ) -> Result<Record, ConversionError> {
        engine::convert_record(self, type_id, raw)
    }

    /// See [`engine::convert`]
    pub fn convert(
        &self,
        field_type: &FieldType,
        raw: &JsonValue,
    ) -> Result<FieldValue, ConversionError> {
        engine::convert(self, field_type, raw)
    }
}

/// Collects record schemas before freezing them into a [`SchemaRegistry`]
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    schemas: BTreeMap<String, RecordSchema>,
}

impl SchemaRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record type; ids must be unique
    pub fn register(mut self, schema: RecordSchema) -> Result<Self, SchemaError> {
        self.insert(schema)?;
        Ok(self)
    }

    /// Non-consuming form of [`register`](Self::register)
    pub fn insert(&mut self, schema: RecordSchema) -> Result<(), SchemaError> {
        if self.schemas.contains_key(schema.type_id()) {
            return Err(SchemaError::DuplicateRecord {
                type_id: schema.type_id().to_string(),
            });
        }
        self.schemas.insert(schema.type_id().to_string(), schema);
        Ok(())
    }

    /// Freeze without checking references
    ///
    /// Dangling references surface as `UnknownType` during conversion.
    pub fn build(self) -> SchemaRegistry {
        SchemaRegistry {
            schemas: self.schemas,
        }
    }

    /// Freeze and run [`SchemaRegistry::validate`]
    pub fn build_validated(self) -> Result<SchemaRegistry, SchemaError> {
        let registry = self.build();
        registry.validate()?;
        Ok(registry)
    }
}
