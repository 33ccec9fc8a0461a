//! Record type declarations
//!
//! A [`RecordSchema`] is an ordered list of [`FieldDescriptor`]s, each pairing
//! a field name with a [`FieldType`]. Schemas are built once through
//! [`RecordSchemaBuilder`] and never change afterwards.
//!
//! Copyright (c) 2025 Marshale Team
//! Licensed under the Apache-2.0 license

use crate::converter::SharedConverter;
use crate::error::SchemaError;
use std::collections::HashSet;
use std::fmt;

/// Declared type of a field
#[derive(Clone)]
pub enum FieldType {
    /// Apply a converter directly to the raw value
    Leaf(SharedConverter),
    /// Convert a nested mapping against another registered record type
    Record(String),
    /// Convert every element of a raw sequence with the inner type
    Sequence(Box<FieldType>),
}

impl FieldType {
    pub fn leaf(converter: SharedConverter) -> Self {
        FieldType::Leaf(converter)
    }

    pub fn record<S: Into<String>>(type_id: S) -> Self {
        FieldType::Record(type_id.into())
    }

    pub fn sequence(inner: FieldType) -> Self {
        FieldType::Sequence(Box::new(inner))
    }

    /// Record type ids referenced anywhere inside this type
    pub fn references(&self) -> Vec<&str> {
        match self {
            FieldType::Leaf(_) => Vec::new(),
            FieldType::Record(type_id) => vec![type_id.as_str()],
            FieldType::Sequence(inner) => inner.references(),
        }
    }
}

/// Renders the declaration syntax: converter name, record id, or `[inner]`
impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Leaf(converter) => write!(f, "{}", converter.name()),
            FieldType::Record(type_id) => write!(f, "{}", type_id),
            FieldType::Sequence(inner) => write!(f, "[{}]", inner),
        }
    }
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Leaf(converter) => f.debug_tuple("Leaf").field(&converter.name()).finish(),
            FieldType::Record(type_id) => f.debug_tuple("Record").field(type_id).finish(),
            FieldType::Sequence(inner) => f.debug_tuple("Sequence").field(inner).finish(),
        }
    }
}

/// Structural equality; leaves compare by converter name
impl PartialEq for FieldType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldType::Leaf(a), FieldType::Leaf(b)) => a.name() == b.name(),
            (FieldType::Record(a), FieldType::Record(b)) => a == b,
            (FieldType::Sequence(a), FieldType::Sequence(b)) => a == b,
            _ => false,
        }
    }
}

/// One declared field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    /// Free-form documentation, stored but never interpreted
    pub description: Option<String>,
}

impl FieldDescriptor {
    pub fn new<S: Into<String>>(name: S, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            description: None,
        }
    }
}

/// A named, ordered set of typed fields
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    type_id: String,
    fields: Vec<FieldDescriptor>,
    description: Option<String>,
}

impl RecordSchema {
    /// Start declaring a record type
    pub fn builder<S: Into<String>>(type_id: S) -> RecordSchemaBuilder {
        RecordSchemaBuilder::new(type_id)
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Builder for [`RecordSchema`]
///
/// Field order is the order of [`field`](Self::field) calls. Declaration
/// problems are reported by [`build`](Self::build).
#[derive(Debug)]
pub struct RecordSchemaBuilder {
    type_id: String,
    fields: Vec<FieldDescriptor>,
    description: Option<String>,
}

impl RecordSchemaBuilder {
    pub fn new<S: Into<String>>(type_id: S) -> Self {
        Self {
            type_id: type_id.into(),
            fields: Vec::new(),
            description: None,
        }
    }

    /// Append a field
    pub fn field<S: Into<String>>(mut self, name: S, field_type: FieldType) -> Self {
        self.fields.push(FieldDescriptor::new(name, field_type));
        self
    }

    /// Append a field carrying a description
    pub fn documented_field<S, D>(mut self, name: S, field_type: FieldType, description: D) -> Self
    where
        S: Into<String>,
        D: Into<String>,
    {
        let mut descriptor = FieldDescriptor::new(name, field_type);
        descriptor.description = Some(description.into());
        self.fields.push(descriptor);
        self
    }

    /// Append an already constructed descriptor
    pub fn descriptor(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    pub fn description<D: Into<String>>(mut self, description: D) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the declaration and produce the schema
    pub fn build(self) -> Result<RecordSchema, SchemaError> {
        if self.type_id.is_empty() {
            return Err(SchemaError::EmptyTypeId);
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName {
                    type_id: self.type_id.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    type_id: self.type_id.clone(),
                    field: field.name.clone(),
                });
            }
        }

        Ok(RecordSchema {
            type_id: self.type_id,
            fields: self.fields,
            description: self.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::built_in;

    #[test]
    fn test_builder_preserves_field_order() {
        let schema = RecordSchema::builder("Foo")
            .field("bar", FieldType::leaf(built_in::integer()))
            .field("baz", FieldType::sequence(FieldType::leaf(built_in::integer())))
            .field("id", FieldType::leaf(built_in::integer()))
            .build()
            .unwrap();

        let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["bar", "baz", "id"]);
        assert_eq!(schema.type_id(), "Foo");
    }

    #[test]
    fn test_builder_rejects_duplicate_fields() {
        let result = RecordSchema::builder("Foo")
            .field("id", FieldType::leaf(built_in::integer()))
            .field("id", FieldType::leaf(built_in::string()))
            .build();
        assert_eq!(
            result.unwrap_err(),
            SchemaError::DuplicateField {
                type_id: "Foo".to_string(),
                field: "id".to_string(),
            }
        );
    }

    #[test]
    fn test_builder_rejects_empty_names() {
        assert_eq!(RecordSchema::builder("").build().unwrap_err(), SchemaError::EmptyTypeId);
        let result = RecordSchema::builder("Foo")
            .field("", FieldType::leaf(built_in::any()))
            .build();
        assert!(matches!(result, Err(SchemaError::EmptyFieldName { .. })));
    }

    #[test]
    fn test_field_type_display() {
        let nested = FieldType::sequence(FieldType::sequence(FieldType::record("Point")));
        assert_eq!(nested.to_string(), "[[Point]]");
        assert_eq!(FieldType::leaf(built_in::float()).to_string(), "float");
    }

    #[test]
    fn test_field_type_references() {
        let ty = FieldType::sequence(FieldType::record("Line"));
        assert_eq!(ty.references(), vec!["Line"]);
        assert!(FieldType::leaf(built_in::any()).references().is_empty());
    }

    #[test]
    fn test_documented_field_and_lookup() {
        let schema = RecordSchema::builder("User")
            .description("An account holder")
            .documented_field("name", FieldType::leaf(built_in::string()), "Display name")
            .build()
            .unwrap();
        assert_eq!(schema.description(), Some("An account holder"));
        assert_eq!(
            schema.field("name").and_then(|f| f.description.as_deref()),
            Some("Display name")
        );
        assert!(schema.field("email").is_none());
    }
}
