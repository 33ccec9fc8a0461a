//! Converted output values
//!
//! Copyright (c) 2025 Marshale Team
//! Licensed under the Apache-2.0 license

use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

/// A converted value, shaped by the declared field type that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Output of a leaf converter
    Scalar(JsonValue),
    /// A nested record
    Record(Record),
    /// Element-wise converted sequence
    Sequence(Vec<FieldValue>),
}

impl FieldValue {
    pub fn as_scalar(&self) -> Option<&JsonValue> {
        match self {
            FieldValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            FieldValue::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Plain JSON rendering; records become objects in declared field order
    pub fn to_json(&self) -> JsonValue {
        match self {
            FieldValue::Scalar(value) => value.clone(),
            FieldValue::Record(record) => record.to_json(),
            FieldValue::Sequence(items) => {
                JsonValue::Array(items.iter().map(FieldValue::to_json).collect())
            }
        }
    }
}

impl From<JsonValue> for FieldValue {
    fn from(value: JsonValue) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Record> for FieldValue {
    fn from(record: Record) -> Self {
        FieldValue::Record(record)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Scalar(value) => value.serialize(serializer),
            FieldValue::Record(record) => record.serialize(serializer),
            FieldValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// A fully converted record
///
/// Holds exactly one value per declared field, in declaration order. There
/// are no mutating accessors; a record is read-only once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_id: String,
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub(crate) fn new(type_id: String, fields: Vec<(String, FieldValue)>) -> Self {
        Self { type_id, fields }
    }

    /// Record type this value was converted against
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Vec<(String, FieldValue)> {
        self.fields
    }

    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        for (name, value) in &self.fields {
            map.insert(name.clone(), value.to_json());
        }
        JsonValue::Object(map)
    }

    /// Land the record in a user-defined Rust type via serde
    ///
    /// ```
    /// use marshale_core::{built_in, FieldType, RecordSchema, SchemaRegistry};
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct Point { x: i64, y: i64 }
    ///
    /// let registry = SchemaRegistry::builder()
    ///     .register(RecordSchema::builder("Point")
    ///         .field("x", FieldType::leaf(built_in::integer()))
    ///         .field("y", FieldType::leaf(built_in::integer()))
    ///         .build()
    ///         .unwrap())
    ///     .unwrap()
    ///     .build();
    ///
    /// let record = registry.convert_record("Point", &json!({"x": "3", "y": 4})).unwrap();
    /// let point: Point = record.deserialize_into().unwrap();
    /// assert_eq!((point.x, point.y), (3, 4));
    /// ```
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }
}

/// Serializes as a map in declared field order
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a str, &'a FieldValue);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a FieldValue)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
