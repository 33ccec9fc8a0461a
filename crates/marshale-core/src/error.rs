//! Error types for the Marshale core library
//!
//! Conversion failures are categorized rather than opaque: every
//! [`ConversionError`] names its kind and carries the [`FieldPath`] of the
//! value that could not be converted. Declaration problems are reported as
//! [`SchemaError`] when a record type is registered, before any conversion runs.

use crate::loader::LoaderError;
use crate::path::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error;

/// Main error type for Marshale operations
#[derive(Error, Debug)]
pub enum Error {
    /// A record type declaration was rejected
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A raw value could not be converted
    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// Declarations could not be loaded from a document
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse JSON shape of a raw value, used in mismatch reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Null,
    Boolean,
    Number,
    String,
    Sequence,
    Mapping,
}

impl Shape {
    /// Classify a raw value
    pub fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Shape::Null,
            JsonValue::Bool(_) => Shape::Boolean,
            JsonValue::Number(_) => Shape::Number,
            JsonValue::String(_) => Shape::String,
            JsonValue::Array(_) => Shape::Sequence,
            JsonValue::Object(_) => Shape::Mapping,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Null => write!(f, "null"),
            Shape::Boolean => write!(f, "boolean"),
            Shape::Number => write!(f, "number"),
            Shape::String => write!(f, "string"),
            Shape::Sequence => write!(f, "sequence"),
            Shape::Mapping => write!(f, "mapping"),
        }
    }
}

/// Failure reported by a leaf converter
///
/// The engine never rewrites this error; it is wrapped verbatim in
/// [`ConversionError::ConverterFailure`] together with the field path.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ConverterError {
    /// Human-readable failure description
    pub message: String,
    /// What the converter expected, if it can say
    pub expected: Option<String>,
    /// The offending raw value, rendered as JSON
    pub actual: Option<String>,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl ConverterError {
    /// Create a converter error with just a message
    pub fn new<M: Into<String>>(message: M) -> Self {
        Self {
            message: message.into(),
            expected: None,
            actual: None,
            source: None,
        }
    }

    /// Create an error for a raw value the converter cannot coerce
    pub fn invalid<E: Into<String>>(expected: E, raw: &JsonValue) -> Self {
        let expected = expected.into();
        Self {
            message: format!("cannot convert {} to {}", raw, expected),
            expected: Some(expected),
            actual: Some(raw.to_string()),
            source: None,
        }
    }

    /// Create an error wrapping a foreign error
    pub fn with_source<M, E>(message: M, source: E) -> Self
    where
        M: Into<String>,
        E: Into<anyhow::Error>,
    {
        Self {
            message: message.into(),
            expected: None,
            actual: None,
            source: Some(source.into()),
        }
    }
}

/// Category of a [`ConversionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    TypeMismatch,
    MissingField,
    ConverterFailure,
    UnknownType,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TypeMismatch => write!(f, "TypeMismatch"),
            ErrorKind::MissingField => write!(f, "MissingField"),
            ErrorKind::ConverterFailure => write!(f, "ConverterFailure"),
            ErrorKind::UnknownType => write!(f, "UnknownType"),
        }
    }
}

/// A failed conversion, located by field path
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The raw value has the wrong shape for the declared field type
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: FieldPath,
        expected: Shape,
        found: Shape,
    },

    /// A declared field has no key in the raw mapping
    #[error("missing field '{field}' at {path}")]
    MissingField { path: FieldPath, field: String },

    /// A leaf converter rejected its input
    #[error("converter '{converter}' failed at {path}: {source}")]
    ConverterFailure {
        path: FieldPath,
        converter: String,
        #[source]
        source: ConverterError,
    },

    /// A record reference names a type that was never registered
    #[error("unknown record type '{type_id}' at {path}")]
    UnknownType { path: FieldPath, type_id: String },
}

impl ConversionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ConversionError::MissingField { .. } => ErrorKind::MissingField,
            ConversionError::ConverterFailure { .. } => ErrorKind::ConverterFailure,
            ConversionError::UnknownType { .. } => ErrorKind::UnknownType,
        }
    }

    /// Path from the record root to the failing value
    pub fn path(&self) -> &FieldPath {
        match self {
            ConversionError::TypeMismatch { path, .. }
            | ConversionError::MissingField { path, .. }
            | ConversionError::ConverterFailure { path, .. }
            | ConversionError::UnknownType { path, .. } => path,
        }
    }
}

/// Rejected record type declaration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("record type '{type_id}' is already registered")]
    DuplicateRecord { type_id: String },

    #[error("record type '{type_id}' declares field '{field}' more than once")]
    DuplicateField { type_id: String, field: String },

    #[error("record type '{type_id}' declares a field with an empty name")]
    EmptyFieldName { type_id: String },

    #[error("record type id must not be empty")]
    EmptyTypeId,

    #[error("field '{field}' of record type '{type_id}' references unregistered type '{reference}'")]
    UnresolvedReference {
        type_id: String,
        field: String,
        reference: String,
    },
}
