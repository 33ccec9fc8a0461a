//! Marshale Core - declared record types from untyped maps
//!
//! A record type is declared as an ordered list of field names, each paired
//! with a [`FieldType`]: a leaf [`Converter`], a reference to another record
//! type, or a sequence of either. The conversion engine walks a raw
//! `serde_json::Value` against that declaration and produces a [`Record`],
//! recursing into nested records and sequences.
//!
//! # Main Components
//!
//! - **Schema**: [`RecordSchema`] and its builder, collected in a read-only [`SchemaRegistry`]
//! - **Engine**: [`convert`] / [`convert_record`], one recursive code path for every depth
//! - **Converters**: the [`Converter`] capability and [`built_in`] scalar converters
//! - **Pipelines**: [`pipe`] and [`try_pipe`] for composing unary steps
//! - **Loader**: record declarations from YAML or JSON documents
//! - **Errors**: categorized [`ConversionError`]s located by [`FieldPath`]
//!
//! # Example
//!
//! ```
//! use marshale_core::{built_in, FieldType, RecordSchema, SchemaRegistry};
//! use serde_json::json;
//!
//! let foo = RecordSchema::builder("Foo")
//!     .field("bar", FieldType::leaf(built_in::integer()))
//!     .field("baz", FieldType::sequence(FieldType::leaf(built_in::integer())))
//!     .field("id", FieldType::leaf(built_in::integer()))
//!     .build()?;
//!
//! let registry = SchemaRegistry::builder().register(foo)?.build_validated()?;
//!
//! let record = registry.convert_record(
//!     "Foo",
//!     &json!({"bar": "5", "baz": ["1", "2", "7", "3"], "id": "42"}),
//! )?;
//! assert_eq!(record.to_json(), json!({"bar": 5, "baz": [1, 2, 7, 3], "id": 42}));
//! # Ok::<(), marshale_core::Error>(())
//! ```
//!
//! Copyright (c) 2025 Marshale Team
//! Licensed under the Apache-2.0 license

pub mod built_in;
pub mod converter;
pub mod engine;
pub mod error;
pub mod loader;
pub mod path;
pub mod pipe;
pub mod record;
pub mod registry;
pub mod schema;

#[cfg(test)]
mod proptest_strategies;

pub use converter::{from_fn, Converter, ConverterSet, SharedConverter};
pub use engine::{convert, convert_record};
pub use error::{ConversionError, ConverterError, Error, ErrorKind, Result, SchemaError, Shape};
pub use loader::{Format, LoaderError, SchemaLoader};
pub use path::{FieldPath, PathSegment};
pub use pipe::{pipe, try_pipe};
pub use record::{FieldValue, Record};
pub use registry::{SchemaRegistry, SchemaRegistryBuilder};
pub use schema::{FieldDescriptor, FieldType, RecordSchema, RecordSchemaBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
