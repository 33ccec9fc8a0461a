//! Loading record declarations from YAML and JSON documents
//!
//! This module provides:
//! - Format detection and parsing into `serde_json::Value`
//! - The declaration document layout ([`SchemaDocument`])
//! - [`SchemaLoader`], which resolves type expressions against a
//!   [`ConverterSet`](crate::ConverterSet) and validates the resulting registry
//!
//! Copyright (c) 2025 Marshale Team
//! Licensed under the Apache-2.0 license

pub mod document;
pub mod error;
pub mod parser;

pub use document::{FieldDecl, RecordDecl, SchemaDocument, SchemaLoader, TypeDecl};
pub use error::{LoaderError, LoaderResult};
pub use parser::{DocumentParser, Format};
