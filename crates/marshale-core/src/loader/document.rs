//! Declaration documents and their translation into a registry
//!
//! ```yaml
//! records:
//!   Foo:
//!     fields:
//!       - name: bar
//!         type: integer
//!       - name: baz
//!         type: [integer]
//!       - name: owner
//!         type: User
//! ```
//!
//! A string type expression that names a converter in the loader's
//! [`ConverterSet`] is a leaf; any other string is a record reference. A
//! one-element list is a sequence of its element.
//!
//! Copyright (c) 2025 Marshale Team
//! Licensed under the Apache-2.0 license

use crate::converter::ConverterSet;
use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::parser::{DocumentParser, Format};
use crate::registry::{SchemaRegistry, SchemaRegistryBuilder};
use crate::schema::{FieldDescriptor, FieldType, RecordSchema};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Top-level declaration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaDocument {
    #[serde(deserialize_with = "null_as_empty")]
    pub records: BTreeMap<String, RecordDecl>,
}

/// `records:` with no value declares nothing
fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, RecordDecl>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// One record type declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

/// One field declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: TypeDecl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Type expression as written in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
    /// Converter name or record type id
    Named(String),
    /// Must hold exactly one element
    Sequence(Vec<TypeDecl>),
}

impl fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDecl::Named(name) => write!(f, "{}", name),
            TypeDecl::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Builds a [`SchemaRegistry`] from declaration documents
#[derive(Debug)]
pub struct SchemaLoader {
    converters: ConverterSet,
    parser: DocumentParser,
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLoader {
    /// A loader that knows the built-in converters
    pub fn new() -> Self {
        Self::with_converters(ConverterSet::built_in())
    }

    pub fn with_converters(converters: ConverterSet) -> Self {
        Self {
            converters,
            parser: DocumentParser::new(),
        }
    }

    pub fn converters(&self) -> &ConverterSet {
        &self.converters
    }

    /// Load and validate a YAML or JSON declaration file
    pub fn load_file(&self, path: &Path) -> LoaderResult<SchemaRegistry> {
        info!(path = %path.display(), "Loading record declarations");
        let value = self.parser.parse_file(path)?;
        self.load_value(&value, path)
    }

    /// Load declarations from in-memory text
    pub fn load_str(&self, content: &str, format: Format) -> LoaderResult<SchemaRegistry> {
        let path = PathBuf::from("<inline>");
        let value = self.parser.parse_content(content, format, &path)?;
        self.load_value(&value, &path)
    }

    /// Load declarations from an already parsed document
    ///
    /// An empty document (YAML with no content parses to null) declares no
    /// records. A document that parsed but does not have the declaration
    /// layout is an [`LoaderError::InvalidDeclaration`] at `records`.
    pub fn load_value(&self, value: &Value, path: &Path) -> LoaderResult<SchemaRegistry> {
        let document = match value {
            Value::Null => SchemaDocument::default(),
            _ => serde_json::from_value(value.clone()).map_err(|e| {
                LoaderError::invalid_declaration(path.to_path_buf(), "records", e.to_string())
            })?,
        };
        self.load_document(&document, path)
    }

    pub fn load_document(
        &self,
        document: &SchemaDocument,
        path: &Path,
    ) -> LoaderResult<SchemaRegistry> {
        let mut builder = SchemaRegistryBuilder::new();

        for (type_id, decl) in &document.records {
            if self.converters.contains(type_id) {
                return Err(LoaderError::invalid_declaration(
                    path.to_path_buf(),
                    format!("records.{}", type_id),
                    format!("record type id '{}' collides with a converter name", type_id),
                ));
            }

            let schema = self.build_record(type_id, decl, path)?;
            debug!(type_id = %type_id, fields = schema.fields().len(), "Declared record type");
            builder
                .insert(schema)
                .map_err(|e| LoaderError::schema(path.to_path_buf(), e))?;
        }

        let registry = builder
            .build_validated()
            .map_err(|e| LoaderError::schema(path.to_path_buf(), e))?;
        info!(records = registry.len(), "Record declarations loaded");
        Ok(registry)
    }

    fn build_record(
        &self,
        type_id: &str,
        decl: &RecordDecl,
        path: &Path,
    ) -> LoaderResult<RecordSchema> {
        let mut builder = RecordSchema::builder(type_id);
        if let Some(description) = &decl.description {
            builder = builder.description(description.clone());
        }

        for field in &decl.fields {
            let location = format!("records.{}.{}", type_id, field.name);
            let field_type = self.resolve_type(&field.field_type, &location, path)?;
            let mut descriptor = FieldDescriptor::new(field.name.clone(), field_type);
            descriptor.description = field.description.clone();
            builder = builder.descriptor(descriptor);
        }

        builder
            .build()
            .map_err(|e| LoaderError::schema(path.to_path_buf(), e))
    }

    /// Turn a type expression into a field type
    pub fn resolve_type(
        &self,
        decl: &TypeDecl,
        location: &str,
        path: &Path,
    ) -> LoaderResult<FieldType> {
        match decl {
            TypeDecl::Named(name) if name.is_empty() => Err(LoaderError::invalid_declaration(
                path.to_path_buf(),
                location,
                "type name must not be empty",
            )),
            TypeDecl::Named(name) => Ok(match self.converters.get(name) {
                Some(converter) => FieldType::Leaf(converter.clone()),
                None => FieldType::Record(name.clone()),
            }),
            TypeDecl::Sequence(items) => match items.as_slice() {
                [inner] => Ok(FieldType::sequence(self.resolve_type(inner, location, path)?)),
                _ => Err(LoaderError::invalid_declaration(
                    path.to_path_buf(),
                    location,
                    format!(
                        "sequence type must list exactly one element type, found {}",
                        items.len()
                    ),
                )),
            },
        }
    }
}
