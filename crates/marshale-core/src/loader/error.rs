//! Error types for declaration loading
//!
//! Copyright (c) 2025 Marshale Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Failures while reading a declaration document into a registry
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// A record or field declaration is malformed
    #[error("Invalid declaration in '{path}' at {location}: {reason}")]
    InvalidDeclaration {
        path: PathBuf,
        location: String,
        reason: String,
    },

    /// The declarations parsed but the registry rejected them
    #[error("Invalid schema in '{path}': {source}")]
    Schema {
        path: PathBuf,
        source: SchemaError,
    },
}

impl LoaderError {
    pub fn io(path: PathBuf, error: std::io::Error) -> Self {
        Self::Io { path, source: error }
    }

    pub fn yaml_parse(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParse { path, source: error }
    }

    pub fn json_parse(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParse { path, source: error }
    }

    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    pub fn invalid_declaration<L, R>(path: PathBuf, location: L, reason: R) -> Self
    where
        L: Into<String>,
        R: Into<String>,
    {
        Self::InvalidDeclaration {
            path,
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn schema(path: PathBuf, error: SchemaError) -> Self {
        Self::Schema { path, source: error }
    }

    /// The document this error refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. }
            | Self::YamlParse { path, .. }
            | Self::JsonParse { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::InvalidDeclaration { path, .. }
            | Self::Schema { path, .. } => path,
        }
    }
}
