//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand
//! and the file handling they share.

mod check;
mod convert;

pub use check::handle_check;
pub use convert::handle_convert;

use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use marshale_core::loader::DocumentParser;
use marshale_core::{SchemaLoader, SchemaRegistry};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Load and validate a declaration file
pub(crate) fn load_registry(path: &Path) -> Result<SchemaRegistry> {
    let _timer = Timer::with_details("load_declarations", &path.display().to_string());

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let registry = SchemaLoader::new().load_file(path)?;
    info!(path = %path.display(), records = registry.len(), "Declarations loaded");
    Ok(registry)
}

/// Read a raw input document from a file, or JSON from stdin when `path` is `None`
pub(crate) fn read_input(path: Option<&Path>) -> Result<Value> {
    let parser = DocumentParser::new();

    match path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            debug!(path = %path.display(), "Reading input file");
            Ok(parser.parse_file(path)?)
        }
        None => {
            debug!("Reading input from stdin");
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(parser.parse_json(&content, Path::new("<stdin>"))?)
        }
    }
}
