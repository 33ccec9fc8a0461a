//! Convert command handler

use crate::cli::ConvertArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use marshale_core::{ConversionError, ErrorKind};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Machine-readable description of a failed conversion
#[derive(Debug, Serialize)]
struct FailureReport {
    kind: ErrorKind,
    path: String,
    message: String,
}

impl From<&ConversionError> for FailureReport {
    fn from(err: &ConversionError) -> Self {
        Self {
            kind: err.kind(),
            path: err.path().to_string(),
            message: err.to_string(),
        }
    }
}

/// Handle the convert command
#[instrument(skip(args, config, output), fields(type_id = %args.type_id))]
pub fn handle_convert(args: ConvertArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("convert_command", &args.type_id);

    let schema_path = args
        .schema
        .clone()
        .or_else(|| config.schema.clone())
        .ok_or_else(|| {
            Error::invalid_args(
                "no declaration file given; pass --schema or set `schema` in the config file",
            )
        })?;

    let registry = super::load_registry(&schema_path)?;
    if !registry.contains(&args.type_id) {
        return Err(Error::UnknownRecordType {
            type_id: args.type_id.clone(),
            schema: schema_path,
        });
    }

    let input = if args.reads_stdin() {
        None
    } else {
        args.input.as_deref()
    };
    let raw = super::read_input(input)?;

    output.info(&format!(
        "Converting {} into '{}'",
        input.map(|p| p.display().to_string()).unwrap_or_else(|| "stdin".to_string()),
        args.type_id
    ))?;

    match registry.convert_record(&args.type_id, &raw) {
        Ok(record) => {
            info!(
                fields = record.len(),
                duration_ms = timer.elapsed().as_millis() as u64,
                "Record converted"
            );
            output.success(&format!(
                "✓ Converted '{}' ({} fields)",
                record.type_id(),
                record.len()
            ))?;
            output.data(&record)
        }
        Err(err) => {
            warn!(kind = %err.kind(), path = %err.path(), "Conversion failed");
            output.error("✗ Conversion failed")?;
            if !output.format().is_human() {
                output.data(&FailureReport::from(&err))?;
            }
            Err(err.into())
        }
    }
}
