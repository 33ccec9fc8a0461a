//! Check command handler

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use marshale_core::RecordSchema;
use serde::Serialize;
use tracing::instrument;

/// One declared record type as listed by `check`
#[derive(Debug, Serialize)]
struct RecordSummary {
    type_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    fields: Vec<FieldSummary>,
}

#[derive(Debug, Serialize)]
struct FieldSummary {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl From<&RecordSchema> for RecordSummary {
    fn from(schema: &RecordSchema) -> Self {
        Self {
            type_id: schema.type_id().to_string(),
            description: schema.description().map(str::to_string),
            fields: schema
                .fields()
                .iter()
                .map(|field| FieldSummary {
                    name: field.name.clone(),
                    field_type: field.field_type.to_string(),
                    description: field.description.clone(),
                })
                .collect(),
        }
    }
}

/// Handle the check command
#[instrument(skip(_config, output), fields(schema = %args.schema.display()))]
pub fn handle_check(args: CheckArgs, _config: &Config, output: &mut OutputWriter) -> Result<()> {
    let registry = super::load_registry(&args.schema)?;
    let summaries: Vec<RecordSummary> = registry.schemas().map(RecordSummary::from).collect();

    if !output.format().is_human() {
        return output.data(&summaries);
    }

    output.success(&format!(
        "✓ {} record type(s) declared in {}",
        summaries.len(),
        args.schema.display()
    ))?;

    for summary in &summaries {
        let title = match &summary.description {
            Some(description) => format!("{} ({})", summary.type_id, description),
            None => summary.type_id.clone(),
        };
        output.section(&title)?;

        let rows = summary
            .fields
            .iter()
            .map(|field| vec![field.name.clone(), field.field_type.clone()])
            .collect();
        output.table(&["Field", "Type"], rows)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::error::Error;
    use crate::handlers::test_files::{write, ORDER_YAML};
    use crate::output::tests::Captured;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_check_lists_records_as_json() {
        let dir = TempDir::new().unwrap();
        let schema = write(&dir, "orders.yaml", ORDER_YAML);

        let captured = Captured::default();
        let mut output = captured.writer(OutputFormat::Json, false);
        handle_check(CheckArgs { schema }, &Config::default(), &mut output).unwrap();

        let listed: serde_json::Value = serde_json::from_str(captured.text().trim()).unwrap();
        assert_eq!(
            listed,
            json!([
                {"type_id": "Order", "fields": [
                    {"name": "id", "type": "integer"},
                    {"name": "owner", "type": "User"},
                    {"name": "quantities", "type": "[integer]"}
                ]},
                {"type_id": "User", "description": "Account holder", "fields": [
                    {"name": "name", "type": "string"},
                    {"name": "age", "type": "nullable_integer"}
                ]}
            ])
        );
    }

    #[test]
    fn test_check_human_output() {
        let dir = TempDir::new().unwrap();
        let schema = write(&dir, "orders.yaml", ORDER_YAML);

        let captured = Captured::default();
        let mut output = captured.writer(OutputFormat::Human, false);
        handle_check(CheckArgs { schema }, &Config::default(), &mut output).unwrap();

        let text = captured.text();
        assert!(text.contains("2 record type(s) declared"));
        assert!(text.contains("=== User (Account holder) ==="));
        assert!(text.contains("quantities │ [integer]"));
    }

    #[test]
    fn test_check_rejects_dangling_reference() {
        let dir = TempDir::new().unwrap();
        let schema = write(
            &dir,
            "bad.yaml",
            "records:\n  Order:\n    fields:\n      - name: owner\n        type: Customer\n",
        );

        let captured = Captured::default();
        let mut output = captured.writer(OutputFormat::Human, false);
        let err = handle_check(CheckArgs { schema }, &Config::default(), &mut output).unwrap_err();
        assert!(matches!(err, Error::Loader(_)));
        assert!(err.to_string().contains("unregistered type 'Customer'"));
    }
}
