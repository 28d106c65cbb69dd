use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::{IngestSummary, LedgerIssue};

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EngineError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl EngineError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `ledgerlens {cmd} --help` for usage."),
            None => "Run `ledgerlens --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    /// Configuration problems are fatal before any batch runs: silently
    /// mis-tagging records is worse than refusing to start.
    pub fn invalid_configuration(message: &str) -> Self {
        Self::new(
            "invalid_configuration",
            message,
            vec![
                "Fix the classification/threshold configuration and rerun.".to_string(),
                "Category names must come from the declared taxonomy; thresholds must cover every known department.".to_string(),
            ],
        )
    }

    pub fn invalid_ledger_format(message: &str, received_format: &str) -> Self {
        Self::invalid_argument_with_recovery(
            message,
            vec![
                "Provide a supported ledger format (JSON array or CSV with headers).".to_string(),
                "Run `ledgerlens classify --help` to review the expected columns.".to_string(),
            ],
        )
        .with_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_array", "csv"],
        }))
    }

    pub fn ledger_schema_mismatch(
        required_headers: Vec<String>,
        optional_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        Self::new(
            "ledger_schema_mismatch",
            "Ledger columns do not satisfy the input contract.",
            vec![
                "Include every required column; optional columns may be omitted.".to_string(),
                "Run `ledgerlens classify --help` to review required and optional columns."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "required_headers": required_headers,
            "optional_headers": optional_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn ledger_validation_failed(summary: IngestSummary, issues: Vec<LedgerIssue>) -> Self {
        let issue_count = summary.rows_invalid;
        Self::new(
            "ledger_validation_failed",
            &format!("Ledger failed validation: {issue_count} rows need fixes. Nothing was analysed."),
            vec![
                "Fix the listed issues in your source file.".to_string(),
                "Rerun the command once the rows validate.".to_string(),
            ],
        )
        .with_data(json!({
            "summary": summary,
            "issues": issues,
        }))
    }

    pub fn ledger_read_failed(path: &str, detail: &str) -> Self {
        Self::new(
            "ledger_read_failed",
            &format!("Cannot read ledger source `{path}`: {detail}"),
            vec![format!("Check that `{path}` exists and is readable, then retry.")],
        )
    }

    pub fn output_write_failed(path: &str, detail: &str) -> Self {
        Self::new(
            "output_write_failed",
            &format!("Cannot write output `{path}`: {detail}"),
            vec![format!("Grant write access to `{path}` or choose another output location.")],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
