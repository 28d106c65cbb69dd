mod parse;
mod validate;

use std::fs;
use std::io::Read;

use crate::contracts::types::IngestSummary;
use crate::error::{EngineError, EngineResult};
use crate::ledger::Transaction;

pub(crate) struct LoadedLedger {
    pub(crate) records: Vec<Transaction>,
    pub(crate) summary: IngestSummary,
}

/// Read, parse, and validate one ledger source into normalized records.
/// Any row failing validation aborts the whole batch: partial ingestion
/// would silently skew every downstream share and threshold.
pub(crate) fn load_records(
    path: &str,
    stdin_override: Option<&str>,
) -> EngineResult<LoadedLedger> {
    let content = read_source(path, stdin_override)?;
    let parsed = parse::parse_source(&content)?;
    let loaded = validate::validate_rows(parsed)?;

    tracing::info!(
        rows = loaded.records.len(),
        source = path,
        "ledger loaded and validated"
    );
    Ok(loaded)
}

fn read_source(path: &str, stdin_override: Option<&str>) -> EngineResult<String> {
    if path == "-" {
        if let Some(content) = stdin_override {
            return Ok(content.to_string());
        }
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|error| EngineError::ledger_read_failed("-", &error.to_string()))?;
        return Ok(buffer);
    }

    fs::read_to_string(path).map_err(|error| EngineError::ledger_read_failed(path, &error.to_string()))
}
