use std::collections::HashMap;

use serde_json::Value;

use crate::error::{EngineError, EngineResult};

pub(crate) const REQUIRED_COLUMNS: [&str; 6] = [
    "department",
    "supplier",
    "amount",
    "date",
    "expense_type",
    "description",
];

pub(crate) const OPTIONAL_COLUMNS: [&str; 1] = ["reference"];

#[derive(Debug, Clone)]
pub(crate) struct ParsedRow {
    pub(crate) row: i64,
    pub(crate) department: Option<String>,
    pub(crate) supplier: Option<String>,
    pub(crate) amount: Option<String>,
    pub(crate) date: Option<String>,
    pub(crate) expense_type: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) reference: Option<String>,
}

pub(crate) fn parse_source(content: &str) -> EngineResult<Vec<ParsedRow>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_argument(
            "Ledger source is empty. Provide a JSON array or CSV with headers.",
        ));
    }

    if looks_like_ndjson(trimmed) {
        return Err(EngineError::invalid_ledger_format(
            "NDJSON is not supported. Provide a JSON array or CSV.",
            "ndjson",
        ));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed);
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(EngineError::invalid_ledger_format(
            "JSON input must be a top-level array of transaction objects.",
            "json_non_array",
        ));
    }

    Err(EngineError::invalid_ledger_format(
        "Unsupported ledger format. Provide a JSON array or CSV with headers.",
        "unknown",
    ))
}

fn parse_json_array(content: &str) -> EngineResult<Vec<ParsedRow>> {
    let parsed = serde_json::from_str::<Value>(content).map_err(|_| {
        EngineError::invalid_argument("Invalid JSON input. Provide a valid JSON array.")
    })?;

    let Some(items) = parsed.as_array() else {
        return Err(EngineError::invalid_argument(
            "JSON input must be a top-level array of transaction objects.",
        ));
    };

    let mut rows = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(EngineError::invalid_argument(
                "JSON array entries must all be objects with transaction fields.",
            ));
        };

        rows.push(ParsedRow {
            row: (index as i64) + 1,
            department: read_optional_string(object.get("department")),
            supplier: read_optional_string(object.get("supplier")),
            amount: read_optional_string(object.get("amount")),
            date: read_optional_string(object.get("date")),
            expense_type: read_optional_string(object.get("expense_type")),
            description: read_optional_string(object.get("description")),
            reference: read_optional_string(object.get("reference")),
        });
    }

    Ok(rows)
}

fn parse_csv(content: &str) -> EngineResult<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| EngineError::invalid_argument("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    // The input contract names the required columns "at minimum": extra
    // source columns are tolerated and ignored, missing ones are fatal.
    let missing = REQUIRED_COLUMNS
        .iter()
        .any(|required| !headers.iter().any(|header| header == required));
    if missing {
        return Err(EngineError::ledger_schema_mismatch(
            REQUIRED_COLUMNS.iter().map(|value| value.to_string()).collect(),
            OPTIONAL_COLUMNS.iter().map(|value| value.to_string()).collect(),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row
            .map_err(|_| EngineError::invalid_argument("CSV rows are malformed or not UTF-8."))?;

        rows.push(ParsedRow {
            row: (row_index as i64) + 1,
            department: value_for(&record, &index_by_name, "department"),
            supplier: value_for(&record, &index_by_name, "supplier"),
            amount: value_for(&record, &index_by_name, "amount"),
            date: value_for(&record, &index_by_name, "date"),
            expense_type: value_for(&record, &index_by_name, "expense_type"),
            description: value_for(&record, &index_by_name, "description"),
            reference: value_for(&record, &index_by_name, "reference"),
        });
    }

    Ok(rows)
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> Option<String> {
    let index = index_by_name.get(field_name)?;
    let value = record.get(*index)?;
    Some(value.to_string())
}

fn read_optional_string(value: Option<&Value>) -> Option<String> {
    let current = value?;

    if current.is_null() {
        return None;
    }

    if let Some(string_value) = current.as_str() {
        return Some(string_value.to_string());
    }

    if let Some(number_value) = current.as_f64() {
        return Some(number_value.to_string());
    }

    Some(current.to_string())
}

fn looks_like_ndjson(content: &str) -> bool {
    let lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();
    if lines.len() < 2 {
        return false;
    }

    lines.iter().all(|line| {
        let parsed = serde_json::from_str::<Value>(line.trim());
        if let Ok(value) = parsed {
            return value.is_object();
        }
        false
    })
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}

#[cfg(test)]
mod tests {
    use super::parse_source;

    #[test]
    fn csv_with_required_headers_parses_rows() {
        let content = "department,supplier,amount,date,expense_type,description\n\
                       HMRC,ACME LTD,100.00,2025-01-01,Desktop Services,laptops\n";

        let parsed = parse_source(content);
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].department.as_deref(), Some("HMRC"));
            assert_eq!(rows[0].amount.as_deref(), Some("100.00"));
        }
    }

    #[test]
    fn extra_source_columns_are_tolerated() {
        let content = "department,supplier,amount,date,expense_type,description,entity,postcode\n\
                       HMRC,ACME LTD,100.00,2025-01-01,,,HMRC Core,AB1 2CD\n";

        let parsed = parse_source(content);
        assert!(parsed.is_ok());
    }

    #[test]
    fn missing_required_column_is_a_schema_mismatch() {
        let content = "department,supplier,amount,date,expense_type\n\
                       HMRC,ACME LTD,100.00,2025-01-01,Desktop Services\n";

        let parsed = parse_source(content);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "ledger_schema_mismatch");
        }
    }

    #[test]
    fn json_array_parses_rows() {
        let content = r#"[
            {"department": "DfT", "supplier": "RAILCO", "amount": -42.15,
             "date": "2025-02-01", "expense_type": "Research", "description": "study"}
        ]"#;

        let parsed = parse_source(content);
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].supplier.as_deref(), Some("RAILCO"));
            assert_eq!(rows[0].amount.as_deref(), Some("-42.15"));
        }
    }

    #[test]
    fn ndjson_is_rejected_with_format_error() {
        let content = "{\"department\": \"HMRC\"}\n{\"department\": \"DfT\"}\n";
        let parsed = parse_source(content);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("NDJSON"));
        }
    }

    #[test]
    fn non_array_json_is_rejected() {
        let parsed = parse_source("{\"rows\": []}");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert!(error.message.contains("top-level array"));
        }
    }

    #[test]
    fn empty_source_is_rejected() {
        let parsed = parse_source("   \n  ");
        assert!(parsed.is_err());
    }
}
