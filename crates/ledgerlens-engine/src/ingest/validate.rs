use std::collections::HashSet;

use chrono::NaiveDate;

use crate::contracts::types::{IngestSummary, LedgerIssue};
use crate::error::{EngineError, EngineResult};
use crate::ingest::LoadedLedger;
use crate::ingest::parse::ParsedRow;
use crate::ledger::Transaction;

pub(crate) fn validate_rows(parsed_rows: Vec<ParsedRow>) -> EngineResult<LoadedLedger> {
    let total_rows = parsed_rows.len();
    let mut records = Vec::new();
    let mut issues = Vec::new();

    for raw in parsed_rows {
        let mut row_issues = Vec::new();

        let department = validate_required_string(
            raw.row,
            "department",
            raw.department,
            &mut row_issues,
            "department must be present and non-empty.",
        );
        let supplier = validate_required_string(
            raw.row,
            "supplier",
            raw.supplier,
            &mut row_issues,
            "supplier must be present and non-empty.",
        )
        .map(|value| value.to_uppercase());
        let amount = validate_amount(raw.row, raw.amount, &mut row_issues);
        let date = validate_date(raw.row, raw.date, &mut row_issues);
        let expense_type = clean_text(raw.expense_type);
        let description = clean_text(raw.description);
        let reference = normalize_optional(raw.reference);

        if row_issues.is_empty() {
            // Sources with no description field carry the expense type
            // there instead; an empty description is not an error.
            let description_value = if description.is_empty() {
                expense_type.clone()
            } else {
                description
            };

            records.push(Transaction {
                department: department.unwrap_or_default(),
                supplier: supplier.unwrap_or_default(),
                amount: amount.unwrap_or_default(),
                date: date.unwrap_or(NaiveDate::MIN),
                expense_type,
                description: description_value,
                reference,
            });
        } else {
            issues.extend(row_issues);
        }
    }

    let summary = IngestSummary {
        rows_read: total_rows as i64,
        rows_valid: records.len() as i64,
        rows_invalid: issues
            .iter()
            .map(|issue| issue.row)
            .collect::<HashSet<i64>>()
            .len() as i64,
    };

    if !issues.is_empty() {
        return Err(EngineError::ledger_validation_failed(summary, issues));
    }

    Ok(LoadedLedger { records, summary })
}

fn validate_required_string(
    row: i64,
    field: &str,
    value: Option<String>,
    issues: &mut Vec<LedgerIssue>,
    description: &str,
) -> Option<String> {
    let normalized = normalize_optional(value);
    if normalized.is_none() {
        issues.push(LedgerIssue {
            row,
            field: field.to_string(),
            code: "missing_required_field".to_string(),
            description: description.to_string(),
            expected: Some("non-empty string".to_string()),
            received: Some(String::new()),
        });
    }
    normalized
}

fn validate_amount(row: i64, value: Option<String>, issues: &mut Vec<LedgerIssue>) -> Option<f64> {
    let normalized = normalize_optional(value);
    let Some(raw) = normalized else {
        issues.push(LedgerIssue {
            row,
            field: "amount".to_string(),
            code: "missing_required_field".to_string(),
            description: "amount must be present and non-empty.".to_string(),
            expected: Some("number (e.g. -42.15)".to_string()),
            received: Some(String::new()),
        });
        return None;
    };

    // UK source extracts quote the amount column and carry currency
    // symbols and thousands separators.
    let cleaned = raw
        .chars()
        .filter(|character| !matches!(character, '£' | ',' | '"'))
        .collect::<String>();

    let Ok(amount) = cleaned.trim().parse::<f64>() else {
        issues.push(invalid_number_issue(row, &raw));
        return None;
    };
    if !amount.is_finite() {
        issues.push(invalid_number_issue(row, &raw));
        return None;
    }

    if let Some(scale) = fractional_digits(cleaned.trim())
        && scale > 2
    {
        issues.push(LedgerIssue {
            row,
            field: "amount".to_string(),
            code: "invalid_amount_scale".to_string(),
            description: format!(
                "amount must use at most 2 decimal places; got {scale} decimal places."
            ),
            expected: Some("number with <= 2 decimal places (e.g. -42.15)".to_string()),
            received: Some(raw),
        });
        return None;
    }

    Some(amount)
}

fn invalid_number_issue(row: i64, received: &str) -> LedgerIssue {
    LedgerIssue {
        row,
        field: "amount".to_string(),
        code: "invalid_number".to_string(),
        description: format!("amount must be numeric; got \"{received}\""),
        expected: Some("number (e.g. -42.15)".to_string()),
        received: Some(received.to_string()),
    }
}

// Counts digits after the decimal point in plain decimal notation. Inputs
// in exponent notation already passed the numeric parse and are left to it.
fn fractional_digits(value: &str) -> Option<usize> {
    if value.contains(['e', 'E']) {
        return None;
    }

    let mantissa = value
        .strip_prefix('+')
        .or_else(|| value.strip_prefix('-'))
        .unwrap_or(value);
    let mut parts = mantissa.split('.');
    let _whole = parts.next()?;
    let fractional = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    Some(fractional.len())
}

fn validate_date(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<LedgerIssue>,
) -> Option<NaiveDate> {
    let normalized = normalize_optional(value);
    let Some(candidate) = normalized else {
        issues.push(LedgerIssue {
            row,
            field: "date".to_string(),
            code: "missing_required_field".to_string(),
            description: "date must be present and non-empty.".to_string(),
            expected: Some("YYYY-MM-DD or DD/MM/YYYY".to_string()),
            received: Some(String::new()),
        });
        return None;
    };

    // ISO first; UK departmental extracts publish DD/MM/YYYY.
    let parsed = NaiveDate::parse_from_str(&candidate, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&candidate, "%d/%m/%Y"));
    match parsed {
        Ok(date) => Some(date),
        Err(_) => {
            issues.push(LedgerIssue {
                row,
                field: "date".to_string(),
                code: "invalid_date".to_string(),
                description: format!(
                    "date must be YYYY-MM-DD or DD/MM/YYYY; got \"{candidate}\""
                ),
                expected: Some("YYYY-MM-DD or DD/MM/YYYY".to_string()),
                received: Some(candidate),
            });
            None
        }
    }
}

// Trims and strips the '#' placeholder some source systems leave in free
// text. Used for the two fields that may legitimately be empty.
fn clean_text(value: Option<String>) -> String {
    let Some(raw) = value else {
        return String::new();
    };
    raw.trim().replace('#', "").trim().to_string()
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    let raw = value?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::ingest::parse::ParsedRow;

    use super::validate_rows;

    fn parsed(amount: &str, date: &str) -> ParsedRow {
        ParsedRow {
            row: 1,
            department: Some("HMRC".to_string()),
            supplier: Some("  Acme Ltd ".to_string()),
            amount: Some(amount.to_string()),
            date: Some(date.to_string()),
            expense_type: Some("Desktop Services".to_string()),
            description: Some(" managed laptops #".to_string()),
            reference: None,
        }
    }

    #[test]
    fn valid_row_is_normalized() {
        let validated = validate_rows(vec![parsed("£1,234.50", "31/01/2025")]);
        assert!(validated.is_ok());
        if let Ok(loaded) = validated {
            assert_eq!(loaded.records.len(), 1);
            let record = &loaded.records[0];
            assert_eq!(record.supplier, "ACME LTD");
            assert!((record.amount - 1234.5).abs() < f64::EPSILON);
            assert_eq!(
                Some(record.date),
                NaiveDate::from_ymd_opt(2025, 1, 31)
            );
            assert_eq!(record.description, "managed laptops");
            assert_eq!(loaded.summary.rows_valid, 1);
        }
    }

    #[test]
    fn iso_dates_are_accepted() {
        let validated = validate_rows(vec![parsed("10.00", "2025-01-31")]);
        assert!(validated.is_ok());
    }

    #[test]
    fn empty_description_falls_back_to_expense_type() {
        let mut row = parsed("10.00", "2025-01-31");
        row.description = None;

        let validated = validate_rows(vec![row]);
        assert!(validated.is_ok());
        if let Ok(loaded) = validated {
            assert_eq!(loaded.records[0].description, "Desktop Services");
        }
    }

    #[test]
    fn non_numeric_amount_fails_the_batch_with_issue_details() {
        let validated = validate_rows(vec![parsed("ten pounds", "2025-01-31")]);
        assert!(validated.is_err());
        if let Err(error) = validated {
            assert_eq!(error.code, "ledger_validation_failed");
            let data = error.data.unwrap_or_default();
            let issues = data["issues"].as_array().cloned().unwrap_or_default();
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0]["code"], "invalid_number");
            assert_eq!(issues[0]["field"], "amount");
        }
    }

    #[test]
    fn three_decimal_places_are_rejected() {
        let validated = validate_rows(vec![parsed("10.005", "2025-01-31")]);
        assert!(validated.is_err());
        if let Err(error) = validated {
            let data = error.data.unwrap_or_default();
            let issues = data["issues"].as_array().cloned().unwrap_or_default();
            assert_eq!(issues[0]["code"], "invalid_amount_scale");
        }
    }

    #[test]
    fn unparseable_date_is_an_invalid_date_issue() {
        let validated = validate_rows(vec![parsed("10.00", "2025-13-40")]);
        assert!(validated.is_err());
        if let Err(error) = validated {
            let data = error.data.unwrap_or_default();
            let issues = data["issues"].as_array().cloned().unwrap_or_default();
            assert_eq!(issues[0]["code"], "invalid_date");
        }
    }

    #[test]
    fn missing_department_and_supplier_report_one_invalid_row() {
        let mut row = parsed("10.00", "2025-01-31");
        row.department = None;
        row.supplier = Some("   ".to_string());

        let validated = validate_rows(vec![row]);
        assert!(validated.is_err());
        if let Err(error) = validated {
            let data = error.data.unwrap_or_default();
            assert_eq!(data["summary"]["rows_invalid"], 1);
            let issues = data["issues"].as_array().cloned().unwrap_or_default();
            assert_eq!(issues.len(), 2);
        }
    }

    #[test]
    fn empty_input_yields_empty_records() {
        let validated = validate_rows(Vec::new());
        assert!(validated.is_ok());
        if let Ok(loaded) = validated {
            assert!(loaded.records.is_empty());
            assert_eq!(loaded.summary.rows_read, 0);
        }
    }
}
