use std::io;

use serde_json::Value;

use super::format;

pub fn render_quality(data: &Value) -> io::Result<String> {
    let report = data
        .get("report")
        .ok_or_else(|| io::Error::other("quality output requires a report"))?;
    let total = report.get("total_rows").and_then(Value::as_i64).unwrap_or(0);
    let metrics = report.get("metrics").cloned().unwrap_or(Value::Null);

    let mut lines = vec![match data.get("path").and_then(Value::as_str) {
        Some(path) => format!("Quality check over {total} transactions from {path}."),
        None => format!("Quality check over {total} transactions."),
    }];

    let warnings = report
        .get("warnings")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    lines.push(String::new());
    if warnings.is_empty() {
        lines.push("No warnings.".to_string());
    } else {
        lines.push("Warnings:".to_string());
        for warning in &warnings {
            lines.push(format!("  - {}", warning.as_str().unwrap_or("unknown")));
        }
    }

    let mut entries: Vec<(&str, String)> = Vec::new();
    if let Some(range) = metrics.get("date_range") {
        entries.push((
            "Data covers:",
            format!(
                "{} to {}",
                range.get("start").and_then(Value::as_str).unwrap_or("unknown"),
                range.get("end").and_then(Value::as_str).unwrap_or("unknown")
            ),
        ));
    }
    entries.push((
        "Unique suppliers:",
        int_metric(&metrics, "unique_suppliers"),
    ));
    entries.push((
        "Negative amounts:",
        int_metric(&metrics, "negative_amounts"),
    ));
    entries.push(("Zero amounts:", int_metric(&metrics, "zero_amounts")));

    if let Some(description) = metrics.get("description_quality") {
        let useful = description.get("useful").and_then(Value::as_i64).unwrap_or(0);
        let useful_pct = description
            .get("useful_pct")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        entries.push((
            "Useful descriptions:",
            format!("{useful}/{total} ({useful_pct:.1}%)"),
        ));
    }

    if let Some(references) = metrics.get("duplicate_references") {
        let repeated = references
            .get("repeated_ids")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        let occurrences = references
            .get("occurrences")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        entries.push((
            "Repeated references:",
            format!("{repeated} IDs ({occurrences} occurrences)"),
        ));
    }

    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.extend(format::key_value_rows(&entries, 2));

    let departments = metrics
        .get("departments")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !departments.is_empty() {
        lines.push(String::new());
        lines.push("Departments:".to_string());
        let rows = departments
            .iter()
            .map(|entry| {
                (
                    entry
                        .get("department")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                        .to_string(),
                    entry.get("count").and_then(Value::as_i64).unwrap_or(0),
                )
            })
            .collect::<Vec<(String, i64)>>();
        for (department, count) in rows {
            lines.push(format!("  {department}: {count}"));
        }
    }

    if let Some(stats) = metrics.get("amount_stats") {
        lines.push(String::new());
        lines.push("Amounts:".to_string());
        lines.extend(format::key_value_rows(
            &[
                ("Min:", float_field(stats, "min")),
                ("Median:", float_field(stats, "median")),
                ("95th percentile:", float_field(stats, "percentile_95")),
                ("Max:", float_field(stats, "max")),
                ("Total:", float_field(stats, "total")),
            ],
            2,
        ));
    }

    Ok(lines.join("\n"))
}

fn int_metric(metrics: &Value, key: &str) -> String {
    metrics
        .get(key)
        .and_then(Value::as_i64)
        .unwrap_or(0)
        .to_string()
}

fn float_field(value: &Value, key: &str) -> String {
    format!("{:.2}", value.get(key).and_then(Value::as_f64).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_quality;

    #[test]
    fn renders_warnings_and_metric_sections() {
        let data = json!({
            "path": "ledger.csv",
            "report": {
                "total_rows": 4,
                "warnings": ["Zero amounts: 1 (25.00%)"],
                "metrics": {
                    "date_range": {"start": "2025-01-01", "end": "2025-03-01"},
                    "unique_suppliers": 3,
                    "negative_amounts": 0,
                    "zero_amounts": 1,
                    "description_quality": {"useful": 3, "useful_pct": 75.0},
                    "duplicate_references": {"repeated_ids": 1, "occurrences": 2},
                    "departments": [{"department": "HMRC", "count": 4}],
                    "amount_stats": {"min": 0.0, "median": 50.0, "percentile_95": 99.0,
                                      "max": 100.0, "total": 200.0}
                }
            }
        });

        let rendered = render_quality(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Quality check over 4 transactions from ledger.csv."));
            assert!(text.contains("- Zero amounts: 1 (25.00%)"));
            assert!(text.contains("Data covers:"));
            assert!(text.contains("2025-01-01 to 2025-03-01"));
            assert!(text.contains("HMRC: 4"));
            assert!(text.contains("95th percentile:"));
        }
    }

    #[test]
    fn clean_report_renders_no_warnings_line() {
        let data = json!({
            "report": {"total_rows": 0, "warnings": [], "metrics": {}}
        });

        let rendered = render_quality(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("No warnings."));
        }
    }
}
