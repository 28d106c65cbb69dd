use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_anomalies(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("anomalies output requires rows"))?;

    let total_transactions = data
        .get("total_transactions")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    if rows.is_empty() {
        return Ok([
            format!("No anomalies detected across {total_transactions} transactions."),
            String::new(),
            "Every payment sits inside the configured thresholds. Widen the".to_string(),
            "duplicate window or lower the concentration thresholds to dig deeper.".to_string(),
        ]
        .join("\n"));
    }

    let mut lines = vec![format!(
        "{} anomalies detected across {total_transactions} transactions.",
        rows.len()
    )];

    if let Some(summary) = data.get("summary") {
        let by_type = named_counts(summary, "by_type");
        if !by_type.is_empty() {
            lines.push(String::new());
            lines.push("By type:".to_string());
            lines.extend(format::key_value_rows(&by_type, 2));
        }
        let by_severity = named_counts(summary, "by_severity");
        if !by_severity.is_empty() {
            lines.push(String::new());
            lines.push("By severity:".to_string());
            lines.extend(format::key_value_rows(&by_severity, 2));
        }
    }

    lines.push(String::new());
    lines.push("Findings:".to_string());

    let columns = [
        Column {
            name: "Type",
            align: Align::Left,
        },
        Column {
            name: "Severity",
            align: Align::Left,
        },
        Column {
            name: "Department",
            align: Align::Left,
        },
        Column {
            name: "Supplier",
            align: Align::Left,
        },
        Column {
            name: "Amount (£)",
            align: Align::Right,
        },
        Column {
            name: "Count",
            align: Align::Right,
        },
        Column {
            name: "Details",
            align: Align::Left,
        },
    ];

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                field(row, "anomaly_type"),
                field(row, "severity"),
                field(row, "department"),
                field(row, "supplier"),
                format!(
                    "{:.2}",
                    row.get("amount").and_then(Value::as_f64).unwrap_or(0.0)
                ),
                row.get("count")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
                field(row, "details"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(format::render_table(&columns, &table_rows));

    Ok(lines.join("\n"))
}

fn named_counts(summary: &Value, key: &str) -> Vec<(&'static str, String)> {
    summary
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|entry| {
            let name = entry.get("name").and_then(Value::as_str)?;
            let count = entry.get("count").and_then(Value::as_i64)?;
            let label: &'static str = match name {
                "high_payment" => "high_payment:",
                "duplicate_pattern" => "duplicate_pattern:",
                "supplier_concentration_spend" => "supplier_concentration_spend:",
                "supplier_concentration_txn" => "supplier_concentration_txn:",
                "info" => "info:",
                "medium" => "medium:",
                "high" => "high:",
                _ => return None,
            };
            Some((label, count.to_string()))
        })
        .collect()
}

fn field(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_anomalies;

    #[test]
    fn empty_rows_render_the_no_anomalies_message() {
        let data = json!({ "rows": [], "total_transactions": 12 });

        let rendered = render_anomalies(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("No anomalies detected across 12 transactions."));
        }
    }

    #[test]
    fn findings_table_carries_all_seven_columns() {
        let data = json!({
            "total_transactions": 3,
            "summary": {
                "total": 1,
                "by_type": [{"name": "high_payment", "count": 1}],
                "by_severity": [{"name": "high", "count": 1}]
            },
            "rows": [{
                "anomaly_type": "high_payment",
                "severity": "high",
                "department": "HMRC",
                "supplier": "MEGA CORP",
                "details": "Payment of £950,000 exceeds £934,000 threshold",
                "amount": 950000.0,
                "count": 1
            }]
        });

        let rendered = render_anomalies(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("1 anomalies detected across 3 transactions."));
            assert!(text.contains("By type:"));
            assert!(text.contains("high_payment:"));
            assert!(text.contains("MEGA CORP"));
            assert!(text.contains("950000.00"));
            assert!(text.contains("exceeds £934,000 threshold"));
        }
    }
}
