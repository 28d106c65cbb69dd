use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_report(data: &Value) -> io::Result<String> {
    let stats = data
        .get("stats")
        .ok_or_else(|| io::Error::other("report output requires stats"))?;
    let totals = stats.get("totals").cloned().unwrap_or(Value::Null);

    let transactions = totals
        .get("transactions")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    let spend = totals.get("spend").and_then(Value::as_f64).unwrap_or(0.0);

    let mut lines = vec![match data.get("path").and_then(Value::as_str) {
        Some(path) => format!("Analysis of {transactions} transactions from {path}."),
        None => format!("Analysis of {transactions} transactions."),
    }];

    lines.push(String::new());
    lines.push("Totals:".to_string());
    let mut entries = vec![
        ("Total spend (£):", format!("{spend:.2}")),
        (
            "Departments:",
            int_field(&totals, "unique_departments"),
        ),
        ("Suppliers:", int_field(&totals, "unique_suppliers")),
    ];
    if let Some(range) = stats.get("date_range") {
        entries.push((
            "Data covers:",
            format!(
                "{} to {}",
                range.get("start").and_then(Value::as_str).unwrap_or("unknown"),
                range.get("end").and_then(Value::as_str).unwrap_or("unknown")
            ),
        ));
    }
    lines.extend(format::key_value_rows(&entries, 2));

    if let Some(classification) = data.get("classification") {
        lines.push(String::new());
        lines.push("Classification:".to_string());
        lines.extend(format::key_value_rows(
            &[
                ("Direct mapping:", int_field(classification, "tier_direct")),
                (
                    "Description keywords:",
                    int_field(classification, "tier_description"),
                ),
                (
                    "Expense-type keywords:",
                    int_field(classification, "tier_expense_type"),
                ),
                ("Uncategorised:", int_field(classification, "uncategorised")),
            ],
            2,
        ));
    }

    let top_categories = stats
        .get("top_categories")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !top_categories.is_empty() {
        lines.push(String::new());
        lines.push("Top categories by spend:".to_string());
        lines.extend(share_table(&top_categories));
    }

    let top_suppliers = stats
        .get("top_suppliers")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !top_suppliers.is_empty() {
        lines.push(String::new());
        lines.push("Top suppliers by spend:".to_string());
        lines.extend(share_table(&top_suppliers));
    }

    let anomaly_total = data
        .pointer("/anomaly_summary/total")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    lines.push(String::new());
    if anomaly_total == 0 {
        lines.push("No anomalies detected.".to_string());
    } else {
        lines.push(format!("Anomalies: {anomaly_total}"));
        let by_type = data
            .pointer("/anomaly_summary/by_type")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        for entry in &by_type {
            lines.push(format!(
                "  {}: {}",
                entry.get("name").and_then(Value::as_str).unwrap_or("unknown"),
                entry.get("count").and_then(Value::as_i64).unwrap_or(0)
            ));
        }
        lines.push("Run `ledgerlens anomalies <path>` for the full findings table.".to_string());
    }

    let outputs = data
        .get("outputs")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !outputs.is_empty() {
        lines.push(String::new());
        lines.push("Outputs written:".to_string());
        for output in &outputs {
            lines.push(format!("  {}", output.as_str().unwrap_or("unknown")));
        }
    }

    Ok(lines.join("\n"))
}

fn share_table(entries: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: "Transactions",
            align: Align::Right,
        },
        Column {
            name: "Spend (£)",
            align: Align::Right,
        },
        Column {
            name: "% of spend",
            align: Align::Right,
        },
    ];
    let rows = entries
        .iter()
        .map(|entry| {
            vec![
                entry
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                int_field(entry, "transactions"),
                format!(
                    "{:.2}",
                    entry.get("spend").and_then(Value::as_f64).unwrap_or(0.0)
                ),
                format!(
                    "{:.1}%",
                    entry
                        .get("pct_of_total_spend")
                        .and_then(Value::as_f64)
                        .unwrap_or(0.0)
                ),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    format::render_table(&columns, &rows)
}

fn int_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_i64)
        .unwrap_or(0)
        .to_string()
}
