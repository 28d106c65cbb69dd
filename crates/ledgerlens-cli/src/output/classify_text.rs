use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_classify(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("classify output requires a summary"))?;
    let total = summary.get("total").and_then(Value::as_i64).unwrap_or(0);

    let mut lines = vec![heading(total, data.get("path").and_then(Value::as_str))];

    lines.push(String::new());
    lines.push("Cascade:".to_string());
    lines.extend(format::key_value_rows(
        &[
            ("Direct mapping:", count(summary, "tier_direct")),
            ("Description keywords:", count(summary, "tier_description")),
            ("Expense-type keywords:", count(summary, "tier_expense_type")),
            ("Uncategorised:", count(summary, "uncategorised")),
        ],
        2,
    ));

    let distribution = data
        .get("distribution")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !distribution.is_empty() {
        lines.push(String::new());
        lines.push("Category distribution:".to_string());

        let columns = [
            Column {
                name: "Category",
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
        let rows = distribution
            .iter()
            .map(|entry| {
                vec![
                    entry
                        .get("category")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                        .to_string(),
                    entry
                        .get("transactions")
                        .and_then(Value::as_i64)
                        .unwrap_or(0)
                        .to_string(),
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
        lines.extend(format::render_table(&columns, &rows));
    }

    if let Some(output) = data.get("output").and_then(Value::as_str) {
        lines.push(String::new());
        lines.push(format!("Classified table written to {output}."));
    }

    Ok(lines.join("\n"))
}

fn heading(total: i64, path: Option<&str>) -> String {
    match path {
        Some(path) => format!("Classified {total} transactions from {path}."),
        None => format!("Classified {total} transactions."),
    }
}

fn count(summary: &Value, key: &str) -> String {
    summary
        .get(key)
        .and_then(Value::as_i64)
        .unwrap_or(0)
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_classify;

    #[test]
    fn renders_cascade_counts_and_distribution_table() {
        let data = json!({
            "path": "ledger.csv",
            "summary": {
                "total": 3,
                "tier_direct": 1,
                "tier_description": 1,
                "tier_expense_type": 0,
                "uncategorised": 1
            },
            "distribution": [
                {"category": "IT", "transactions": 2, "spend": 1100.0, "pct_of_total_spend": 91.7},
                {"category": "Uncategorised", "transactions": 1, "spend": 100.0, "pct_of_total_spend": 8.3}
            ]
        });

        let rendered = render_classify(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Classified 3 transactions from ledger.csv."));
            assert!(text.contains("Direct mapping:"));
            assert!(text.contains("Category distribution:"));
            assert!(text.contains("IT"));
            assert!(text.contains("91.7%"));
        }
    }

    #[test]
    fn output_path_line_appears_only_when_written() {
        let data = json!({
            "summary": {"total": 0, "tier_direct": 0, "tier_description": 0,
                         "tier_expense_type": 0, "uncategorised": 0},
            "distribution": [],
            "output": "classified.csv"
        });

        let rendered = render_classify(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("written to classified.csv."));
        }
    }
}
