use std::fs;
use std::path::{Path, PathBuf};

use ledgerlens_engine::commands::report::{self, ReportRunOptions};
use serde_json::Value;
use tempfile::{Builder, TempDir};

const LEDGER_HEADER: &str = "department,supplier,amount,date,expense_type,description,reference";

fn temp_workspace() -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix("ledgerlens-report").tempdir()?;
    let ledger_path = dir.path().join("ledger.csv");
    Ok((dir, ledger_path))
}

fn write_ledger(path: &Path, rows: &[&str]) -> std::io::Result<()> {
    let mut body = String::from(LEDGER_HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    fs::write(path, body)
}

fn sample_rows() -> Vec<&'static str> {
    vec![
        "HMRC,ACME LTD,1000.00,2025-01-10,Desktop Services,managed laptops,TXN-1",
        "HMRC,MEGA CORP,950000.00,2025-01-15,,one-off settlement,TXN-2",
        "DfT,RAILCO,250.00,2025-02-01,,rail franchise payment,TXN-3",
        "DfT,REPEATCO,100.00,2025-02-10,,recurring invoice,TXN-4",
        "DfT,REPEATCO,100.00,2025-02-12,,recurring invoice,TXN-5",
        "Home Office,BLANKCO,80.00,2025-03-01,,,TXN-6",
    ]
}

#[test]
fn full_pipeline_emits_every_section_and_writes_outputs() {
    let workspace = temp_workspace();
    assert!(workspace.is_ok());
    if let Ok((dir, ledger_path)) = workspace {
        let written = write_ledger(&ledger_path, &sample_rows());
        assert!(written.is_ok());

        let output_dir = dir.path().join("out");
        let response = report::run_with_options(ReportRunOptions {
            path: Some(ledger_path.display().to_string()),
            output_dir: Some(output_dir.display().to_string()),
            ..ReportRunOptions::default()
        });
        assert!(response.is_ok());

        let payload = response
            .ok()
            .and_then(|success| serde_json::to_value(success).ok())
            .unwrap_or(Value::Null);
        let data = &payload["data"];

        assert_eq!(data["ingest"]["rows_read"], 6);
        assert_eq!(data["classification"]["total"], 6);
        assert_eq!(data["quality"]["total_rows"], 6);
        assert_eq!(data["stats"]["totals"]["transactions"], 6);
        assert_eq!(data["stats"]["date_range"]["start"], "2025-01-10");
        assert_eq!(data["stats"]["date_range"]["end"], "2025-03-01");

        // MEGA CORP exceeds the HMRC cutoff and REPEATCO repeats within
        // the window, so both detectors contribute.
        let by_type = data["anomaly_summary"]["by_type"].as_array().cloned();
        assert!(by_type.is_some());
        if let Some(entries) = by_type {
            let names = entries
                .iter()
                .map(|entry| entry["name"].as_str().unwrap_or("").to_string())
                .collect::<Vec<String>>();
            assert!(names.contains(&"high_payment".to_string()));
            assert!(names.contains(&"duplicate_pattern".to_string()));
        }

        let outputs = data["outputs"].as_array().cloned().unwrap_or_default();
        assert_eq!(outputs.len(), 3);
        assert!(output_dir.join("classified.csv").exists());
        assert!(output_dir.join("anomalies.csv").exists());
        assert!(output_dir.join("stats.json").exists());

        let stats_body = fs::read_to_string(output_dir.join("stats.json")).unwrap_or_default();
        let stats: Value = serde_json::from_str(&stats_body).unwrap_or(Value::Null);
        assert_eq!(stats["totals"]["transactions"], 6);

        let anomalies_body =
            fs::read_to_string(output_dir.join("anomalies.csv")).unwrap_or_default();
        assert!(anomalies_body.starts_with("anomaly_type,severity,department,"));
    }
}

#[test]
fn report_without_output_dir_writes_nothing() {
    let workspace = temp_workspace();
    assert!(workspace.is_ok());
    if let Ok((_dir, ledger_path)) = workspace {
        let written = write_ledger(&ledger_path, &sample_rows());
        assert!(written.is_ok());

        let response = report::run(Some(&ledger_path.display().to_string()), None);
        assert!(response.is_ok());
        if let Ok(success) = response {
            let payload = serde_json::to_value(success).unwrap_or(Value::Null);
            let outputs = payload["data"]["outputs"].as_array().cloned();
            assert_eq!(outputs.map(|entries| entries.len()), Some(0));
        }
    }
}

#[test]
fn report_over_an_empty_ledger_is_rejected() {
    let workspace = temp_workspace();
    assert!(workspace.is_ok());
    if let Ok((_dir, ledger_path)) = workspace {
        let written = write_ledger(&ledger_path, &[]);
        assert!(written.is_ok());

        let response = report::run(Some(&ledger_path.display().to_string()), None);
        assert!(response.is_err());
        if let Err(error) = response {
            assert_eq!(error.code, "invalid_argument");
        }
    }
}

#[test]
fn row_validation_failures_abort_the_report_with_issues() {
    let workspace = temp_workspace();
    assert!(workspace.is_ok());
    if let Ok((_dir, ledger_path)) = workspace {
        let written = write_ledger(
            &ledger_path,
            &["HMRC,ACME LTD,ten pounds,2025-01-10,Desktop Services,laptops,TXN-1"],
        );
        assert!(written.is_ok());

        let response = report::run(Some(&ledger_path.display().to_string()), None);
        assert!(response.is_err());
        if let Err(error) = response {
            assert_eq!(error.code, "ledger_validation_failed");
            let data = error.data.unwrap_or_default();
            let issues = data["issues"].as_array().cloned().unwrap_or_default();
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0]["field"], "amount");
        }
    }
}

#[test]
fn missing_source_file_is_a_read_error() {
    let response = report::run(Some("/nonexistent/ledger.csv"), None);
    assert!(response.is_err());
    if let Err(error) = response {
        assert_eq!(error.code, "ledger_read_failed");
    }
}
