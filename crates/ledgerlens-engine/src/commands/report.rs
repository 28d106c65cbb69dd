use std::fs;
use std::path::Path;

use crate::classify;
use crate::commands::common::require_path;
use crate::config::{ClassifierConfig, ThresholdConfig};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{AnomalyRow, AnomalyTotals, ReportData};
use crate::detect;
use crate::error::{EngineError, EngineResult};
use crate::export;
use crate::ingest;
use crate::quality;
use crate::stats;

#[derive(Debug)]
pub struct ReportRunOptions<'a> {
    pub path: Option<String>,
    pub output_dir: Option<String>,
    pub use_direct_map: bool,
    pub stdin_override: Option<&'a str>,
}

impl Default for ReportRunOptions<'_> {
    fn default() -> Self {
        Self {
            path: None,
            output_dir: None,
            use_direct_map: true,
            stdin_override: None,
        }
    }
}

pub fn run(path: Option<&str>, output_dir: Option<&str>) -> EngineResult<SuccessEnvelope> {
    run_with_options(ReportRunOptions {
        path: path.map(std::string::ToString::to_string),
        output_dir: output_dir.map(std::string::ToString::to_string),
        ..ReportRunOptions::default()
    })
}

/// The full pipeline: quality, classification, anomaly detection, summary
/// statistics, and optional file exports, over one ledger snapshot.
#[doc(hidden)]
pub fn run_with_options(options: ReportRunOptions<'_>) -> EngineResult<SuccessEnvelope> {
    let path = require_path(options.path.as_deref(), "report")?;

    let config = ClassifierConfig::standard().with_direct_map(options.use_direct_map);
    config.validate()?;
    let thresholds = ThresholdConfig::standard();
    thresholds.validate()?;

    let loaded = ingest::load_records(path, options.stdin_override)?;
    let quality_report = quality::assess(&loaded.records);
    let classified = classify::classify(&loaded.records, &config);
    let findings = detect::detect_anomalies(&classified.rows, &thresholds);
    let summary_stats = stats::build_summary_stats(&classified.rows, &findings)?;

    let anomaly_rows = findings.iter().map(AnomalyRow::from).collect::<Vec<AnomalyRow>>();

    let mut outputs = Vec::new();
    if let Some(output_dir) = options.output_dir.as_deref() {
        let base = Path::new(output_dir);
        fs::create_dir_all(base)
            .map_err(|error| EngineError::output_write_failed(output_dir, &error.to_string()))?;

        let classified_path = base.join("classified.csv");
        export::write_classified_csv(&classified_path, &classified.rows)?;
        outputs.push(classified_path.display().to_string());

        let anomalies_path = base.join("anomalies.csv");
        export::write_anomalies_csv(&anomalies_path, &anomaly_rows)?;
        outputs.push(anomalies_path.display().to_string());

        let stats_path = base.join("stats.json");
        export::write_stats_json(&stats_path, &summary_stats)?;
        outputs.push(stats_path.display().to_string());
    }

    let data = ReportData {
        path: Some(path.to_string()),
        ingest: loaded.summary,
        classification: classified.summary,
        quality: quality_report,
        anomaly_summary: AnomalyTotals::from_records(&findings),
        stats: summary_stats,
        outputs,
    };
    success("report", data)
}
