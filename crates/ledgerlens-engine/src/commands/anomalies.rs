use crate::classify;
use crate::commands::common::require_path;
use crate::config::{ClassifierConfig, ThresholdConfig};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{AnomaliesData, AnomalyRow, AnomalyTotals};
use crate::detect;
use crate::error::EngineResult;
use crate::ingest;

#[derive(Debug)]
pub struct AnomaliesRunOptions<'a> {
    pub path: Option<String>,
    pub window_days: Option<i64>,
    pub spend_threshold: Option<f64>,
    pub txn_threshold: Option<f64>,
    pub use_direct_map: bool,
    pub stdin_override: Option<&'a str>,
}

impl Default for AnomaliesRunOptions<'_> {
    fn default() -> Self {
        Self {
            path: None,
            window_days: None,
            spend_threshold: None,
            txn_threshold: None,
            use_direct_map: true,
            stdin_override: None,
        }
    }
}

pub fn run(
    path: Option<&str>,
    window_days: Option<i64>,
    spend_threshold: Option<f64>,
    txn_threshold: Option<f64>,
) -> EngineResult<SuccessEnvelope> {
    run_with_options(AnomaliesRunOptions {
        path: path.map(std::string::ToString::to_string),
        window_days,
        spend_threshold,
        txn_threshold,
        ..AnomaliesRunOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: AnomaliesRunOptions<'_>) -> EngineResult<SuccessEnvelope> {
    let path = require_path(options.path.as_deref(), "anomalies")?;

    let config = ClassifierConfig::standard().with_direct_map(options.use_direct_map);
    config.validate()?;

    let mut thresholds = ThresholdConfig::standard();
    if let Some(window_days) = options.window_days {
        thresholds.duplicate_window_days = window_days;
    }
    if let Some(spend_threshold) = options.spend_threshold {
        thresholds.spend_fraction = spend_threshold;
    }
    if let Some(txn_threshold) = options.txn_threshold {
        thresholds.txn_fraction = txn_threshold;
    }
    thresholds.validate()?;

    let loaded = ingest::load_records(path, options.stdin_override)?;
    let classified = classify::classify(&loaded.records, &config);
    let findings = detect::detect_anomalies(&classified.rows, &thresholds);

    let rows = findings.iter().map(AnomalyRow::from).collect::<Vec<AnomalyRow>>();
    let data = AnomaliesData {
        path: Some(path.to_string()),
        total_transactions: classified.rows.len() as i64,
        window_days: thresholds.duplicate_window_days,
        summary: AnomalyTotals::from_records(&findings),
        rows,
    };
    success("anomalies", data)
}
