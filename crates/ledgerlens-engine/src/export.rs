use std::path::Path;

use crate::contracts::types::AnomalyRow;
use crate::error::{EngineError, EngineResult};
use crate::ledger::ClassifiedTransaction;
use crate::stats::SummaryStats;

/// Write the classified table: the input columns plus `category`.
pub fn write_classified_csv(path: &Path, rows: &[ClassifiedTransaction]) -> EngineResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|error| write_error(path, &error))?;

    writer
        .write_record([
            "department",
            "supplier",
            "amount",
            "date",
            "expense_type",
            "description",
            "reference",
            "category",
        ])
        .map_err(|error| write_error(path, &error))?;

    for row in rows {
        let amount = format_amount(row.amount);
        let date = row.date.format("%Y-%m-%d").to_string();
        writer
            .write_record([
                row.department.as_str(),
                row.supplier.as_str(),
                amount.as_str(),
                date.as_str(),
                row.expense_type.as_str(),
                row.description.as_str(),
                row.reference.as_deref().unwrap_or(""),
                row.category.as_str(),
            ])
            .map_err(|error| write_error(path, &error))?;
    }

    writer.flush().map_err(|error| write_error(path, &error))
}

/// Write the anomaly table in its fixed seven-column schema; an empty batch
/// still writes the header row so consumers always see the schema.
pub fn write_anomalies_csv(path: &Path, rows: &[AnomalyRow]) -> EngineResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|error| write_error(path, &error))?;

    writer
        .write_record([
            "anomaly_type",
            "severity",
            "department",
            "supplier",
            "details",
            "amount",
            "count",
        ])
        .map_err(|error| write_error(path, &error))?;

    for row in rows {
        let amount = format_amount(row.amount);
        let count = row.count.to_string();
        writer
            .write_record([
                row.anomaly_type.as_str(),
                row.severity.as_str(),
                row.department.as_str(),
                row.supplier.as_str(),
                row.details.as_str(),
                amount.as_str(),
                count.as_str(),
            ])
            .map_err(|error| write_error(path, &error))?;
    }

    writer.flush().map_err(|error| write_error(path, &error))
}

pub fn write_stats_json(path: &Path, stats: &SummaryStats) -> EngineResult<()> {
    let body = serde_json::to_string_pretty(stats)
        .map_err(|error| EngineError::internal_serialization(&error.to_string()))?;
    std::fs::write(path, body).map_err(|error| write_error(path, &error))
}

// Cent precision, no scientific notation, stable across runs.
fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

fn write_error<E>(path: &Path, error: &E) -> EngineError
where
    E: std::fmt::Display,
{
    EngineError::output_write_failed(&path.display().to_string(), &error.to_string())
}
