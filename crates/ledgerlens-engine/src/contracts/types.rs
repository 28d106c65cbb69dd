use serde::Serialize;

use crate::classify::ClassificationSummary;
use crate::detect::{AnomalyRecord, Severity};
use crate::quality::QualityReport;
use crate::stats::SummaryStats;

#[derive(Debug, Clone, Serialize)]
pub struct LedgerIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
}

/// The fixed seven-column anomaly schema. Present even when zero anomalies
/// are found, so downstream consumers treat "no anomalies" uniformly.
#[derive(Debug, Clone, Serialize)]
pub struct AnomalyRow {
    pub anomaly_type: String,
    pub severity: String,
    pub department: String,
    pub supplier: String,
    pub details: String,
    pub amount: f64,
    pub count: i64,
}

impl From<&AnomalyRecord> for AnomalyRow {
    fn from(record: &AnomalyRecord) -> Self {
        Self {
            anomaly_type: record.kind.as_str().to_string(),
            severity: record.severity.as_str().to_string(),
            department: record.department.clone(),
            supplier: record.supplier.clone(),
            details: record.details.clone(),
            amount: record.amount,
            count: record.count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnomalyTotals {
    pub total: i64,
    pub by_type: Vec<NamedCount>,
    pub by_severity: Vec<NamedCount>,
}

impl AnomalyTotals {
    pub fn from_records(records: &[AnomalyRecord]) -> Self {
        let mut by_type: Vec<NamedCount> = Vec::new();
        for record in records {
            bump(&mut by_type, record.kind.as_str());
        }

        let mut by_severity: Vec<NamedCount> = Vec::new();
        for severity in [Severity::Info, Severity::Medium, Severity::High] {
            let count = records
                .iter()
                .filter(|record| record.severity == severity)
                .count() as i64;
            if count > 0 {
                by_severity.push(NamedCount {
                    name: severity.as_str().to_string(),
                    count,
                });
            }
        }

        Self {
            total: records.len() as i64,
            by_type,
            by_severity,
        }
    }
}

fn bump(counts: &mut Vec<NamedCount>, name: &str) {
    if let Some(existing) = counts.iter_mut().find(|entry| entry.name == name) {
        existing.count += 1;
        return;
    }
    counts.push(NamedCount {
        name: name.to_string(),
        count: 1,
    });
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub transactions: i64,
    pub spend: f64,
    pub pct_of_total_spend: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub ingest: IngestSummary,
    pub summary: ClassificationSummary,
    pub distribution: Vec<CategoryShare>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnomaliesData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub total_transactions: i64,
    pub window_days: i64,
    pub rows: Vec<AnomalyRow>,
    pub summary: AnomalyTotals,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub report: QualityReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub ingest: IngestSummary,
    pub classification: ClassificationSummary,
    pub quality: QualityReport,
    pub anomaly_summary: AnomalyTotals,
    pub stats: SummaryStats,
    pub outputs: Vec<String>,
}
