use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::ledger::Transaction;

const SHORT_DESCRIPTION_CHARS: usize = 10;

/// Data-quality snapshot of one ingested batch. Advisory output for the
/// analyst; nothing downstream branches on it.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub total_rows: i64,
    pub warnings: Vec<String>,
    pub metrics: QualityMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityMetrics {
    pub empty_fields: Vec<EmptyFieldCount>,
    pub negative_amounts: i64,
    pub zero_amounts: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    pub departments: Vec<DepartmentCount>,
    pub duplicate_references: DuplicateReferences,
    pub description_quality: DescriptionQuality,
    pub unique_suppliers: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_stats: Option<AmountStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmptyFieldCount {
    pub field: String,
    pub count: i64,
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: i64,
}

/// References seen more than once: often legitimate recurring payments,
/// surfaced so the analyst can judge.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateReferences {
    pub repeated_ids: i64,
    pub occurrences: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DescriptionQuality {
    pub empty: i64,
    pub too_short: i64,
    pub useful: i64,
    pub useful_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AmountStats {
    pub min: f64,
    pub quartile_25: f64,
    pub median: f64,
    pub quartile_75: f64,
    pub percentile_95: f64,
    pub max: f64,
    pub total: f64,
}

pub fn assess(records: &[Transaction]) -> QualityReport {
    tracing::info!(total = records.len(), "assessing ledger quality");

    let total = records.len() as i64;
    let mut warnings = Vec::new();

    let empty_fields = empty_field_counts(records, &mut warnings);

    let negative_amounts = records.iter().filter(|record| record.amount < 0.0).count() as i64;
    let zero_amounts = records.iter().filter(|record| record.amount == 0.0).count() as i64;
    if negative_amounts > 0 {
        warnings.push(format!(
            "Negative amounts: {negative_amounts} ({:.2}%) - likely refunds",
            percentage(negative_amounts, total)
        ));
    }
    if zero_amounts > 0 {
        warnings.push(format!(
            "Zero amounts: {zero_amounts} ({:.2}%)",
            percentage(zero_amounts, total)
        ));
    }

    let date_range = records
        .iter()
        .map(|record| record.date)
        .min()
        .zip(records.iter().map(|record| record.date).max())
        .map(|(start, end)| DateRange {
            start: start.format("%Y-%m-%d").to_string(),
            end: end.format("%Y-%m-%d").to_string(),
        });

    let mut department_counts: BTreeMap<&str, i64> = BTreeMap::new();
    for record in records {
        *department_counts.entry(record.department.as_str()).or_default() += 1;
    }
    let departments = department_counts
        .into_iter()
        .map(|(department, count)| DepartmentCount {
            department: department.to_string(),
            count,
        })
        .collect::<Vec<DepartmentCount>>();

    let duplicate_references = duplicate_reference_counts(records, &mut warnings);
    let description_quality = description_quality(records);

    let unique_suppliers = records
        .iter()
        .map(|record| record.supplier.as_str())
        .collect::<BTreeSet<&str>>()
        .len() as i64;

    let amount_stats = amount_statistics(records);

    QualityReport {
        total_rows: total,
        warnings,
        metrics: QualityMetrics {
            empty_fields,
            negative_amounts,
            zero_amounts,
            date_range,
            departments,
            duplicate_references,
            description_quality,
            unique_suppliers,
            amount_stats,
        },
    }
}

fn empty_field_counts(records: &[Transaction], warnings: &mut Vec<String>) -> Vec<EmptyFieldCount> {
    let total = records.len() as i64;
    let checks: [(&str, fn(&Transaction) -> &str); 3] = [
        ("department", |record| record.department.as_str()),
        ("expense_type", |record| record.expense_type.as_str()),
        ("supplier", |record| record.supplier.as_str()),
    ];

    let mut counts = Vec::new();
    for (field, accessor) in checks {
        let count = records
            .iter()
            .filter(|record| accessor(record).is_empty())
            .count() as i64;
        let pct = percentage(count, total);
        if count > 0 {
            warnings.push(format!("{field}: {count} empty values ({pct:.2}%)"));
        }
        counts.push(EmptyFieldCount {
            field: field.to_string(),
            count,
            pct,
        });
    }
    counts
}

fn duplicate_reference_counts(
    records: &[Transaction],
    warnings: &mut Vec<String>,
) -> DuplicateReferences {
    let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
    for record in records {
        if let Some(reference) = record.reference.as_deref() {
            *counts.entry(reference).or_default() += 1;
        }
    }

    let repeated = counts
        .values()
        .filter(|count| **count > 1)
        .collect::<Vec<&i64>>();
    let result = DuplicateReferences {
        repeated_ids: repeated.len() as i64,
        occurrences: repeated.iter().copied().sum(),
    };

    if result.repeated_ids > 0 {
        warnings.push(format!(
            "Duplicate references: {} IDs with {} total occurrences",
            result.repeated_ids, result.occurrences
        ));
    }
    result
}

fn description_quality(records: &[Transaction]) -> DescriptionQuality {
    let total = records.len() as i64;
    let empty = records
        .iter()
        .filter(|record| record.description.is_empty())
        .count() as i64;
    let too_short = records
        .iter()
        .filter(|record| {
            !record.description.is_empty()
                && record.description.chars().count() < SHORT_DESCRIPTION_CHARS
        })
        .count() as i64;
    let useful = total - empty - too_short;

    DescriptionQuality {
        empty,
        too_short,
        useful,
        useful_pct: percentage(useful, total),
    }
}

fn amount_statistics(records: &[Transaction]) -> Option<AmountStats> {
    if records.is_empty() {
        return None;
    }

    let mut amounts = records
        .iter()
        .map(|record| record.amount)
        .collect::<Vec<f64>>();
    amounts.sort_by(|left, right| left.total_cmp(right));

    Some(AmountStats {
        min: amounts[0],
        quartile_25: quantile(&amounts, 0.25),
        median: quantile(&amounts, 0.5),
        quartile_75: quantile(&amounts, 0.75),
        percentile_95: quantile(&amounts, 0.95),
        max: amounts[amounts.len() - 1],
        total: amounts.iter().sum(),
    })
}

// Linear interpolation between the two nearest order statistics.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let position = q.clamp(0.0, 1.0) * ((sorted.len() - 1) as f64);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }

    let weight = position - (lower as f64);
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

fn percentage(count: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64) * 100.0
}
