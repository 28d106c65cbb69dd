mod concentration;
mod duplicates;
mod high_payment;
mod types;

pub use types::{AnomalyKind, AnomalyRecord, Severity};

use crate::config::ThresholdConfig;
use crate::ledger::ClassifiedTransaction;

/// Run every detector over the same classified snapshot and union the
/// findings in fixed order. Detectors are independent pure passes; the
/// union order is presentation, not semantics. Zero findings is the normal
/// no-anomaly outcome, never an error.
pub fn detect_anomalies(
    rows: &[ClassifiedTransaction],
    thresholds: &ThresholdConfig,
) -> Vec<AnomalyRecord> {
    tracing::info!(total = rows.len(), "detecting anomalies");

    let mut findings = Vec::new();
    findings.extend(high_payment::detect(rows, &thresholds.high_payment));
    findings.extend(duplicates::detect(rows, thresholds.duplicate_window_days));
    findings.extend(concentration::detect(
        rows,
        thresholds.spend_fraction,
        thresholds.txn_fraction,
    ));

    tracing::info!(findings = findings.len(), "anomaly detection complete");
    findings
}

// Whole-pound rendering with thousands separators, matching how the
// findings read in the original review workflow.
pub(crate) fn format_gbp(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let mut remaining = rounded.abs() as u64;

    let mut groups = Vec::new();
    loop {
        let group = remaining % 1000;
        remaining /= 1000;
        if remaining == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();

    let digits = groups.join(",");
    if negative {
        return format!("-{digits}");
    }
    digits
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::config::ThresholdConfig;
    use crate::ledger::{Category, ClassifiedTransaction};

    use super::{AnomalyKind, detect_anomalies, format_gbp};

    fn row(department: &str, supplier: &str, amount: f64, date: &str) -> ClassifiedTransaction {
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .unwrap_or(NaiveDate::MIN);
        ClassifiedTransaction {
            department: department.to_string(),
            supplier: supplier.to_string(),
            amount,
            date: parsed,
            expense_type: String::new(),
            description: String::new(),
            reference: None,
            category: Category::Uncategorised,
        }
    }

    #[test]
    fn empty_input_yields_empty_findings() {
        let thresholds = ThresholdConfig::standard();
        let findings = detect_anomalies(&[], &thresholds);
        assert!(findings.is_empty());
    }

    #[test]
    fn union_preserves_detector_order() {
        let thresholds = ThresholdConfig::standard();
        let rows = vec![
            // High payment for HMRC plus a duplicate pair.
            row("HMRC", "MEGA CORP", 950_000.0, "2025-01-10"),
            row("HMRC", "ACME LTD", 500.0, "2025-01-01"),
            row("HMRC", "ACME LTD", 500.0, "2025-01-03"),
        ];

        let findings = detect_anomalies(&rows, &thresholds);
        let kinds = findings
            .iter()
            .map(|finding| finding.kind)
            .collect::<Vec<AnomalyKind>>();

        assert!(kinds.contains(&AnomalyKind::HighPayment));
        assert!(kinds.contains(&AnomalyKind::DuplicatePattern));

        let high_position = kinds
            .iter()
            .position(|kind| *kind == AnomalyKind::HighPayment);
        let duplicate_position = kinds
            .iter()
            .position(|kind| *kind == AnomalyKind::DuplicatePattern);
        assert!(high_position < duplicate_position);
    }

    #[test]
    fn gbp_formatting_groups_thousands() {
        assert_eq!(format_gbp(934_000.0), "934,000");
        assert_eq!(format_gbp(1_360_000.0), "1,360,000");
        assert_eq!(format_gbp(500.0), "500");
        assert_eq!(format_gbp(-12_345.6), "-12,346");
    }
}
