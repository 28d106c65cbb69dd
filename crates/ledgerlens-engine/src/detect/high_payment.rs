use std::collections::BTreeMap;

use crate::ledger::ClassifiedTransaction;

use super::format_gbp;
use super::types::{AnomalyKind, AnomalyRecord, Severity};

/// Flag every payment strictly above its department's configured cutoff.
///
/// A pure per-row filter: no aggregation across records. Departments with
/// no configured threshold are skipped, not errors.
pub(crate) fn detect(
    rows: &[ClassifiedTransaction],
    thresholds: &BTreeMap<String, f64>,
) -> Vec<AnomalyRecord> {
    let mut findings = Vec::new();

    for (department, threshold) in thresholds {
        for row in rows {
            if row.department != *department || row.amount <= *threshold {
                continue;
            }

            findings.push(AnomalyRecord {
                kind: AnomalyKind::HighPayment,
                severity: Severity::High,
                department: row.department.clone(),
                supplier: row.supplier.clone(),
                details: format!(
                    "Payment of £{} exceeds £{} threshold",
                    format_gbp(row.amount),
                    format_gbp(*threshold)
                ),
                amount: row.amount,
                count: 1,
            });
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use crate::detect::{AnomalyKind, Severity};
    use crate::ledger::{Category, ClassifiedTransaction};

    use super::detect;

    fn row(department: &str, amount: f64) -> ClassifiedTransaction {
        ClassifiedTransaction {
            department: department.to_string(),
            supplier: "MEGA CORP".to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or(NaiveDate::MIN),
            expense_type: String::new(),
            description: String::new(),
            reference: None,
            category: Category::Uncategorised,
        }
    }

    fn hmrc_thresholds() -> BTreeMap<String, f64> {
        let mut thresholds = BTreeMap::new();
        thresholds.insert("HMRC".to_string(), 934_000.0);
        thresholds
    }

    #[test]
    fn amount_equal_to_threshold_is_not_flagged() {
        let findings = detect(&[row("HMRC", 934_000.0)], &hmrc_thresholds());
        assert!(findings.is_empty());
    }

    #[test]
    fn amount_one_above_threshold_is_flagged_high() {
        let findings = detect(&[row("HMRC", 934_001.0)], &hmrc_thresholds());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, AnomalyKind::HighPayment);
        assert_eq!(findings[0].severity, Severity::High);
        assert_eq!(findings[0].count, 1);
        assert!((findings[0].amount - 934_001.0).abs() < f64::EPSILON);
        assert!(findings[0].details.contains("934,001"));
        assert!(findings[0].details.contains("934,000"));
    }

    #[test]
    fn departments_without_a_threshold_are_silently_skipped() {
        let findings = detect(&[row("Cabinet Office", 5_000_000.0)], &hmrc_thresholds());
        assert!(findings.is_empty());
    }
}
