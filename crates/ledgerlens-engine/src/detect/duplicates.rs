use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::ledger::ClassifiedTransaction;

use super::format_gbp;
use super::types::{AnomalyKind, AnomalyRecord, Severity};

struct RepeatGroup {
    amount: f64,
    dates: Vec<NaiveDate>,
}

/// Flag repeated payments of the identical amount to the identical supplier
/// within the day window — suggestive of double-payment.
///
/// Groups by (department, supplier, amount at cent precision) and scans
/// only adjacent date pairs after an ascending sort. For sorted dates the
/// gap between any pair is the sum of the intervening adjacent gaps, so if
/// any pair falls inside the window, some adjacent pair does too; the scan
/// cannot produce a false negative.
pub(crate) fn detect(rows: &[ClassifiedTransaction], window_days: i64) -> Vec<AnomalyRecord> {
    let mut groups: BTreeMap<(String, String, i64), RepeatGroup> = BTreeMap::new();
    for row in rows {
        let key = (
            row.department.clone(),
            row.supplier.clone(),
            amount_cents(row.amount),
        );
        let entry = groups.entry(key).or_insert_with(|| RepeatGroup {
            amount: row.amount,
            dates: Vec::new(),
        });
        entry.dates.push(row.date);
    }

    let mut findings = Vec::new();
    for ((department, supplier, _), group) in &mut groups {
        if group.dates.len() < 2 {
            continue;
        }

        group.dates.sort();
        let within_window = group
            .dates
            .windows(2)
            .any(|pair| (pair[1] - pair[0]).num_days() <= window_days);
        if !within_window {
            continue;
        }

        let count = group.dates.len() as i64;
        let severity = if count >= 4 {
            Severity::High
        } else {
            Severity::Medium
        };

        findings.push(AnomalyRecord {
            kind: AnomalyKind::DuplicatePattern,
            severity,
            department: department.clone(),
            supplier: supplier.clone(),
            details: format!(
                "£{} paid {count} times within {window_days} days",
                format_gbp(group.amount)
            ),
            amount: group.amount,
            count,
        });
    }

    findings
}

fn amount_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
