use std::collections::BTreeMap;

use crate::ledger::ClassifiedTransaction;

use super::types::{AnomalyKind, AnomalyRecord, Severity};

#[derive(Default)]
struct SpendTally {
    spend: f64,
    txns: i64,
}

/// Flag suppliers holding an outsized share of one department's spend or
/// transaction volume. The two variants run over the same grouping but are
/// independent: a supplier exceeding both thresholds appears twice, and
/// neither result is deduplicated against the other.
pub(crate) fn detect(
    rows: &[ClassifiedTransaction],
    spend_fraction: f64,
    txn_fraction: f64,
) -> Vec<AnomalyRecord> {
    let mut department_totals: BTreeMap<String, SpendTally> = BTreeMap::new();
    let mut supplier_totals: BTreeMap<(String, String), SpendTally> = BTreeMap::new();

    for row in rows {
        let department_entry = department_totals.entry(row.department.clone()).or_default();
        department_entry.spend += row.amount;
        department_entry.txns += 1;

        let supplier_entry = supplier_totals
            .entry((row.department.clone(), row.supplier.clone()))
            .or_default();
        supplier_entry.spend += row.amount;
        supplier_entry.txns += 1;
    }

    let mut findings = Vec::new();

    for ((department, supplier), totals) in &supplier_totals {
        let Some(department_tally) = department_totals.get(department) else {
            continue;
        };
        if department_tally.spend == 0.0 {
            continue;
        }

        let share = totals.spend / department_tally.spend;
        if share > spend_fraction {
            findings.push(AnomalyRecord {
                kind: AnomalyKind::SupplierConcentrationSpend,
                severity: Severity::High,
                department: department.clone(),
                supplier: supplier.clone(),
                details: format!(
                    "{:.1}% of department total spend (>{:.0}% threshold)",
                    share * 100.0,
                    spend_fraction * 100.0
                ),
                amount: totals.spend,
                count: totals.txns,
            });
        }
    }

    for ((department, supplier), totals) in &supplier_totals {
        let Some(department_tally) = department_totals.get(department) else {
            continue;
        };
        if department_tally.txns == 0 {
            continue;
        }

        let share = totals.txns as f64 / department_tally.txns as f64;
        if share > txn_fraction {
            findings.push(AnomalyRecord {
                kind: AnomalyKind::SupplierConcentrationTxn,
                severity: Severity::Medium,
                department: department.clone(),
                supplier: supplier.clone(),
                details: format!(
                    "{:.1}% of department transactions (>{:.0}% threshold)",
                    share * 100.0,
                    txn_fraction * 100.0
                ),
                amount: totals.spend,
                count: totals.txns,
            });
        }
    }

    findings
}
