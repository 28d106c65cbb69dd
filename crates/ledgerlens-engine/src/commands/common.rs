use std::collections::BTreeMap;

use crate::contracts::types::CategoryShare;
use crate::error::{EngineError, EngineResult};
use crate::ledger::ClassifiedTransaction;

pub(crate) fn require_path<'a>(path: Option<&'a str>, command: &str) -> EngineResult<&'a str> {
    path.ok_or_else(|| {
        EngineError::invalid_argument_for_command(
            "Provide a ledger file path, or `-` to read stdin.",
            Some(command),
        )
    })
}

/// Per-category transaction and spend shares, largest spend first.
pub(crate) fn category_distribution(rows: &[ClassifiedTransaction]) -> Vec<CategoryShare> {
    let total_spend = rows.iter().map(|row| row.amount).sum::<f64>();

    let mut tallies: BTreeMap<&str, (i64, f64)> = BTreeMap::new();
    for row in rows {
        let entry = tallies.entry(row.category.as_str()).or_default();
        entry.0 += 1;
        entry.1 += row.amount;
    }

    let mut distribution = tallies
        .into_iter()
        .map(|(category, (transactions, spend))| CategoryShare {
            category: category.to_string(),
            transactions,
            spend,
            pct_of_total_spend: if total_spend == 0.0 {
                0.0
            } else {
                (spend / total_spend) * 100.0
            },
        })
        .collect::<Vec<CategoryShare>>();

    distribution.sort_by(|left, right| {
        right
            .spend
            .total_cmp(&left.spend)
            .then_with(|| left.category.cmp(&right.category))
    });
    distribution
}
