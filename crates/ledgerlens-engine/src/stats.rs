use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use serde::Serialize;

use crate::contracts::types::AnomalyTotals;
use crate::detect::AnomalyRecord;
use crate::error::{EngineError, EngineResult};
use crate::ledger::ClassifiedTransaction;
use crate::quality::{DateRange, quantile};

pub const TOP_N_ITEMS: usize = 5;

/// Deterministic roll-up of one classified batch, built for reporting and
/// export. Statistics over zero transactions are meaningless, so `build`
/// rejects an empty batch instead of emitting zeros.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub totals: Totals,
    pub date_range: DateRange,
    pub month_span: i64,
    pub amount_distribution: AmountDistribution,
    pub negative_amounts: i64,
    pub zero_amounts: i64,
    pub top_departments: Vec<GroupShare>,
    pub top_categories: Vec<GroupShare>,
    pub top_suppliers: Vec<GroupShare>,
    pub monthly: Vec<PeriodSpend>,
    pub anomalies: AnomalyTotals,
}

#[derive(Debug, Clone, Serialize)]
pub struct Totals {
    pub transactions: i64,
    pub spend: f64,
    pub unique_suppliers: i64,
    pub unique_departments: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AmountDistribution {
    pub min: f64,
    pub quartile_25: f64,
    pub median: f64,
    pub quartile_75: f64,
    pub percentile_95: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupShare {
    pub name: String,
    pub transactions: i64,
    pub spend: f64,
    pub pct_of_total_spend: f64,
    pub pct_of_total_transactions: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_suppliers: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodSpend {
    pub period: String,
    pub transactions: i64,
    pub spend: f64,
}

pub fn build_summary_stats(
    rows: &[ClassifiedTransaction],
    anomalies: &[AnomalyRecord],
) -> EngineResult<SummaryStats> {
    if rows.is_empty() {
        return Err(EngineError::invalid_argument(
            "Cannot build summary statistics over zero transactions.",
        ));
    }

    let total_transactions = rows.len() as i64;
    let total_spend = rows.iter().map(|row| row.amount).sum::<f64>();

    let unique_suppliers = rows
        .iter()
        .map(|row| row.supplier.as_str())
        .collect::<BTreeSet<&str>>()
        .len() as i64;
    let unique_departments = rows
        .iter()
        .map(|row| row.department.as_str())
        .collect::<BTreeSet<&str>>()
        .len() as i64;

    let start = rows.iter().map(|row| row.date).min().unwrap_or_default();
    let end = rows.iter().map(|row| row.date).max().unwrap_or_default();
    let month_span = ((i64::from(end.year()) - i64::from(start.year())) * 12
        + (i64::from(end.month()) - i64::from(start.month()))
        + 1)
    .max(1);

    let mut amounts = rows.iter().map(|row| row.amount).collect::<Vec<f64>>();
    amounts.sort_by(|left, right| left.total_cmp(right));
    let amount_distribution = AmountDistribution {
        min: amounts[0],
        quartile_25: quantile(&amounts, 0.25),
        median: quantile(&amounts, 0.5),
        quartile_75: quantile(&amounts, 0.75),
        percentile_95: quantile(&amounts, 0.95),
        max: amounts[amounts.len() - 1],
    };

    let negative_amounts = rows.iter().filter(|row| row.amount < 0.0).count() as i64;
    let zero_amounts = rows.iter().filter(|row| row.amount == 0.0).count() as i64;

    let top_departments = top_shares(
        rows,
        |row| row.department.clone(),
        total_spend,
        total_transactions,
        true,
    );
    let top_categories = top_shares(
        rows,
        |row| row.category.as_str().to_string(),
        total_spend,
        total_transactions,
        false,
    );
    let top_suppliers = top_shares(
        rows,
        |row| row.supplier.clone(),
        total_spend,
        total_transactions,
        false,
    );

    let mut monthly_tallies: BTreeMap<String, (i64, f64)> = BTreeMap::new();
    for row in rows {
        let period = row.date.format("%Y-%m").to_string();
        let entry = monthly_tallies.entry(period).or_default();
        entry.0 += 1;
        entry.1 += row.amount;
    }
    let monthly = monthly_tallies
        .into_iter()
        .map(|(period, (transactions, spend))| PeriodSpend {
            period,
            transactions,
            spend,
        })
        .collect::<Vec<PeriodSpend>>();

    Ok(SummaryStats {
        totals: Totals {
            transactions: total_transactions,
            spend: total_spend,
            unique_suppliers,
            unique_departments,
        },
        date_range: DateRange {
            start: start.format("%Y-%m-%d").to_string(),
            end: end.format("%Y-%m-%d").to_string(),
        },
        month_span,
        amount_distribution,
        negative_amounts,
        zero_amounts,
        top_departments,
        top_categories,
        top_suppliers,
        monthly,
        anomalies: AnomalyTotals::from_records(anomalies),
    })
}

struct ShareTally {
    transactions: i64,
    spend: f64,
    suppliers: BTreeSet<String>,
}

fn top_shares<F>(
    rows: &[ClassifiedTransaction],
    key: F,
    total_spend: f64,
    total_transactions: i64,
    with_unique_suppliers: bool,
) -> Vec<GroupShare>
where
    F: Fn(&ClassifiedTransaction) -> String,
{
    let mut tallies: BTreeMap<String, ShareTally> = BTreeMap::new();
    for row in rows {
        let entry = tallies.entry(key(row)).or_insert_with(|| ShareTally {
            transactions: 0,
            spend: 0.0,
            suppliers: BTreeSet::new(),
        });
        entry.transactions += 1;
        entry.spend += row.amount;
        if with_unique_suppliers {
            entry.suppliers.insert(row.supplier.clone());
        }
    }

    let mut shares = tallies
        .into_iter()
        .map(|(name, tally)| GroupShare {
            name,
            transactions: tally.transactions,
            spend: tally.spend,
            pct_of_total_spend: share_pct(tally.spend, total_spend),
            pct_of_total_transactions: share_pct(
                tally.transactions as f64,
                total_transactions as f64,
            ),
            unique_suppliers: with_unique_suppliers.then(|| tally.suppliers.len() as i64),
        })
        .collect::<Vec<GroupShare>>();

    // Spend descending, name ascending for stable ties.
    shares.sort_by(|left, right| {
        right
            .spend
            .total_cmp(&left.spend)
            .then_with(|| left.name.cmp(&right.name))
    });
    shares.truncate(TOP_N_ITEMS);
    shares
}

fn share_pct(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    (part / whole) * 100.0
}
