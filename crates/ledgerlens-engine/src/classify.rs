use serde::Serialize;

use crate::config::ClassifierConfig;
use crate::ledger::{Category, ClassifiedTransaction, Transaction};

/// Per-tier counts for one classification run. Diagnostic output only;
/// nothing downstream keys off these numbers.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationSummary {
    pub total: i64,
    pub tier_direct: i64,
    pub tier_description: i64,
    pub tier_expense_type: i64,
    pub uncategorised: i64,
}

#[derive(Debug, Clone)]
pub struct Classified {
    pub rows: Vec<ClassifiedTransaction>,
    pub summary: ClassificationSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Direct,
    Description,
    ExpenseType,
    Fallback,
}

/// Assign every record exactly one category via the three-tier cascade.
///
/// Each record is resolved independently: tiers are evaluated in order and
/// the first tier that matches wins, so a category is written once and
/// never overwritten by a later tier. Pure function of (records, config);
/// row order is preserved.
pub fn classify(records: &[Transaction], config: &ClassifierConfig) -> Classified {
    tracing::info!(total = records.len(), "starting classification cascade");

    let keywords = LoweredKeywords::build(config);

    let mut rows = Vec::with_capacity(records.len());
    let mut summary = ClassificationSummary {
        total: records.len() as i64,
        tier_direct: 0,
        tier_description: 0,
        tier_expense_type: 0,
        uncategorised: 0,
    };

    for record in records {
        let (category, tier) = resolve_category(record, config, &keywords);
        match tier {
            Tier::Direct => summary.tier_direct += 1,
            Tier::Description => summary.tier_description += 1,
            Tier::ExpenseType => summary.tier_expense_type += 1,
            Tier::Fallback => summary.uncategorised += 1,
        }
        rows.push(ClassifiedTransaction::from_record(record, category));
    }

    tracing::info!(
        tier_direct = summary.tier_direct,
        tier_description = summary.tier_description,
        tier_expense_type = summary.tier_expense_type,
        uncategorised = summary.uncategorised,
        "classification cascade complete"
    );

    Classified { rows, summary }
}

fn resolve_category(
    record: &Transaction,
    config: &ClassifierConfig,
    keywords: &LoweredKeywords,
) -> (Category, Tier) {
    if config.use_direct_map
        && let Some(category) = config.direct_category(&record.department, &record.expense_type)
    {
        return (category, Tier::Direct);
    }

    if let Some(category) = keywords.first_match(&record.description) {
        return (category, Tier::Description);
    }

    if let Some(category) = keywords.first_match(&record.expense_type) {
        return (category, Tier::ExpenseType);
    }

    (Category::Uncategorised, Tier::Fallback)
}

/// Keyword table lowered once per run so per-record matching only lowers
/// the haystack. Category declaration order is preserved: the first
/// category with any matching keyword wins, regardless of which keyword.
struct LoweredKeywords {
    entries: Vec<(Category, Vec<String>)>,
}

impl LoweredKeywords {
    fn build(config: &ClassifierConfig) -> Self {
        let entries = config
            .keywords
            .iter()
            .map(|(category, words)| {
                let lowered = words
                    .iter()
                    .map(|word| word.to_lowercase())
                    .collect::<Vec<String>>();
                (*category, lowered)
            })
            .collect();
        Self { entries }
    }

    // Case-insensitive substring containment, not word-boundary matching.
    fn first_match(&self, text: &str) -> Option<Category> {
        if text.is_empty() {
            return None;
        }
        let haystack = text.to_lowercase();
        for (category, words) in &self.entries {
            if words.iter().any(|word| haystack.contains(word.as_str())) {
                return Some(*category);
            }
        }
        None
    }
}
