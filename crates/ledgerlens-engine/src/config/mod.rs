mod standard;

use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use crate::ledger::{CATEGORIES, Category};

/// Departments the standard configuration covers. Threshold validation
/// requires a high-payment cutoff for each of these.
pub const KNOWN_DEPARTMENTS: [&str; 3] = ["HMRC", "Home Office", "DfT"];

/// Classification configuration: the keyword table (category declaration
/// order preserved), the direct expense-type mapping, and the tier-0 switch.
///
/// Passed explicitly into the classifier so tests can inject fixtures;
/// nothing in the engine reads global tables.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub keywords: Vec<(Category, Vec<String>)>,
    pub direct: BTreeMap<String, BTreeMap<String, Category>>,
    pub use_direct_map: bool,
}

impl ClassifierConfig {
    /// The built-in production tables for the three covered departments.
    pub fn standard() -> Self {
        Self {
            keywords: standard::keyword_table(),
            direct: standard::direct_mapping(),
            use_direct_map: true,
        }
    }

    /// Build a config from raw string tables, the shape external config
    /// sources produce. Unknown category names are rejected here so a bad
    /// table can never reach classification.
    pub fn from_tables(
        keywords: Vec<(String, Vec<String>)>,
        direct: Vec<(String, Vec<(String, String)>)>,
        use_direct_map: bool,
    ) -> EngineResult<Self> {
        let mut keyword_entries = Vec::with_capacity(keywords.len());
        for (category_name, words) in keywords {
            let category = parse_assignable(&category_name, "keyword table")?;
            keyword_entries.push((category, words));
        }

        let mut direct_entries: BTreeMap<String, BTreeMap<String, Category>> = BTreeMap::new();
        for (department, mappings) in direct {
            let mut by_expense_type = BTreeMap::new();
            for (expense_type, category_name) in mappings {
                let category = parse_assignable(
                    &category_name,
                    &format!("direct mapping for `{department}`"),
                )?;
                by_expense_type.insert(expense_type, category);
            }
            direct_entries.insert(department, by_expense_type);
        }

        Ok(Self {
            keywords: keyword_entries,
            direct: direct_entries,
            use_direct_map,
        })
    }

    pub fn with_direct_map(mut self, enabled: bool) -> Self {
        self.use_direct_map = enabled;
        self
    }

    /// Checked once before a batch runs, never per record. The keyword
    /// table must cover the declared taxonomy exactly: a missing category
    /// would silently never match, a duplicated one would shadow ordering.
    pub fn validate(&self) -> EngineResult<()> {
        for category in CATEGORIES {
            let occurrences = self
                .keywords
                .iter()
                .filter(|(entry, _)| *entry == category)
                .count();
            if occurrences == 0 {
                return Err(EngineError::invalid_configuration(&format!(
                    "Keyword table is missing category `{}`.",
                    category.as_str()
                )));
            }
            if occurrences > 1 {
                return Err(EngineError::invalid_configuration(&format!(
                    "Keyword table declares category `{}` {occurrences} times.",
                    category.as_str()
                )));
            }
        }

        if self.keywords.len() != CATEGORIES.len() {
            return Err(EngineError::invalid_configuration(
                "Keyword table declares categories outside the taxonomy.",
            ));
        }

        Ok(())
    }

    pub fn direct_category(&self, department: &str, expense_type: &str) -> Option<Category> {
        self.direct.get(department)?.get(expense_type).copied()
    }
}

fn parse_assignable(category_name: &str, context: &str) -> EngineResult<Category> {
    match Category::parse(category_name) {
        Some(Category::Uncategorised) => Err(EngineError::invalid_configuration(&format!(
            "`Uncategorised` is the fallback sentinel and cannot be a target in the {context}.",
        ))),
        Some(category) => Ok(category),
        None => Err(EngineError::invalid_configuration(&format!(
            "Unknown category `{category_name}` in the {context}.",
        ))),
    }
}

/// Anomaly-detection thresholds. The high-payment cutoffs are per
/// department; the concentration fractions are strict-greater-than bounds.
#[derive(Debug, Clone)]
pub struct ThresholdConfig {
    pub high_payment: BTreeMap<String, f64>,
    pub spend_fraction: f64,
    pub txn_fraction: f64,
    pub duplicate_window_days: i64,
}

impl ThresholdConfig {
    /// Production thresholds: high-payment cutoffs from 95th-percentile
    /// analysis of each department's sample, the rest chosen operationally.
    pub fn standard() -> Self {
        let mut high_payment = BTreeMap::new();
        high_payment.insert("HMRC".to_string(), 934_000.0);
        high_payment.insert("Home Office".to_string(), 884_000.0);
        high_payment.insert("DfT".to_string(), 1_360_000.0);

        Self {
            high_payment,
            spend_fraction: 0.15,
            txn_fraction: 0.10,
            duplicate_window_days: 7,
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        let missing = KNOWN_DEPARTMENTS
            .iter()
            .filter(|department| !self.high_payment.contains_key(**department))
            .map(|department| (*department).to_string())
            .collect::<Vec<String>>();
        if !missing.is_empty() {
            return Err(EngineError::invalid_configuration(&format!(
                "Missing high-payment thresholds for: {}.",
                missing.join(", ")
            )));
        }

        for (label, fraction) in [
            ("spend-concentration", self.spend_fraction),
            ("transaction-concentration", self.txn_fraction),
        ] {
            if !(fraction > 0.0 && fraction < 1.0) {
                return Err(EngineError::invalid_configuration(&format!(
                    "The {label} fraction must be between 0 and 1 exclusive; got {fraction}.",
                )));
            }
        }

        if self.duplicate_window_days < 0 {
            return Err(EngineError::invalid_configuration(&format!(
                "The duplicate window must be a non-negative number of days; got {}.",
                self.duplicate_window_days
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ledger::Category;

    use super::{ClassifierConfig, ThresholdConfig};

    fn minimal_keywords() -> Vec<(String, Vec<String>)> {
        [
            "IT",
            "Consultancy",
            "Construction",
            "Operations",
            "Legal",
            "HR/Staffing",
            "Grants",
            "Administrative",
        ]
        .iter()
        .map(|name| (name.to_string(), vec!["keyword".to_string()]))
        .collect()
    }

    #[test]
    fn standard_config_passes_validation() {
        let classifier = ClassifierConfig::standard();
        assert!(classifier.validate().is_ok());

        let thresholds = ThresholdConfig::standard();
        assert!(thresholds.validate().is_ok());
    }

    #[test]
    fn keyword_table_missing_a_category_is_rejected() {
        let mut keywords = minimal_keywords();
        keywords.retain(|(name, _)| name != "Legal");

        let config = ClassifierConfig::from_tables(keywords, Vec::new(), true);
        assert!(config.is_ok());
        if let Ok(value) = config {
            let validated = value.validate();
            assert!(validated.is_err());
            if let Err(error) = validated {
                assert_eq!(error.code, "invalid_configuration");
                assert!(error.message.contains("Legal"));
            }
        }
    }

    #[test]
    fn keyword_table_duplicating_a_category_is_rejected() {
        let mut keywords = minimal_keywords();
        keywords.push(("IT".to_string(), vec!["again".to_string()]));

        let config = ClassifierConfig::from_tables(keywords, Vec::new(), true);
        assert!(config.is_ok());
        if let Ok(value) = config {
            assert!(value.validate().is_err());
        }
    }

    #[test]
    fn unknown_category_name_is_rejected_at_parse() {
        let mut keywords = minimal_keywords();
        keywords.push(("Catering".to_string(), vec!["lunch".to_string()]));

        let config = ClassifierConfig::from_tables(keywords, Vec::new(), true);
        assert!(config.is_err());
        if let Err(error) = config {
            assert_eq!(error.code, "invalid_configuration");
            assert!(error.message.contains("Catering"));
        }
    }

    #[test]
    fn direct_mapping_cannot_target_the_fallback_sentinel() {
        let direct = vec![(
            "HMRC".to_string(),
            vec![("Desktop Services".to_string(), "Uncategorised".to_string())],
        )];

        let config = ClassifierConfig::from_tables(minimal_keywords(), direct, true);
        assert!(config.is_err());
    }

    #[test]
    fn direct_lookup_is_exact_string_keyed() {
        let config = ClassifierConfig::standard();
        assert_eq!(
            config.direct_category("HMRC", "Desktop Services"),
            Some(Category::It)
        );
        assert_eq!(config.direct_category("HMRC", "desktop services"), None);
        assert_eq!(config.direct_category("Unknown Dept", "Desktop Services"), None);
    }

    #[test]
    fn thresholds_missing_a_known_department_are_rejected() {
        let mut thresholds = ThresholdConfig::standard();
        thresholds.high_payment.remove("DfT");

        let validated = thresholds.validate();
        assert!(validated.is_err());
        if let Err(error) = validated {
            assert!(error.message.contains("DfT"));
        }
    }

    #[test]
    fn concentration_fractions_must_sit_strictly_inside_unit_interval() {
        let mut thresholds = ThresholdConfig::standard();
        thresholds.spend_fraction = 1.0;
        assert!(thresholds.validate().is_err());

        thresholds.spend_fraction = 0.15;
        thresholds.txn_fraction = 0.0;
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn negative_duplicate_window_is_rejected() {
        let mut thresholds = ThresholdConfig::standard();
        thresholds.duplicate_window_days = -1;
        assert!(thresholds.validate().is_err());
    }
}
