use chrono::NaiveDate;

/// One normalized spending record. Immutable once ingested; classification
/// produces a new row set rather than mutating these.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub department: String,
    pub supplier: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub expense_type: String,
    pub description: String,
    pub reference: Option<String>,
}

/// The closed spending taxonomy: eight assignable categories plus the
/// `Uncategorised` fallback sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    It,
    Consultancy,
    Construction,
    Operations,
    Legal,
    HrStaffing,
    Grants,
    Administrative,
    Uncategorised,
}

/// Assignable categories in declaration order. Tier 1/2 keyword matching
/// resolves ties by this order, so it is part of the classification
/// contract, not a presentation detail.
pub const CATEGORIES: [Category; 8] = [
    Category::It,
    Category::Consultancy,
    Category::Construction,
    Category::Operations,
    Category::Legal,
    Category::HrStaffing,
    Category::Grants,
    Category::Administrative,
];

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::Consultancy => "Consultancy",
            Self::Construction => "Construction",
            Self::Operations => "Operations",
            Self::Legal => "Legal",
            Self::HrStaffing => "HR/Staffing",
            Self::Grants => "Grants",
            Self::Administrative => "Administrative",
            Self::Uncategorised => "Uncategorised",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "IT" => Some(Self::It),
            "Consultancy" => Some(Self::Consultancy),
            "Construction" => Some(Self::Construction),
            "Operations" => Some(Self::Operations),
            "Legal" => Some(Self::Legal),
            "HR/Staffing" => Some(Self::HrStaffing),
            "Grants" => Some(Self::Grants),
            "Administrative" => Some(Self::Administrative),
            "Uncategorised" => Some(Self::Uncategorised),
            _ => None,
        }
    }
}

/// A transaction plus its assigned category. Carries the source fields flat
/// so detectors and exporters read one row shape.
#[derive(Debug, Clone)]
pub struct ClassifiedTransaction {
    pub department: String,
    pub supplier: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub expense_type: String,
    pub description: String,
    pub reference: Option<String>,
    pub category: Category,
}

impl ClassifiedTransaction {
    pub fn from_record(record: &Transaction, category: Category) -> Self {
        Self {
            department: record.department.clone(),
            supplier: record.supplier.clone(),
            amount: record.amount,
            date: record.date,
            expense_type: record.expense_type.clone(),
            description: record.description.clone(),
            reference: record.reference.clone(),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CATEGORIES, Category};

    #[test]
    fn category_names_round_trip() {
        for category in CATEGORIES {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(
            Category::parse("Uncategorised"),
            Some(Category::Uncategorised)
        );
        assert_eq!(Category::parse("Catering"), None);
    }

    #[test]
    fn declaration_order_starts_with_it() {
        assert_eq!(CATEGORIES[0], Category::It);
        assert_eq!(CATEGORIES[7], Category::Administrative);
    }
}
