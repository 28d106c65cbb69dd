#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    HighPayment,
    DuplicatePattern,
    SupplierConcentrationSpend,
    SupplierConcentrationTxn,
}

impl AnomalyKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighPayment => "high_payment",
            Self::DuplicatePattern => "duplicate_pattern",
            Self::SupplierConcentrationSpend => "supplier_concentration_spend",
            Self::SupplierConcentrationTxn => "supplier_concentration_txn",
        }
    }
}

/// Coarse triage priority, not a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Medium,
    High,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One flagged finding. The meaning of `amount` varies by kind: the flagged
/// payment, the repeated amount, or the supplier's aggregated total.
#[derive(Debug, Clone)]
pub struct AnomalyRecord {
    pub kind: AnomalyKind,
    pub severity: Severity,
    pub department: String,
    pub supplier: String,
    pub details: String,
    pub amount: f64,
    pub count: i64,
}
