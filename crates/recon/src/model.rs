use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One data row of either dataset, projected onto the reconciliation fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    pub order_key: String,
    pub amount: f64,
    pub date: Option<NaiveDate>,
    /// Source row in the matrix (0-based, header is row 0).
    pub row: usize,
}

impl OrderRecord {
    pub fn new(order_key: impl Into<String>, amount: f64) -> Self {
        Self {
            order_key: order_key.into(),
            amount,
            date: None,
            row: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// All records of one side sharing an order key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub order_key: String,
    pub total_cents: i64,
    pub date: Option<NaiveDate>,
    pub record_count: usize,
    pub rows: Vec<usize>,
}

impl Aggregate {
    pub fn amount(&self) -> f64 {
        self.total_cents as f64 / 100.0
    }
}

// ---------------------------------------------------------------------------
// Pair matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MatchedPair {
    pub a: Aggregate,
    pub b: Aggregate,
    /// B minus A, in cents.
    pub delta_cents: i64,
    pub within_tolerance: bool,
}

#[derive(Debug, Default)]
pub struct PairMatchOutput {
    pub matched: Vec<MatchedPair>,
    pub a_only: Vec<Aggregate>,
    pub b_only: Vec<Aggregate>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconStatus {
    Match,
    AmountMismatch,
    MissingInB,
    MissingInA,
}

impl ReconStatus {
    /// Human-readable label used in the exported report.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Match => "Match",
            Self::AmountMismatch => "Amount mismatch",
            Self::MissingInB => "Missing in B",
            Self::MissingInA => "Missing in A",
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

impl std::fmt::Display for ReconStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::AmountMismatch => write!(f, "amount_mismatch"),
            Self::MissingInB => write!(f, "missing_in_b"),
            Self::MissingInA => write!(f, "missing_in_a"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconItem {
    pub status: ReconStatus,
    pub order_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_a: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_b: Option<f64>,
    /// B minus A; only set for amount mismatches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<f64>,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconSummary {
    pub match_count: usize,
    /// Rounded percentage of matches relative to the larger side.
    pub match_percentage: u32,
    pub mismatch_count: usize,
    /// Everything that is not a match.
    pub discrepancy_count: usize,
    pub missing_in_a: usize,
    pub missing_in_b: usize,
    /// Distinct order keys on each side.
    pub total_a: usize,
    pub total_b: usize,
    /// Rows that were folded into an existing key.
    pub duplicate_rows_a: usize,
    pub duplicate_rows_b: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconResult {
    pub summary: ReconSummary,
    pub items: Vec<ReconItem>,
}

impl ReconResult {
    pub fn matches(&self) -> impl Iterator<Item = &ReconItem> {
        self.items.iter().filter(|i| i.status.is_match())
    }

    /// Mismatches and both missing categories.
    pub fn discrepancies(&self) -> impl Iterator<Item = &ReconItem> {
        self.items.iter().filter(|i| !i.status.is_match())
    }

    pub fn is_clean(&self) -> bool {
        self.summary.discrepancy_count == 0
    }
}
