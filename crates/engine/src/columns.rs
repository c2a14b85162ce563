use serde::{Deserialize, Serialize};

use crate::cell::Matrix;

/// Semantic column roles located by header keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Amount,
    Date,
    Order,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 3] = [ColumnRole::Amount, ColumnRole::Date, ColumnRole::Order];
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Amount => write!(f, "amount"),
            Self::Date => write!(f, "date"),
            Self::Order => write!(f, "order"),
        }
    }
}

/// Keyword table: for each role, case-insensitive substrings that identify
/// its header cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnKeywords {
    pub amount: Vec<String>,
    pub date: Vec<String>,
    pub order: Vec<String>,
}

impl Default for ColumnKeywords {
    fn default() -> Self {
        fn owned(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        }
        Self {
            amount: owned(&["betrag", "amount", "summe", "wert"]),
            date: owned(&["datum", "date", "zeit", "time"]),
            order: owned(&["auftrag", "order", "nr"]),
        }
    }
}

impl ColumnKeywords {
    pub fn for_role(&self, role: ColumnRole) -> &[String] {
        match role {
            ColumnRole::Amount => &self.amount,
            ColumnRole::Date => &self.date,
            ColumnRole::Order => &self.order,
        }
    }
}

/// Column indices resolved once per matrix. `None` means the role was not
/// found in the header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    pub amount: Option<usize>,
    pub date: Option<usize>,
    pub order: Option<usize>,
}

impl ColumnMap {
    pub fn detect(matrix: &Matrix, keywords: &ColumnKeywords) -> Self {
        let headers: Vec<String> = matrix
            .header()
            .iter()
            .map(|c| c.display().to_lowercase())
            .collect();

        let map = Self {
            amount: find_column(&headers, keywords.for_role(ColumnRole::Amount)),
            date: find_column(&headers, keywords.for_role(ColumnRole::Date)),
            order: find_column(&headers, keywords.for_role(ColumnRole::Order)),
        };
        log::debug!(
            "column detection: amount={:?} date={:?} order={:?}",
            map.amount,
            map.date,
            map.order
        );
        map
    }

    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Amount => self.amount,
            ColumnRole::Date => self.date,
            ColumnRole::Order => self.order,
        }
    }

    /// Roles that were found, with their column index.
    pub fn detected(&self) -> Vec<(ColumnRole, usize)> {
        ColumnRole::ALL
            .iter()
            .filter_map(|&role| self.get(role).map(|col| (role, col)))
            .collect()
    }
}

/// Index of the first header whose lowercased text contains any keyword.
pub fn find_column(lowercased_headers: &[String], keywords: &[String]) -> Option<usize> {
    let needles: Vec<String> = keywords
        .iter()
        .map(|k| k.to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    lowercased_headers
        .iter()
        .position(|h| needles.iter().any(|k| h.contains(k.as_str())))
}
