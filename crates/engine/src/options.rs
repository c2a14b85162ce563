use serde::{Deserialize, Serialize};

use crate::columns::ColumnKeywords;
use crate::header::HeaderLabels;
use crate::locale::Locale;

pub const DEFAULT_TREND_POINTS: usize = 20;

/// Tunables shared by the analysis passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub columns: ColumnKeywords,
    pub header: HeaderLabels,
    pub locale: Locale,
    pub trend_points: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            columns: ColumnKeywords::default(),
            header: HeaderLabels::default(),
            locale: Locale::default(),
            trend_points: DEFAULT_TREND_POINTS,
        }
    }
}
