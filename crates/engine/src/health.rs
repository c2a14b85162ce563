use serde::Serialize;

use crate::cell::Matrix;
use crate::columns::{ColumnMap, ColumnRole};
use crate::options::AnalysisOptions;

/// Completeness of the key columns, as a data quality signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthAssessment {
    /// Rounded completeness, 0..=100.
    pub score: u8,
    /// Filled share of the detected key-column cells, in percent.
    pub completeness: f64,
    pub missing: Vec<MissingCells>,
    /// Never empty: either problems or a single positive note.
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingCells {
    pub role: ColumnRole,
    pub column: usize,
    pub count: usize,
}

fn missing_label(role: ColumnRole) -> &'static str {
    match role {
        ColumnRole::Amount => "amounts",
        ColumnRole::Date => "dates",
        ColumnRole::Order => "order numbers",
    }
}

/// Score how completely the detected amount/date/order columns are filled.
pub fn assess_data_health(matrix: &Matrix, options: &AnalysisOptions) -> HealthAssessment {
    let data_rows = matrix.row_count().saturating_sub(1);
    if data_rows == 0 {
        return HealthAssessment {
            score: 0,
            completeness: 0.0,
            missing: Vec::new(),
            issues: vec!["No data rows".to_string()],
        };
    }

    let detected = ColumnMap::detect(matrix, &options.columns).detected();
    if detected.is_empty() {
        return HealthAssessment {
            score: 0,
            completeness: 0.0,
            missing: Vec::new(),
            issues: vec!["No amount/date/order columns detected".to_string()],
        };
    }

    let missing: Vec<MissingCells> = detected
        .iter()
        .map(|&(role, column)| MissingCells {
            role,
            column,
            count: matrix
                .data_rows()
                .filter(|(r, _)| matrix.cell(*r, column).is_blank())
                .count(),
        })
        .collect();

    let expected = data_rows * detected.len();
    let empty: usize = missing.iter().map(|m| m.count).sum();
    let filled = expected - empty;
    let completeness = filled as f64 / expected as f64 * 100.0;
    let mut score = completeness.round().clamp(0.0, 100.0) as u8;
    if empty > 0 {
        // 100 is reserved for fully populated key columns
        score = score.min(99);
    }

    let mut issues: Vec<String> = missing
        .iter()
        .filter(|m| m.count > 0)
        .map(|m| format!("{} missing {}", m.count, missing_label(m.role)))
        .collect();
    if issues.is_empty() {
        issues.push("Data looks healthy".to_string());
    }

    log::debug!("data health: score={} issues={}", score, issues.len());

    HealthAssessment {
        score,
        completeness,
        missing,
        issues,
    }
}
