// Target identifiers and their occurrence counts in the Billing Export.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::cell::Matrix;
use crate::columns::{ColumnKeywords, ColumnMap};

/// Ordered, de-duplicated identifiers to search for.
///
/// Blank entries are dropped: an empty needle would be contained in every
/// cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetSet {
    targets: Vec<String>,
}

impl TargetSet {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let targets = targets
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.clone()))
            .collect();
        Self { targets }
    }

    /// Split free-form input (commas, semicolons, whitespace, newlines).
    pub fn parse(input: &str) -> Self {
        Self::new(input.split(|c: char| c == ',' || c == ';' || c.is_whitespace()))
    }

    /// Identifiers listed in the Order Log's order column.
    ///
    /// Falls back to the header's order number when the sheet has no
    /// recognizable order column.
    pub fn from_order_log(matrix: &Matrix, keywords: &ColumnKeywords, fallback: &str) -> Self {
        let columns = ColumnMap::detect(matrix, keywords);
        match columns.order {
            Some(col) => {
                let set = Self::new(
                    matrix
                        .data_rows()
                        .filter_map(|(_, row)| row.get(col))
                        .filter(|cell| !cell.is_blank())
                        .map(|cell| cell.trimmed()),
                );
                log::debug!("derived {} targets from order column {}", set.len(), col);
                set
            }
            None => {
                log::warn!("order log has no order column; using header order number");
                Self::new([fallback])
            }
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|s| s.as_str())
    }
}

/// Result of counting a target set against a matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetCounts {
    /// Every target of the input set, including those never found.
    pub counts: BTreeMap<String, usize>,
    pub total_matches: usize,
    pub row_count: usize,
    pub unique_targets_found: usize,
}

impl TargetCounts {
    pub fn get(&self, target: &str) -> usize {
        self.counts.get(target).copied().unwrap_or(0)
    }

    /// Targets by descending count, ties by name.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> =
            self.counts.iter().map(|(t, n)| (t.as_str(), *n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// Targets that never occurred.
    pub fn missing(&self) -> Vec<&str> {
        self.counts
            .iter()
            .filter(|(_, n)| **n == 0)
            .map(|(t, _)| t.as_str())
            .collect()
    }
}

/// Count case-insensitive substring occurrences of each target.
///
/// Each (cell, target) pair contributes at most one match.
pub fn count_targets(matrix: &Matrix, targets: &TargetSet) -> TargetCounts {
    if targets.is_empty() {
        return TargetCounts::default();
    }

    let needles: Vec<(&str, String)> = targets.iter().map(|t| (t, t.to_lowercase())).collect();
    let mut hits = vec![0usize; needles.len()];

    for (_, _, cell) in matrix.cells() {
        if cell.is_blank() {
            continue;
        }
        let haystack = cell.trimmed().to_lowercase();
        for (i, (_, needle)) in needles.iter().enumerate() {
            if haystack.contains(needle.as_str()) {
                hits[i] += 1;
            }
        }
    }

    let counts: BTreeMap<String, usize> = needles
        .iter()
        .zip(&hits)
        .map(|((target, _), n)| (target.to_string(), *n))
        .collect();
    let total_matches = hits.iter().sum();
    let unique_targets_found = hits.iter().filter(|n| **n > 0).count();

    log::debug!(
        "counted {} targets: {} matches, {} found",
        needles.len(),
        total_matches,
        unique_targets_found
    );

    TargetCounts {
        counts,
        total_matches,
        row_count: matrix.row_count(),
        unique_targets_found,
    }
}
