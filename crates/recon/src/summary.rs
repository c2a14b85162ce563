use crate::model::{Aggregate, ReconItem, ReconStatus, ReconSummary};

/// Compute summary counts from classified items.
///
/// `total_a` / `total_b` count distinct keys, so
/// `missing_in_b + match + mismatch == total_a` (and the mirror for B) always
/// holds. Folded duplicate rows are reported separately.
pub fn compute_summary(items: &[ReconItem], a: &[Aggregate], b: &[Aggregate]) -> ReconSummary {
    let mut summary = ReconSummary {
        total_a: a.len(),
        total_b: b.len(),
        duplicate_rows_a: folded_rows(a),
        duplicate_rows_b: folded_rows(b),
        ..Default::default()
    };

    for item in items {
        match item.status {
            ReconStatus::Match => summary.match_count += 1,
            ReconStatus::AmountMismatch => summary.mismatch_count += 1,
            ReconStatus::MissingInB => summary.missing_in_b += 1,
            ReconStatus::MissingInA => summary.missing_in_a += 1,
        }
    }

    summary.discrepancy_count = summary.mismatch_count + summary.missing_in_a + summary.missing_in_b;
    summary.match_percentage = match_percentage(summary.match_count, summary.total_a, summary.total_b);
    summary
}

/// `round(matches / max(total_a, total_b) * 100)`, 0 when both sides are empty.
pub fn match_percentage(match_count: usize, total_a: usize, total_b: usize) -> u32 {
    let denominator = total_a.max(total_b);
    if denominator == 0 {
        return 0;
    }
    (match_count as f64 / denominator as f64 * 100.0).round() as u32
}

fn folded_rows(aggs: &[Aggregate]) -> usize {
    aggs.iter().map(|a| a.record_count.saturating_sub(1)).sum()
}
