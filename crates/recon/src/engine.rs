use orderrecon_engine::{AnalysisOptions, Locale, Matrix};

use crate::aggregate::aggregate_records;
use crate::classify::classify;
use crate::config::ReconConfig;
use crate::matcher::match_exact_key;
use crate::model::{OrderRecord, ReconResult};
use crate::records::project_records;
use crate::summary::compute_summary;

/// Reconcile two sets of projected records.
///
/// Records are folded per key according to the duplicate policy, joined on
/// the exact key, classified and summarized. Pure: the same inputs always
/// produce the same result.
pub fn reconcile(
    a: &[OrderRecord],
    b: &[OrderRecord],
    config: &ReconConfig,
    locale: &Locale,
) -> ReconResult {
    let a_aggs = aggregate_records(a, config.duplicates);
    let b_aggs = aggregate_records(b, config.duplicates);

    let pair_output = match_exact_key(&a_aggs, &b_aggs, config.tolerance_cents);
    let items = classify(&pair_output, locale);
    let summary = compute_summary(&items, &a_aggs, &b_aggs);

    log::debug!(
        "reconciled {} A keys against {} B keys: {} matched, {} discrepancies",
        summary.total_a,
        summary.total_b,
        summary.match_count,
        summary.discrepancy_count
    );

    ReconResult { summary, items }
}

/// Project both matrices with the column rules, then reconcile.
pub fn reconcile_matrices(
    a: &Matrix,
    b: &Matrix,
    options: &AnalysisOptions,
    config: &ReconConfig,
) -> ReconResult {
    let a_records = project_records(a, options);
    let b_records = project_records(b, options);
    reconcile(&a_records, &b_records, config, &options.locale)
}
