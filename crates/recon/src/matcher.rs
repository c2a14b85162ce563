use std::collections::BTreeMap;

use crate::model::{Aggregate, MatchedPair, PairMatchOutput};

/// Join two sets of aggregates on their exact order key.
///
/// Keys present on both sides become pairs; `within_tolerance` is set when
/// `|B - A| <= tolerance_cents`. The A-side pass yields pairs and `a_only`,
/// the symmetric B-side pass yields `b_only`. All three lists are key-sorted.
pub fn match_exact_key(a: &[Aggregate], b: &[Aggregate], tolerance_cents: i64) -> PairMatchOutput {
    let a_map: BTreeMap<&str, &Aggregate> = a.iter().map(|agg| (agg.order_key.as_str(), agg)).collect();
    let b_map: BTreeMap<&str, &Aggregate> = b.iter().map(|agg| (agg.order_key.as_str(), agg)).collect();

    let tolerance = tolerance_cents.max(0).unsigned_abs();
    let mut matched = Vec::new();
    let mut a_only = Vec::new();
    let mut b_only = Vec::new();

    for (key, a_agg) in &a_map {
        if let Some(b_agg) = b_map.get(key) {
            let delta_cents = b_agg.total_cents.saturating_sub(a_agg.total_cents);
            matched.push(MatchedPair {
                a: (*a_agg).clone(),
                b: (*b_agg).clone(),
                delta_cents,
                within_tolerance: delta_cents.unsigned_abs() <= tolerance,
            });
        } else {
            a_only.push((*a_agg).clone());
        }
    }

    for (key, b_agg) in &b_map {
        if !a_map.contains_key(key) {
            b_only.push((*b_agg).clone());
        }
    }

    PairMatchOutput {
        matched,
        a_only,
        b_only,
    }
}
