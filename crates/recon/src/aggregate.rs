use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use orderrecon_engine::parse::to_cents;

use crate::config::DuplicatePolicy;
use crate::model::{Aggregate, OrderRecord};

/// Group records by order key.
///
/// `Sum` adds up amounts and keeps the earliest date; `First` keeps the
/// first row's values. Either way every row index is recorded. Sums
/// saturate at the `i64` bounds.
pub fn aggregate_records(records: &[OrderRecord], policy: DuplicatePolicy) -> Vec<Aggregate> {
    let mut groups: BTreeMap<&str, Aggregate> = BTreeMap::new();

    for record in records {
        match groups.entry(record.order_key.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(Aggregate {
                    order_key: record.order_key.clone(),
                    total_cents: to_cents(record.amount),
                    date: record.date,
                    record_count: 1,
                    rows: vec![record.row],
                });
            }
            Entry::Occupied(mut slot) => {
                let agg = slot.get_mut();
                if policy == DuplicatePolicy::Sum {
                    agg.total_cents = agg.total_cents.saturating_add(to_cents(record.amount));
                    agg.date = match (agg.date, record.date) {
                        (Some(a), Some(b)) => Some(a.min(b)),
                        (a, b) => a.or(b),
                    };
                }
                agg.record_count += 1;
                agg.rows.push(record.row);
            }
        }
    }

    let duplicates: usize = groups.values().map(|a| a.record_count - 1).sum();
    if duplicates > 0 {
        log::info!("folded {duplicates} duplicate rows ({policy} policy)");
    }

    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(key: &str, amount: f64, date: &str, row: usize) -> OrderRecord {
        OrderRecord {
            order_key: key.into(),
            amount,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            row,
        }
    }

    #[test]
    fn sum_policy_adds_amounts() {
        let records = vec![
            record("A-1", 100.0, "2024-01-15", 1),
            record("A-1", -29.5, "2024-01-14", 2),
            record("A-2", 10.0, "2024-01-16", 3),
        ];
        let aggs = aggregate_records(&records, DuplicatePolicy::Sum);
        assert_eq!(aggs.len(), 2);
        assert_eq!(aggs[0].order_key, "A-1");
        assert_eq!(aggs[0].total_cents, 7050);
        assert_eq!(aggs[0].record_count, 2);
        assert_eq!(aggs[0].rows, vec![1, 2]);
        assert_eq!(aggs[0].date, NaiveDate::from_ymd_opt(2024, 1, 14));
    }

    #[test]
    fn first_policy_keeps_first_row() {
        let records = vec![
            record("A-1", 100.0, "2024-01-15", 1),
            record("A-1", 50.0, "2024-01-10", 2),
        ];
        let aggs = aggregate_records(&records, DuplicatePolicy::First);
        assert_eq!(aggs.len(), 1);
        assert_eq!(aggs[0].total_cents, 10000);
        assert_eq!(aggs[0].date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(aggs[0].record_count, 2);
    }

    #[test]
    fn missing_dates_filled_from_later_rows() {
        let records = vec![record("A-1", 1.0, "", 1), record("A-1", 1.0, "2024-02-01", 2)];
        let aggs = aggregate_records(&records, DuplicatePolicy::Sum);
        assert_eq!(aggs[0].date, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn sum_saturates_at_extremes() {
        let records = vec![
            record("K", 1e20, "", 1),
            record("K", 1e20, "", 2),
            record("N", -1e20, "", 3),
            record("N", -1e20, "", 4),
        ];
        let aggs = aggregate_records(&records, DuplicatePolicy::Sum);
        assert_eq!(aggs[0].total_cents, i64::MAX);
        assert_eq!(aggs[1].total_cents, i64::MIN);
        assert_eq!(aggs[0].record_count, 2);
    }

    #[test]
    fn output_sorted_by_key() {
        let records = vec![record("b", 1.0, "", 1), record("a", 1.0, "", 2)];
        let aggs = aggregate_records(&records, DuplicatePolicy::Sum);
        let keys: Vec<&str> = aggs.iter().map(|a| a.order_key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
