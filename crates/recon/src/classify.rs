use orderrecon_engine::Locale;

use crate::model::{Aggregate, PairMatchOutput, ReconItem, ReconStatus};

/// Turn a pair match into report items. Every A-side key (paired or A-only)
/// comes first in key order, followed by the B-only keys in key order.
pub fn classify(pair_output: &PairMatchOutput, locale: &Locale) -> Vec<ReconItem> {
    let mut items = Vec::with_capacity(
        pair_output.matched.len() + pair_output.a_only.len() + pair_output.b_only.len(),
    );

    for m in &pair_output.matched {
        let amount_a = m.a.amount();
        let amount_b = m.b.amount();
        let (status, difference, message) = if m.within_tolerance {
            let message = if m.delta_cents == 0 {
                "Amounts match".to_string()
            } else {
                format!(
                    "Amounts match within tolerance ({})",
                    signed(locale, m.delta_cents)
                )
            };
            (ReconStatus::Match, None, message)
        } else {
            let message = format!(
                "Amount differs by {} (A: {}, B: {})",
                signed(locale, m.delta_cents),
                locale.format_amount(amount_a),
                locale.format_amount(amount_b)
            );
            (
                ReconStatus::AmountMismatch,
                Some(m.delta_cents as f64 / 100.0),
                message,
            )
        };

        items.push(ReconItem {
            status,
            order_key: m.a.order_key.clone(),
            amount_a: Some(amount_a),
            amount_b: Some(amount_b),
            difference,
            message: with_row_note(message, &m.a, &m.b),
        });
    }

    for agg in &pair_output.a_only {
        items.push(ReconItem {
            status: ReconStatus::MissingInB,
            order_key: agg.order_key.clone(),
            amount_a: Some(agg.amount()),
            amount_b: None,
            difference: None,
            message: format!("Order missing in B (A: {})", locale.format_amount(agg.amount())),
        });
    }

    items.sort_by(|x, y| x.order_key.cmp(&y.order_key));

    for agg in &pair_output.b_only {
        items.push(ReconItem {
            status: ReconStatus::MissingInA,
            order_key: agg.order_key.clone(),
            amount_a: None,
            amount_b: Some(agg.amount()),
            difference: None,
            message: format!("Order missing in A (B: {})", locale.format_amount(agg.amount())),
        });
    }

    items
}

fn signed(locale: &Locale, delta_cents: i64) -> String {
    let formatted = locale.format_amount(delta_cents as f64 / 100.0);
    if delta_cents > 0 {
        format!("+{formatted}")
    } else {
        formatted
    }
}

fn with_row_note(message: String, a: &Aggregate, b: &Aggregate) -> String {
    match (a.record_count > 1, b.record_count > 1) {
        (false, false) => message,
        _ => format!(
            "{message}; combined {} row(s) in A, {} row(s) in B",
            a.record_count, b.record_count
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_exact_key;

    fn agg(key: &str, cents: i64) -> Aggregate {
        Aggregate {
            order_key: key.into(),
            total_cents: cents,
            date: None,
            record_count: 1,
            rows: vec![1],
        }
    }

    #[test]
    fn classifies_all_statuses() {
        let a = vec![agg("k1", 10000), agg("k2", 5000), agg("k3", 100)];
        let b = vec![agg("k1", 10000), agg("k2", 5500), agg("k4", 200)];
        let items = classify(&match_exact_key(&a, &b, 0), &Locale::default());

        let statuses: Vec<(&str, ReconStatus)> =
            items.iter().map(|i| (i.order_key.as_str(), i.status)).collect();
        assert_eq!(
            statuses,
            vec![
                ("k1", ReconStatus::Match),
                ("k2", ReconStatus::AmountMismatch),
                ("k3", ReconStatus::MissingInB),
                ("k4", ReconStatus::MissingInA),
            ]
        );
    }

    #[test]
    fn a_side_items_interleave_by_key() {
        let a = vec![agg("k1", 100), agg("k2", 100), agg("k3", 100)];
        let b = vec![agg("k0", 100), agg("k3", 100)];
        let items = classify(&match_exact_key(&a, &b, 0), &Locale::default());
        let keys: Vec<&str> = items.iter().map(|i| i.order_key.as_str()).collect();
        assert_eq!(keys, vec!["k1", "k2", "k3", "k0"]);
        assert_eq!(items[2].status, ReconStatus::Match);
        assert_eq!(items[3].status, ReconStatus::MissingInA);
    }

    #[test]
    fn mismatch_carries_difference_and_message() {
        let items = classify(
            &match_exact_key(&[agg("k", 10000)], &[agg("k", 10500)], 0),
            &Locale::default(),
        );
        assert_eq!(items[0].difference, Some(5.0));
        assert_eq!(
            items[0].message,
            "Amount differs by +5,00 € (A: 100,00 €, B: 105,00 €)"
        );
    }

    #[test]
    fn negative_difference() {
        let items = classify(
            &match_exact_key(&[agg("k", 10000)], &[agg("k", 9000)], 0),
            &Locale::default(),
        );
        assert_eq!(items[0].difference, Some(-10.0));
        assert!(items[0].message.starts_with("Amount differs by -10,00 €"));
    }

    #[test]
    fn matches_have_no_difference() {
        let items = classify(
            &match_exact_key(&[agg("k", 100)], &[agg("k", 101)], 1),
            &Locale::default(),
        );
        assert_eq!(items[0].status, ReconStatus::Match);
        assert_eq!(items[0].difference, None);
        assert_eq!(items[0].message, "Amounts match within tolerance (+0,01 €)");
    }

    #[test]
    fn missing_items_carry_one_amount() {
        let items = classify(
            &match_exact_key(&[agg("a", 100)], &[agg("b", 250)], 0),
            &Locale::default(),
        );
        assert_eq!(items[0].amount_a, Some(1.0));
        assert_eq!(items[0].amount_b, None);
        assert_eq!(items[0].message, "Order missing in B (A: 1,00 €)");
        assert_eq!(items[1].amount_a, None);
        assert_eq!(items[1].amount_b, Some(2.5));
    }

    #[test]
    fn combined_rows_noted() {
        let mut a = agg("k", 200);
        a.record_count = 2;
        let items = classify(&match_exact_key(&[a], &[agg("k", 200)], 0), &Locale::default());
        assert_eq!(items[0].message, "Amounts match; combined 2 row(s) in A, 1 row(s) in B");
    }
}
