// Aggregates over the detected amount and date columns.

use chrono::NaiveDate;
use serde::Serialize;

use crate::cell::Matrix;
use crate::columns::ColumnMap;
use crate::options::AnalysisOptions;
use crate::parse::parse_date;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub total_amount: f64,
    pub average_amount: f64,
    pub transaction_count: usize,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    /// Parsed amounts of the counted rows, in row order.
    pub amounts: Vec<f64>,
}

/// Sum, average and count over the amount column.
///
/// A row counts as a transaction when its amount is non-zero or its amount
/// cell is not blank, so an explicit `0` is counted while a missing cell is
/// not. Header-only matrices and sheets without an amount column produce an
/// all-zero result.
pub fn calculate_statistics(matrix: &Matrix, options: &AnalysisOptions) -> Statistics {
    if matrix.row_count() <= 1 {
        return Statistics::default();
    }
    let Some(col) = ColumnMap::detect(matrix, &options.columns).amount else {
        log::debug!("statistics: no amount column detected");
        return Statistics::default();
    };

    let amounts: Vec<f64> = matrix
        .data_rows()
        .filter_map(|(r, _)| {
            let cell = matrix.cell(r, col);
            let amount = options.locale.parse_amount(cell);
            (amount != 0.0 || !cell.is_blank()).then_some(amount)
        })
        .collect();

    let total_amount: f64 = amounts.iter().sum();
    let transaction_count = amounts.len();
    let average_amount = if transaction_count == 0 {
        0.0
    } else {
        total_amount / transaction_count as f64
    };

    Statistics {
        total_amount,
        average_amount,
        transaction_count,
        min_amount: amounts.iter().copied().reduce(f64::min),
        max_amount: amounts.iter().copied().reduce(f64::max),
        amounts,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
    /// Days between min and max, when both exist.
    pub days: Option<i64>,
    pub label: String,
}

impl DateRange {
    fn unavailable(label: &str) -> Self {
        Self {
            min: None,
            max: None,
            days: None,
            label: label.to_string(),
        }
    }
}

/// Earliest and latest parseable date in the date column.
pub fn calculate_date_range(matrix: &Matrix, options: &AnalysisOptions) -> DateRange {
    let Some(col) = ColumnMap::detect(matrix, &options.columns).date else {
        return DateRange::unavailable("No date column detected");
    };

    let bounds = matrix
        .data_rows()
        .filter_map(|(r, _)| parse_date(matrix.cell(r, col)))
        .fold(None, |acc: Option<(NaiveDate, NaiveDate)>, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        });

    match bounds {
        Some((min, max)) => DateRange {
            min: Some(min),
            max: Some(max),
            days: Some((max - min).num_days()),
            label: format!(
                "{} – {}",
                options.locale.format_date(min),
                options.locale.format_date(max)
            ),
        },
        None => DateRange::unavailable("No valid dates found"),
    }
}

/// Downsample a series for sparkline display.
///
/// Series no longer than `points` are returned as-is. Longer ones keep every
/// `floor(n / points)`-th value starting at the first, truncated to
/// `points` values.
pub fn generate_trend_data(amounts: &[f64], points: usize) -> Vec<f64> {
    if points == 0 {
        return Vec::new();
    }
    if amounts.len() <= points {
        return amounts.to_vec();
    }
    let step = amounts.len() / points;
    amounts.iter().step_by(step).take(points).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn billing() -> Matrix {
        Matrix::from_strings(vec![
            vec!["Auftrag", "Datum", "Betrag"],
            vec!["A-1", "01.03.2024", "1.234,56 €"],
            vec!["A-2", "15.02.2024", "0"],
            vec!["A-3", "", ""],
            vec!["A-4", "garbage", "100,00"],
        ])
    }

    #[test]
    fn statistics_over_amount_column() {
        let stats = calculate_statistics(&billing(), &AnalysisOptions::default());
        assert_eq!(stats.transaction_count, 3);
        assert!((stats.total_amount - 1334.56).abs() < 1e-9);
        assert!((stats.average_amount - 1334.56 / 3.0).abs() < 1e-9);
        assert_eq!(stats.amounts, vec![1234.56, 0.0, 100.0]);
        assert_eq!(stats.min_amount, Some(0.0));
        assert_eq!(stats.max_amount, Some(1234.56));
    }

    #[test]
    fn unparsable_but_present_amounts_count_as_zero() {
        let m = Matrix::from_strings(vec![vec!["Betrag"], vec!["n/a"], vec![""]]);
        let stats = calculate_statistics(&m, &AnalysisOptions::default());
        assert_eq!(stats.transaction_count, 1);
        assert_eq!(stats.amounts, vec![0.0]);
    }

    #[test]
    fn numeric_zero_is_counted() {
        let m = Matrix::new(vec![
            vec![Cell::Text("Amount".into())],
            vec![Cell::Number(0.0)],
            vec![Cell::Number(5.0)],
        ]);
        let stats = calculate_statistics(&m, &AnalysisOptions::default());
        assert_eq!(stats.transaction_count, 2);
        assert_eq!(stats.total_amount, 5.0);
    }

    #[test]
    fn header_only_or_no_amount_column_is_zero() {
        let header_only = Matrix::from_strings(vec![vec!["Betrag"]]);
        assert_eq!(
            calculate_statistics(&header_only, &AnalysisOptions::default()),
            Statistics::default()
        );

        let no_amount = Matrix::from_strings(vec![vec!["foo"], vec!["12"]]);
        assert_eq!(
            calculate_statistics(&no_amount, &AnalysisOptions::default()),
            Statistics::default()
        );
    }

    #[test]
    fn ragged_rows_missing_amount_cell() {
        let m = Matrix::from_strings(vec![vec!["Auftrag", "Betrag"], vec!["A-1"], vec!["A-2", "7"]]);
        let stats = calculate_statistics(&m, &AnalysisOptions::default());
        assert_eq!(stats.transaction_count, 1);
        assert_eq!(stats.total_amount, 7.0);
    }

    #[test]
    fn date_range_skips_unparsable() {
        let range = calculate_date_range(&billing(), &AnalysisOptions::default());
        assert_eq!(range.min, Some(ymd(2024, 2, 15)));
        assert_eq!(range.max, Some(ymd(2024, 3, 1)));
        assert_eq!(range.days, Some(15));
        assert_eq!(range.label, "15.02.2024 – 01.03.2024");
    }

    #[test]
    fn date_range_mixes_serials_and_text() {
        let m = Matrix::new(vec![
            vec![Cell::Text("Date".into())],
            vec![Cell::Number(45226.0)],
            vec![Cell::Text("2023-10-01".into())],
        ]);
        let range = calculate_date_range(&m, &AnalysisOptions::default());
        assert_eq!(range.min, Some(ymd(2023, 10, 1)));
        assert_eq!(range.max, Some(ymd(2023, 10, 27)));
    }

    #[test]
    fn date_range_without_dates() {
        let no_col = Matrix::from_strings(vec![vec!["Betrag"], vec!["1"]]);
        let range = calculate_date_range(&no_col, &AnalysisOptions::default());
        assert_eq!((range.min, range.max), (None, None));
        assert_eq!(range.label, "No date column detected");

        let no_valid = Matrix::from_strings(vec![vec!["Datum"], vec!["tomorrow"], vec![""]]);
        let range = calculate_date_range(&no_valid, &AnalysisOptions::default());
        assert_eq!((range.min, range.max), (None, None));
        assert_eq!(range.label, "No valid dates found");
    }

    #[test]
    fn trend_short_series_unchanged() {
        let series: Vec<f64> = (0..20).map(f64::from).collect();
        assert_eq!(generate_trend_data(&series, 20), series);
        assert!(generate_trend_data(&[], 20).is_empty());
    }

    #[test]
    fn trend_downsamples_by_floor_step() {
        let series: Vec<f64> = (0..45).map(f64::from).collect();
        // step = 45 / 20 = 2 -> 0, 2, 4, ... truncated to 20 values
        let trend = generate_trend_data(&series, 20);
        assert_eq!(trend.len(), 20);
        assert_eq!(trend[0], 0.0);
        assert_eq!(trend[1], 2.0);
        assert_eq!(trend[19], 38.0);
    }

    #[test]
    fn trend_with_zero_points_is_empty() {
        assert!(generate_trend_data(&[1.0, 2.0], 0).is_empty());
    }
}
