use orderrecon_engine::parse::parse_date;
use orderrecon_engine::{AnalysisOptions, ColumnMap, Matrix};

use crate::model::OrderRecord;

/// Project every data row onto (order key, amount, date) using the detected
/// columns.
///
/// Without an order column nothing can be joined and the result is empty.
/// Rows with a blank key are skipped. A missing amount column yields zero
/// amounts; a missing date column yields no dates.
pub fn project_records(matrix: &Matrix, options: &AnalysisOptions) -> Vec<OrderRecord> {
    let columns = ColumnMap::detect(matrix, &options.columns);
    let Some(order_col) = columns.order else {
        log::warn!("no order column detected; dataset contributes no records");
        return Vec::new();
    };
    if columns.amount.is_none() {
        log::warn!("no amount column detected; amounts default to 0");
    }

    let mut skipped = 0usize;
    let records: Vec<OrderRecord> = matrix
        .data_rows()
        .filter_map(|(row, _)| {
            let key_cell = matrix.cell(row, order_col);
            if key_cell.is_blank() {
                skipped += 1;
                return None;
            }
            Some(OrderRecord {
                order_key: key_cell.trimmed(),
                amount: columns
                    .amount
                    .map(|c| options.locale.parse_amount(matrix.cell(row, c)))
                    .unwrap_or(0.0),
                date: columns.date.and_then(|c| parse_date(matrix.cell(row, c))),
                row,
            })
        })
        .collect();

    if skipped > 0 {
        log::debug!("skipped {skipped} rows with blank order key");
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn projects_detected_columns() {
        let m = Matrix::from_strings(vec![
            vec!["Datum", "Auftrag", "Betrag"],
            vec!["01.03.2024", " A-1 ", "1.234,56 €"],
            vec!["", "A-2", "abc"],
        ]);
        let records = project_records(&m, &AnalysisOptions::default());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].order_key, "A-1");
        assert_eq!(records[0].amount, 1234.56);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(records[0].row, 1);
        assert_eq!(records[1].amount, 0.0);
        assert_eq!(records[1].date, None);
    }

    #[test]
    fn blank_keys_skipped() {
        let m = Matrix::from_strings(vec![vec!["Order", "Amount"], vec!["", "5"], vec!["X", "6"]]);
        let records = project_records(&m, &AnalysisOptions::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].order_key, "X");
        assert_eq!(records[0].row, 2);
    }

    #[test]
    fn no_order_column_yields_nothing() {
        let m = Matrix::from_strings(vec![vec!["Betrag"], vec!["5"]]);
        assert!(project_records(&m, &AnalysisOptions::default()).is_empty());
    }

    #[test]
    fn no_amount_column_defaults_to_zero() {
        let m = Matrix::from_strings(vec![vec!["Auftrag"], vec!["A-1"]]);
        let records = project_records(&m, &AnalysisOptions::default());
        assert_eq!(records[0].amount, 0.0);
    }
}
