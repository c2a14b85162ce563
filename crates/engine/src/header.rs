// Order Log header block: label cells followed by their values.

use serde::{Deserialize, Serialize};

use crate::cell::Matrix;

/// Exact label strings of the Order Log header block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderLabels {
    pub date: String,
    pub order_number: String,
    pub location: String,
    pub customer: String,
    pub facility: String,
}

impl Default for HeaderLabels {
    fn default() -> Self {
        Self {
            date: "Nr.:".to_string(),
            order_number: "Auftrag Nr.:".to_string(),
            location: "Ort:".to_string(),
            customer: "Kunde:".to_string(),
            facility: "Anlage:".to_string(),
        }
    }
}

/// Header metadata of one Order Log. Fields that were not found are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRecord {
    pub date: String,
    pub order_number: String,
    pub location: String,
    pub customer: String,
    pub facility: String,
}

impl HeaderRecord {
    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
            && self.order_number.is_empty()
            && self.location.is_empty()
            && self.customer.is_empty()
            && self.facility.is_empty()
    }
}

/// Scan the matrix for the header labels.
///
/// Most fields take the value right of the first cell whose trimmed text
/// equals the label. The location label appears twice in the layout; its
/// value sits *below* the second occurrence.
pub fn extract_header(matrix: &Matrix, labels: &HeaderLabels) -> HeaderRecord {
    HeaderRecord {
        date: value_right_of(matrix, &labels.date),
        order_number: value_right_of(matrix, &labels.order_number),
        location: value_below_nth(matrix, &labels.location, 2),
        customer: value_right_of(matrix, &labels.customer),
        facility: value_right_of(matrix, &labels.facility),
    }
}

fn label_positions<'a>(
    matrix: &'a Matrix,
    label: &'a str,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    matrix
        .cells()
        .filter(move |(_, _, cell)| !label.is_empty() && cell.trimmed() == label)
        .map(|(r, c, _)| (r, c))
}

fn value_right_of(matrix: &Matrix, label: &str) -> String {
    label_positions(matrix, label)
        .next()
        .and_then(|(r, c)| matrix.get(r, c + 1))
        .map(|cell| cell.trimmed())
        .unwrap_or_default()
}

fn value_below_nth(matrix: &Matrix, label: &str, occurrence: usize) -> String {
    label_positions(matrix, label)
        .nth(occurrence.saturating_sub(1))
        .and_then(|(r, c)| matrix.get(r + 1, c))
        .map(|cell| cell.trimmed())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    fn order_log() -> Matrix {
        let mut rows: Vec<Vec<Cell>> = [
            ["Nr.:", "2023-10-27"],
            ["Auftrag Nr.:", "12345"],
            ["Kunde:", "ACME"],
            ["Ort:", ""],
            ["X", ""],
            ["Y", ""],
        ]
        .iter()
        .map(|row| row.iter().map(|s| Cell::from(*s)).collect())
        .collect();
        // Second "Ort:" at (4, 0) with its value below it
        rows[4][0] = Cell::from("Ort:");
        rows[5][0] = Cell::from("Berlin");
        Matrix::new(rows)
    }

    #[test]
    fn extracts_reference_layout() {
        let header = extract_header(&order_log(), &HeaderLabels::default());
        assert_eq!(
            header,
            HeaderRecord {
                date: "2023-10-27".into(),
                order_number: "12345".into(),
                location: "Berlin".into(),
                customer: "ACME".into(),
                facility: String::new(),
            }
        );
    }

    #[test]
    fn location_needs_second_occurrence() {
        let m = Matrix::from_strings(vec![vec!["Ort:", "Hamburg"], vec!["Munich", ""]]);
        let header = extract_header(&m, &HeaderLabels::default());
        assert_eq!(header.location, "");
    }

    #[test]
    fn location_below_out_of_range_is_empty() {
        let m = Matrix::from_strings(vec![vec!["x", "Ort:"], vec!["Ort:"]]);
        // Second occurrence is on the last row
        let header = extract_header(&m, &HeaderLabels::default());
        assert_eq!(header.location, "");

        let ragged = Matrix::from_strings(vec![vec!["Ort:"], vec!["a", "Ort:"], vec!["b"]]);
        let header = extract_header(&ragged, &HeaderLabels::default());
        assert_eq!(header.location, "");
    }

    #[test]
    fn label_match_is_exact_and_case_sensitive() {
        let m = Matrix::from_strings(vec![
            vec!["kunde:", "lower"],
            vec!["Kunde: ", "trimmed"],
            vec!["Kunde:x", "suffix"],
        ]);
        let header = extract_header(&m, &HeaderLabels::default());
        assert_eq!(header.customer, "trimmed");
    }

    #[test]
    fn first_occurrence_wins_for_right_values() {
        let m = Matrix::from_strings(vec![vec!["Kunde:", "First"], vec!["Kunde:", "Second"]]);
        assert_eq!(extract_header(&m, &HeaderLabels::default()).customer, "First");
    }

    #[test]
    fn label_in_last_column_yields_empty() {
        let m = Matrix::from_strings(vec![vec!["a", "Auftrag Nr.:"]]);
        assert_eq!(extract_header(&m, &HeaderLabels::default()).order_number, "");
    }

    #[test]
    fn numeric_values_render_without_decimals() {
        let m = Matrix::new(vec![vec![
            Cell::Text("Auftrag Nr.:".into()),
            Cell::Number(12345.0),
        ]]);
        assert_eq!(extract_header(&m, &HeaderLabels::default()).order_number, "12345");
    }

    #[test]
    fn empty_matrix_gives_empty_record() {
        let header = extract_header(&Matrix::default(), &HeaderLabels::default());
        assert!(header.is_empty());
    }

    #[test]
    fn custom_labels() {
        let labels = HeaderLabels {
            facility: "Objekt".into(),
            ..HeaderLabels::default()
        };
        let m = Matrix::from_strings(vec![vec!["Objekt", " Halle 3 "]]);
        assert_eq!(extract_header(&m, &labels).facility, "Halle 3");
    }
}
