// Workbook import (xlsx, xlsm, xls, xlsb, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use orderrecon_engine::{Cell, Matrix};

use crate::error::LoadError;

/// Maximum number of cells to import (prevents DoS from huge files)
const MAX_CELLS: usize = 5_000_000;

/// Import one worksheet of a workbook. `sheet` selects by name; `None`
/// takes the first sheet.
///
/// Leading empty rows and columns are kept as empty cells so positions
/// match what the user sees in the spreadsheet application.
pub fn import(path: &Path, sheet: Option<&str>) -> Result<Matrix, LoadError> {
    import_limited(path, sheet, MAX_CELLS)
}

/// Sheets above `max_cells` fail as a whole; no truncated matrix is returned.
fn import_limited(path: &Path, sheet: Option<&str>, max_cells: usize) -> Result<Matrix, LoadError> {
    let mut workbook: Sheets<_> = open_workbook_auto(path).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        message: format!("failed to open workbook: {e}"),
    })?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| LoadError::SheetNotFound {
                name: wanted.to_string(),
                available: sheet_names.clone(),
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| LoadError::NoSheets(path.to_path_buf()))?,
    };

    let range = workbook.worksheet_range(&name).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        message: format!("failed to read sheet '{name}': {e}"),
    })?;

    let (height, width) = range.get_size();
    if height == 0 || width == 0 {
        log::warn!("{}: sheet '{name}' is empty", path.display());
        return Ok(Matrix::default());
    }

    // Range start offset (data may not begin at A1)
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row as usize];
    let mut total_cells = 0usize;

    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col as usize];
        cells.extend(row.iter().map(to_cell));
        while matches!(cells.last(), Some(Cell::Empty)) {
            cells.pop();
        }
        total_cells += cells.len();
        if total_cells > max_cells {
            log::warn!("{}: sheet '{name}' exceeds {max_cells} cells", path.display());
            return Err(LoadError::TooLarge {
                path: path.to_path_buf(),
                limit: max_cells,
            });
        }
        rows.push(cells);
    }

    log::debug!(
        "{}: imported sheet '{name}' ({} rows, {total_cells} cells)",
        path.display(),
        rows.len()
    );
    Ok(Matrix::new(rows))
}

/// List the worksheet names of a workbook.
pub fn sheet_names(path: &Path) -> Result<Vec<String>, LoadError> {
    let workbook: Sheets<_> = open_workbook_auto(path).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        message: format!("failed to open workbook: {e}"),
    })?;
    Ok(workbook.sheet_names().to_vec())
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        // Store as TRUE/FALSE text, the way the sheet shows it
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
        // Dates stay as serials; the date parser understands them
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Cell::from(s.as_str()),
        Data::DurationIso(s) => Cell::from(s.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn write_fixture(path: &Path) {
        let mut workbook = Workbook::new();
        let first = workbook.add_worksheet();
        first.set_name("Orders").unwrap();
        first.write_string(0, 0, "Auftrag").unwrap();
        first.write_string(0, 1, "Betrag").unwrap();
        first.write_string(1, 0, "A-1").unwrap();
        first.write_number(1, 1, 12.5).unwrap();
        first.write_boolean(2, 0, true).unwrap();

        let second = workbook.add_worksheet();
        second.set_name("Offset").unwrap();
        second.write_string(2, 1, "Nr.:").unwrap();
        second.write_number(2, 2, 45226.0).unwrap();

        workbook.save(path).unwrap();
    }

    #[test]
    fn test_import_first_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.xlsx");
        write_fixture(&path);

        let m = import(&path, None).unwrap();
        assert_eq!(m.cell(0, 0), &Cell::Text("Auftrag".into()));
        assert_eq!(m.cell(1, 0), &Cell::Text("A-1".into()));
        assert_eq!(m.cell(1, 1), &Cell::Number(12.5));
        assert_eq!(m.cell(2, 0), &Cell::Text("TRUE".into()));
    }

    #[test]
    fn test_import_named_sheet_keeps_offset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.xlsx");
        write_fixture(&path);

        let m = import(&path, Some("Offset")).unwrap();
        assert_eq!(m.row_count(), 3);
        assert_eq!(m.cell(2, 1), &Cell::Text("Nr.:".into()));
        assert_eq!(m.cell(2, 2), &Cell::Number(45226.0));
        assert!(m.cell(0, 0).is_blank());
    }

    #[test]
    fn test_unknown_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.xlsx");
        write_fixture(&path);

        match import(&path, Some("Nope")) {
            Err(LoadError::SheetNotFound { name, available }) => {
                assert_eq!(name, "Nope");
                assert_eq!(available, vec!["Orders".to_string(), "Offset".to_string()]);
            }
            other => panic!("expected SheetNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_cell_limit_rejects_whole_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.xlsx");
        write_fixture(&path);

        // "Orders" holds 5 cells after trailing empties are trimmed
        let m = import_limited(&path, None, 5).unwrap();
        assert_eq!(m.row_count(), 3);

        match import_limited(&path, None, 4) {
            Err(LoadError::TooLarge { limit, .. }) => assert_eq!(limit, 4),
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_sheet_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.xlsx");
        write_fixture(&path);
        assert_eq!(sheet_names(&path).unwrap(), vec!["Orders", "Offset"]);
    }

    #[test]
    fn test_cell_mapping() {
        assert_eq!(to_cell(&Data::Bool(false)), Cell::Text("FALSE".into()));
        assert_eq!(to_cell(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(to_cell(&Data::String(String::new())), Cell::Empty);
    }
}
