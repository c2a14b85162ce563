// Reconciliation report writer (csv, json, xlsx)

use std::path::Path;

use orderrecon_recon::export::EXPORT_HEADER;
use orderrecon_recon::{ReconResult, ReconStatus};
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

use crate::error::LoadError;
use crate::FileFormat;

/// Write a reconciliation report, picking the format from the extension.
/// Unknown extensions fall back to the delimited document; workbook
/// extensions other than `xlsx` are rejected.
pub fn write_report(result: &ReconResult, path: &Path) -> Result<(), LoadError> {
    let write_err = |message: String| LoadError::Write {
        path: path.to_path_buf(),
        message,
    };

    match FileFormat::from_path(path) {
        Ok(FileFormat::Workbook) if has_extension(path, "xlsx") => {
            export_xlsx(result, path).map_err(|e| write_err(e.to_string()))?;
        }
        // Workbook reports are xlsx only
        Ok(FileFormat::Workbook) => {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_ascii_lowercase();
            return Err(LoadError::UnsupportedReport(ext));
        }
        _ if has_extension(path, "json") => {
            let json = result.to_json().map_err(|e| write_err(e.to_string()))?;
            std::fs::write(path, json).map_err(|e| write_err(e.to_string()))?;
        }
        _ => {
            let csv = result.to_csv().map_err(|e| write_err(e.to_string()))?;
            std::fs::write(path, csv).map_err(|e| write_err(e.to_string()))?;
        }
    }
    log::info!("wrote report to {}", path.display());
    Ok(())
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Two sheets: "Items" with the same columns as the delimited export, and
/// "Summary" with the counts.
pub fn export_xlsx(result: &ReconResult, path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let money = Format::new().set_num_format("#,##0.00");
    let flagged = Format::new().set_font_color(Color::RGB(0xC00000));

    let items = workbook.add_worksheet();
    items.set_name("Items")?;
    for (col, title) in EXPORT_HEADER.iter().enumerate() {
        items.write_string_with_format(0, col as u16, *title, &bold)?;
    }

    for (i, item) in result.items.iter().enumerate() {
        let row = (i + 1) as u32;
        items.write_string(row, 0, &item.order_key)?;
        if item.status == ReconStatus::Match {
            items.write_string(row, 1, item.status.label())?;
        } else {
            items.write_string_with_format(row, 1, item.status.label(), &flagged)?;
        }
        write_amount(items, row, 2, item.amount_a, &money, "N/A")?;
        write_amount(items, row, 3, item.amount_b, &money, "N/A")?;
        write_amount(items, row, 4, item.difference, &money, "—")?;
        items.write_string(row, 5, &item.message)?;
    }
    items.set_column_width(0, 18)?;
    items.set_column_width(1, 16)?;
    items.set_column_width(5, 60)?;

    let s = &result.summary;
    let summary = workbook.add_worksheet();
    summary.set_name("Summary")?;
    let rows: [(&str, f64); 10] = [
        ("Matches", s.match_count as f64),
        ("Match %", f64::from(s.match_percentage)),
        ("Amount mismatches", s.mismatch_count as f64),
        ("Discrepancies", s.discrepancy_count as f64),
        ("Missing in A", s.missing_in_a as f64),
        ("Missing in B", s.missing_in_b as f64),
        ("Orders in A", s.total_a as f64),
        ("Orders in B", s.total_b as f64),
        ("Duplicate rows in A", s.duplicate_rows_a as f64),
        ("Duplicate rows in B", s.duplicate_rows_b as f64),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
        summary.write_string_with_format(i as u32, 0, *label, &bold)?;
        summary.write_number(i as u32, 1, *value)?;
    }
    summary.set_column_width(0, 22)?;

    workbook.save(path)
}

fn write_amount(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
    money: &Format,
    placeholder: &str,
) -> Result<(), XlsxError> {
    match value {
        Some(v) => sheet.write_number_with_format(row, col, v, money)?,
        None => sheet.write_string(row, col, placeholder)?,
    };
    Ok(())
}
