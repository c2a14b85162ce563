// File I/O: turn spreadsheet files into matrices, write reports.

pub mod csv;
pub mod error;
pub mod report;
pub mod xlsx;

use std::path::Path;

use orderrecon_engine::Matrix;

pub use error::LoadError;
pub use report::write_report;

/// Import formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Delimiter sniffed from content.
    Delimited,
    /// Tab-separated.
    Tsv,
    /// Anything calamine opens.
    Workbook,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Ok(Self::Delimited),
            "tsv" | "tab" => Ok(Self::Tsv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::Workbook),
            _ => Err(LoadError::UnsupportedFormat(ext)),
        }
    }
}

/// Load a file into a fully materialized matrix. `sheet` only applies to
/// workbook formats.
pub fn load_matrix(path: &Path, sheet: Option<&str>) -> Result<Matrix, LoadError> {
    let format = FileFormat::from_path(path)?;
    if sheet.is_some() && format != FileFormat::Workbook {
        log::warn!("{}: --sheet ignored for delimited text", path.display());
    }
    let matrix = match format {
        FileFormat::Delimited => csv::import(path)?,
        FileFormat::Tsv => csv::import_tsv(path)?,
        FileFormat::Workbook => xlsx::import(path, sheet)?,
    };
    log::info!("loaded {} ({} rows)", path.display(), matrix.row_count());
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.CSV")).unwrap(), FileFormat::Delimited);
        assert_eq!(FileFormat::from_path(Path::new("a.tsv")).unwrap(), FileFormat::Tsv);
        assert_eq!(FileFormat::from_path(Path::new("a.xlsx")).unwrap(), FileFormat::Workbook);
        assert_eq!(FileFormat::from_path(Path::new("a.ods")).unwrap(), FileFormat::Workbook);
        assert!(matches!(
            FileFormat::from_path(Path::new("a.pdf")),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "pdf"
        ));
        assert!(FileFormat::from_path(&PathBuf::from("noext")).is_err());
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        std::fs::write(&path, "Auftrag;Betrag\nA-1;5,00\n").unwrap();

        let m = load_matrix(&path, None).unwrap();
        assert_eq!(m.row_count(), 2);
        assert_eq!(m.cell(1, 1).display(), "5,00");
    }
}
