use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum LoadError {
    /// File could not be opened or read.
    Io { path: PathBuf, message: String },
    /// Extension is not one of the supported import formats.
    UnsupportedFormat(String),
    /// Delimited text or workbook content could not be parsed.
    Parse { path: PathBuf, message: String },
    /// Requested worksheet does not exist.
    SheetNotFound { name: String, available: Vec<String> },
    /// Sheet holds more cells than the import limit.
    TooLarge { path: PathBuf, limit: usize },
    /// Report extension is not one of the writable formats.
    UnsupportedReport(String),
    /// Workbook has no worksheets at all.
    NoSheets(PathBuf),
    /// Writing a report file failed.
    Write { path: PathBuf, message: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "cannot read {}: {message}", path.display()),
            Self::UnsupportedFormat(ext) => write!(
                f,
                "unsupported file format '{ext}' (expected csv, tsv, txt, xlsx, xlsm, xls, xlsb, ods)"
            ),
            Self::Parse { path, message } => write!(f, "cannot parse {}: {message}", path.display()),
            Self::SheetNotFound { name, available } => write!(
                f,
                "sheet '{name}' not found (available: {})",
                available.join(", ")
            ),
            Self::TooLarge { path, limit } => write!(
                f,
                "{} exceeds the import limit of {limit} cells",
                path.display()
            ),
            Self::UnsupportedReport(ext) => write!(
                f,
                "unsupported report format '{ext}' (expected csv, json, xlsx)"
            ),
            Self::NoSheets(path) => write!(f, "{} contains no sheets", path.display()),
            Self::Write { path, message } => write!(f, "cannot write {}: {message}", path.display()),
        }
    }
}

impl std::error::Error for LoadError {}
