// CSV/TSV import

use std::io::Read;
use std::path::Path;

use orderrecon_engine::{Cell, Matrix};

use crate::error::LoadError;

/// Import a delimited text file, sniffing the delimiter.
pub fn import(path: &Path) -> Result<Matrix, LoadError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    log::debug!(
        "{}: sniffed delimiter {:?}",
        path.display(),
        delimiter as char
    );
    parse_str(&content, delimiter).map_err(|message| LoadError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

pub fn import_tsv(path: &Path) -> Result<Matrix, LoadError> {
    let content = read_file_as_utf8(path)?;
    parse_str(&content, b'\t').map_err(|message| LoadError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
pub fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (number of lines with same field count as line 1) * field_count
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, LoadError> {
    let io_err = |e: std::io::Error| LoadError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut file = std::fs::File::open(path).map_err(io_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(io_err)?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    let mut content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            log::info!("{}: not UTF-8, decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    if content.starts_with('\u{feff}') {
        content.remove(0);
    }
    Ok(content)
}

/// Parse delimited text into a ragged matrix. Every field becomes a text
/// cell; empty fields become `Cell::Empty`. Rows keep their own width.
pub fn parse_str(content: &str, delimiter: u8) -> Result<Matrix, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        rows.push(record.iter().map(Cell::from).collect::<Vec<_>>());
    }

    Ok(Matrix::new(rows))
}
