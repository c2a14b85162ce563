use crate::error::ReconError;
use crate::model::{ReconItem, ReconResult};

pub const EXPORT_HEADER: [&str; 6] = ["OrderKey", "Status", "AmountA", "AmountB", "Difference", "Message"];

const NOT_AVAILABLE: &str = "N/A";
const NO_DIFFERENCE: &str = "—";

/// Render every item, in result order, as a comma-delimited UTF-8 document
/// with a header row. Fields holding the delimiter or quotes are quoted.
pub fn export_csv(result: &ReconResult) -> Result<String, ReconError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(EXPORT_HEADER)
        .map_err(|e| ReconError::Export(e.to_string()))?;

    for item in &result.items {
        writer
            .write_record(export_row(item))
            .map_err(|e| ReconError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReconError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReconError::Export(e.to_string()))
}

fn export_row(item: &ReconItem) -> [String; 6] {
    [
        item.order_key.clone(),
        item.status.label().to_string(),
        item.amount_a.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.2}")),
        item.amount_b.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.2}")),
        item.difference.map_or_else(|| NO_DIFFERENCE.to_string(), |d| format!("{d:+.2}")),
        item.message.clone(),
    ]
}

impl ReconResult {
    pub fn to_csv(&self) -> Result<String, ReconError> {
        export_csv(self)
    }

    pub fn to_json(&self) -> Result<String, ReconError> {
        serde_json::to_string_pretty(self).map_err(|e| ReconError::Serialize(e.to_string()))
    }
}
