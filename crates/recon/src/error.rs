use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (negative tolerance, etc.).
    ConfigValidation(String),
    /// Writing the delimited report failed.
    Export(String),
    /// JSON serialization of the result failed.
    Serialize(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Export(msg) => write!(f, "report export error: {msg}"),
            Self::Serialize(msg) => write!(f, "JSON serialization error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
