use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    /// Settings file could not be read or written.
    Io { path: PathBuf, message: String },
    /// TOML parse / deserialization error.
    Parse(String),
    /// Values parse but are unusable (empty keyword list, etc.).
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "settings file {}: {message}", path.display()),
            Self::Parse(msg) => write!(f, "settings parse error: {msg}"),
            Self::Validation(msg) => write!(f, "settings validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
