// Application settings
// Loaded from --config, else ~/.config/orderrecon/settings.toml

use std::fs;
use std::path::{Path, PathBuf};

use orderrecon_engine::AnalysisOptions;
use orderrecon_recon::{ReconConfig, ReconError};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub analysis: AnalysisOptions,
    pub recon: ReconConfig,
}

/// Where the active settings came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    Explicit(PathBuf),
    UserConfig(PathBuf),
    Defaults,
}

impl std::fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(p) | Self::UserConfig(p) => write!(f, "{}", p.display()),
            Self::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl Settings {
    /// Get the per-user settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("orderrecon")
            .join("settings.toml")
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    /// Resolve settings: an explicit path must exist and parse; otherwise the
    /// per-user file is used when present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, SettingsSource), ConfigError> {
        if let Some(path) = explicit {
            let settings = Self::from_file(path)?;
            log::info!("settings loaded from {}", path.display());
            return Ok((settings, SettingsSource::Explicit(path.to_path_buf())));
        }

        let path = Self::config_path();
        if path.exists() {
            let settings = Self::from_file(&path)?;
            log::info!("settings loaded from {}", path.display());
            return Ok((settings, SettingsSource::UserConfig(path)));
        }

        log::debug!("no settings file at {}, using defaults", path.display());
        Ok((Self::default(), SettingsSource::Defaults))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let columns = &self.analysis.columns;
        for (role, keywords) in [
            ("amount", &columns.amount),
            ("date", &columns.date),
            ("order", &columns.order),
        ] {
            if keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "analysis.columns.{role} needs at least one keyword"
                )));
            }
        }

        if self.analysis.trend_points == 0 {
            return Err(ConfigError::Validation(
                "analysis.trend_points must be at least 1".into(),
            ));
        }

        let locale = &self.analysis.locale;
        if locale.decimal_separator == locale.thousands_separator {
            return Err(ConfigError::Validation(format!(
                "analysis.locale: decimal and thousands separator are both '{}'",
                locale.decimal_separator
            )));
        }

        let header = &self.analysis.header;
        for (field, label) in [
            ("date", &header.date),
            ("order_number", &header.order_number),
            ("location", &header.location),
            ("customer", &header.customer),
            ("facility", &header.facility),
        ] {
            if label.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "analysis.header.{field} must not be empty"
                )));
            }
        }

        self.recon.validate().map_err(|e| match e {
            ReconError::ConfigValidation(msg) => ConfigError::Validation(format!("recon: {msg}")),
            other => ConfigError::Validation(other.to_string()),
        })
    }

    /// Write the commented default settings file. Refuses to overwrite.
    pub fn write_template(path: &Path) -> Result<(), ConfigError> {
        let io_err = |e: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        if path.exists() {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                message: "already exists".into(),
            });
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, DEFAULT_TEMPLATE).map_err(io_err)
    }
}

/// Commented settings file matching `Settings::default()`.
pub const DEFAULT_TEMPLATE: &str = r#"# orderrecon settings

[analysis]
# Number of points sampled for the amount trend
trend_points = 20

# Header keywords (case-insensitive substrings) used to find columns
[analysis.columns]
amount = ["betrag", "amount", "summe", "wert"]
date = ["datum", "date", "zeit", "time"]
order = ["auftrag", "order", "nr"]

# Exact label cells of the Order Log header block
[analysis.header]
date = "Nr.:"
order_number = "Auftrag Nr.:"
location = "Ort:"
customer = "Kunde:"
facility = "Anlage:"

[analysis.locale]
currency_symbol = "€"
decimal_separator = ","
thousands_separator = "."

[recon]
# Largest |B - A| in cents still reported as a match
tolerance_cents = 0
# Repeated order keys within one file: "sum" or "first"
duplicates = "sum"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use orderrecon_recon::DuplicatePolicy;

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn template_matches_defaults() {
        assert_eq!(Settings::from_toml(DEFAULT_TEMPLATE).unwrap(), Settings::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let settings = Settings::from_toml(
            r#"
[analysis.columns]
order = ["beleg"]

[recon]
duplicates = "first"
"#,
        )
        .unwrap();
        assert_eq!(settings.analysis.columns.order, vec!["beleg"]);
        assert_eq!(settings.analysis.columns.amount.len(), 4);
        assert_eq!(settings.analysis.header.customer, "Kunde:");
        assert_eq!(settings.recon.duplicates, DuplicatePolicy::First);
        assert_eq!(settings.recon.tolerance_cents, 0);
    }

    #[test]
    fn rejects_empty_keywords() {
        let err = Settings::from_toml("[analysis.columns]\namount = []\n").unwrap_err();
        assert!(err.to_string().contains("analysis.columns.amount"));
    }

    #[test]
    fn rejects_zero_trend_points() {
        assert!(matches!(
            Settings::from_toml("[analysis]\ntrend_points = 0\n"),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn rejects_same_separators() {
        let err = Settings::from_toml(
            "[analysis.locale]\ndecimal_separator = \".\"\nthousands_separator = \".\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_negative_tolerance() {
        let err = Settings::from_toml("[recon]\ntolerance_cents = -1\n").unwrap_err();
        assert!(err.to_string().contains("recon: tolerance_cents"));
    }

    #[test]
    fn rejects_bad_toml() {
        assert!(matches!(
            Settings::from_toml("[recon\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_toml("[recon]\nduplicates = \"max\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = Settings::load(Some(Path::new("/nonexistent/settings.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn write_template_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        Settings::write_template(&path).unwrap();

        let (settings, source) = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(source, SettingsSource::Explicit(path.clone()));

        assert!(Settings::write_template(&path).is_err());
    }
}
