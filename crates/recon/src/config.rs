use serde::{Deserialize, Serialize};

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconConfig {
    /// Largest |B - A| in minor units (cents) still classified as a match.
    pub tolerance_cents: i64,
    /// How repeated order keys within one dataset are folded.
    pub duplicates: DuplicatePolicy,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            tolerance_cents: 0,
            duplicates: DuplicatePolicy::Sum,
        }
    }
}

// ---------------------------------------------------------------------------
// Duplicates
// ---------------------------------------------------------------------------

/// Folding rule for an order key that appears on several rows of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Sum the amounts, keep the earliest date.
    #[default]
    Sum,
    /// Keep the first row, ignore the rest.
    First,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sum => write!(f, "sum"),
            Self::First => write!(f, "first"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.tolerance_cents < 0 {
            return Err(ReconError::ConfigValidation(format!(
                "tolerance_cents must not be negative, got {}",
                self.tolerance_cents
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_uses_defaults() {
        let config = ReconConfig::from_toml("").unwrap();
        assert_eq!(config, ReconConfig::default());
        assert_eq!(config.tolerance_cents, 0);
        assert_eq!(config.duplicates, DuplicatePolicy::Sum);
    }

    #[test]
    fn parse_full() {
        let config = ReconConfig::from_toml(
            r#"
tolerance_cents = 1
duplicates = "first"
"#,
        )
        .unwrap();
        assert_eq!(config.tolerance_cents, 1);
        assert_eq!(config.duplicates, DuplicatePolicy::First);
    }

    #[test]
    fn reject_negative_tolerance() {
        let err = ReconConfig::from_toml("tolerance_cents = -5").unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn reject_unknown_policy() {
        let err = ReconConfig::from_toml(r#"duplicates = "average""#);
        assert!(err.is_err(), "unknown duplicate policy should fail deserialization");
    }
}
