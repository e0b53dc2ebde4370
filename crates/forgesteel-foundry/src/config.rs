//! Validator configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// Icon Foundry assigns to items that were never linked to a compendium.
pub const DEFAULT_ICON: &str = "icons/svg/mystery-man.svg";

/// Configuration for quality validation.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Required value of the converted document's `type`.
    pub expected_type: String,
    /// Keys that must exist under `system`.
    pub required_system_fields: Vec<String>,
    /// Original sections whose descriptions are audited.
    pub description_sections: Vec<String>,
    /// Icon that marks an item as unmapped.
    pub default_icon: String,
    /// Mapping rates below this produce a warning.
    pub low_mapping_threshold: f64,
    /// Unmapped item names included in a low-mapping warning.
    pub unmapped_sample_size: usize,
    /// Errors and warnings listed per block in the text report.
    pub report_listing_cap: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            expected_type: "hero".to_string(),
            required_system_fields: ["stamina", "characteristics", "combat", "hero"]
                .map(String::from)
                .to_vec(),
            description_sections: ["ancestry", "culture", "career", "class"]
                .map(String::from)
                .to_vec(),
            default_icon: DEFAULT_ICON.to_string(),
            low_mapping_threshold: 0.5,
            unmapped_sample_size: 5,
            report_listing_cap: 5,
        }
    }
}

impl ValidatorConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| ConvertError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ValidatorConfig =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                ConvertError::Config(format!(
                    "Failed to parse config '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the checks cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.low_mapping_threshold) {
            return Err(ConvertError::Config(format!(
                "low_mapping_threshold must be between 0 and 1, got {}",
                self.low_mapping_threshold
            )));
        }
        if self.expected_type.is_empty() {
            return Err(ConvertError::Config(
                "expected_type must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.expected_type, "hero");
        assert_eq!(config.required_system_fields.len(), 4);
        assert_eq!(config.low_mapping_threshold, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"report_listing_cap": 10}}"#).unwrap();

        let config = ValidatorConfig::load(file.path()).unwrap();
        assert_eq!(config.report_listing_cap, 10);
        assert_eq!(config.expected_type, "hero");
    }

    #[test]
    fn test_invalid_threshold() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"low_mapping_threshold": 1.5}}"#).unwrap();

        let err = ValidatorConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }
}
