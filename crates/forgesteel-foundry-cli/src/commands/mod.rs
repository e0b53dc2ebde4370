//! CLI command implementations.

pub mod level;
pub mod report;
pub mod validate;

use forgesteel_foundry::{Catalog, QualityValidator, ValidatorConfig, load_record};
use serde_json::Value;

use crate::cli::ConversionInputs;

/// Loaded inputs for one validation.
pub struct Conversion {
    pub original: Value,
    pub converted: Value,
    pub catalog: Catalog,
    pub validator: QualityValidator,
}

impl Conversion {
    pub fn load(inputs: &ConversionInputs) -> Result<Self, Box<dyn std::error::Error>> {
        let config = match &inputs.config {
            Some(path) => ValidatorConfig::load(path)?,
            None => ValidatorConfig::default(),
        };
        let catalog = match &inputs.catalog {
            Some(path) => Catalog::load(path)?,
            None => Catalog::empty(),
        };

        tracing::debug!(
            original = %inputs.original.display(),
            converted = %inputs.converted.display(),
            catalog_entries = catalog.len(),
            "loading conversion"
        );

        Ok(Self {
            original: load_record(&inputs.original)?,
            converted: load_record(&inputs.converted)?,
            catalog,
            validator: QualityValidator::with_config(config),
        })
    }
}
