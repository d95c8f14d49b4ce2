//! Measurement configuration file, e.g. `measurements.toml`:
//!
//! ```toml
//! shape = "parallelepiped"
//! length_uom = "meter"
//! weight_uom = "kilogram"
//! density_weight_uom = "kilogram"
//! density_volume_uom = "liter"
//! code_failure_policy = "fallback"
//! ```
//!
//! Units are referenced by catalog id. A missing `measurement_code_formula`
//! means the default formula; an empty one disables the code.

use crate::error::Result;
use measurements_model::{Configuration, ConfigurationRecord};
use measurements_uom::UomCatalog;
use std::path::Path;
use tracing::{info, warn};

/// Loads and saves the measurement configuration.
pub struct ConfigStore;

impl ConfigStore {
    /// Reads the configuration at `path`, resolving units against `catalog`.
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: impl AsRef<Path>, catalog: &UomCatalog) -> Result<Configuration> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No measurements config found at {:?}, using defaults", path);
            return Ok(Configuration::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let record: ConfigurationRecord = toml::from_str(&contents).inspect_err(|e| {
            warn!("Failed to parse measurements config {:?}: {}", path, e);
        })?;
        let config = record.resolve(catalog)?;
        info!("Loaded measurements config from {:?}", path);
        Ok(config)
    }

    /// Validates `config` and writes it to `path`. An invalid configuration
    /// is never written.
    pub fn save(path: impl AsRef<Path>, config: &Configuration, catalog: &UomCatalog) -> Result<()> {
        let path = path.as_ref();
        if let Err(e) = config.validate(catalog) {
            warn!("Refusing to save measurements config to {:?}: {}", path, e);
            return Err(e.into());
        }

        let contents = toml::to_string_pretty(&config.to_record())?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        info!("Saved measurements config to {:?}", path);
        Ok(())
    }
}
