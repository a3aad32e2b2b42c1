//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the tariff
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::calculation::{Period, ScaleColor};
use crate::error::{EngineError, EngineResult};

use super::types::{
    HolidayConfig, LookupConfig, RoleRateTable, SchemeMetadata, TariffConfig, TariffFile,
    TariffTable,
};

/// Loads and provides access to the tariff configuration.
///
/// # Directory Structure
///
/// ```text
/// config/ac4/
/// ├── tariff.yaml      # Scheme metadata and the color × period rate table
/// ├── holidays.yaml    # Recurring and dated holidays
/// └── role_rates.yaml  # Advisory role rates and lookup timeout
/// ```
///
/// # Example
///
/// ```no_run
/// use ac4_engine::calculation::{Period, ScaleColor};
/// use ac4_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ac4").unwrap();
/// let rate = loader.rate(ScaleColor::Red, Period::Night);
/// println!("Red night rate: {}", rate);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: TariffConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing or contains invalid
    /// YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tariff_file = Self::load_yaml::<TariffFile>(&path.join("tariff.yaml"))?;
        let holidays = Self::load_yaml::<HolidayConfig>(&path.join("holidays.yaml"))?;
        let lookup = Self::load_yaml::<LookupConfig>(&path.join("role_rates.yaml"))?;

        let config = TariffConfig::new(tariff_file.scheme, tariff_file.rates, holidays, lookup);

        Ok(Self { config })
    }

    /// Builds a loader around an already assembled configuration.
    pub fn from_config(config: TariffConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying tariff configuration.
    pub fn config(&self) -> &TariffConfig {
        &self.config
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        self.config.scheme()
    }

    /// Returns the rate table used by the classifier.
    pub fn tariff(&self) -> &TariffTable {
        self.config.tariff()
    }

    /// Gets the hourly rate for a scale color and period.
    pub fn rate(&self, color: ScaleColor, period: Period) -> Decimal {
        self.config.tariff().rate(color, period)
    }

    /// Returns the holiday definitions.
    pub fn holidays(&self) -> &HolidayConfig {
        self.config.holidays()
    }

    /// Returns the fallback role rate table for the advisory lookup.
    pub fn default_role_rates(&self) -> RoleRateTable {
        self.config.lookup().defaults
    }

    /// Returns the rate lookup settings.
    pub fn lookup(&self) -> &LookupConfig {
        self.config.lookup()
    }
}
