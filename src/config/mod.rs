//! Configuration loading and management for the AC4 engine.
//!
//! This module provides functionality to load the tariff configuration from
//! YAML files, including scheme metadata, the color × period rate table,
//! holidays and the advisory role rate defaults.
//!
//! # Example
//!
//! ```no_run
//! use ac4_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ac4").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    HolidayConfig, LookupConfig, PeriodRates, RoleRateTable, SchemeMetadata, TariffConfig,
    TariffFile, TariffTable,
};
