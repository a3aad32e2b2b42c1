//! Configuration types for the AC4 tariff.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every type also has a
//! built-in default so the engine can run without a configuration directory.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{Period, ScaleColor};

/// Metadata about the tariff scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeMetadata {
    /// The scheme code (e.g., "AC4").
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// The version or effective year of the rates.
    pub version: String,
    /// ISO currency code the rates are expressed in.
    pub currency: String,
    /// Locale used for weekday names and currency formatting.
    pub locale: String,
}

impl Default for SchemeMetadata {
    fn default() -> Self {
        Self {
            code: "AC4".to_string(),
            name: "Indenização por Serviço Extraordinário".to_string(),
            version: "2025".to_string(),
            currency: "BRL".to_string(),
            locale: "pt-BR".to_string(),
        }
    }
}

/// Hourly rates for the two periods of one scale color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRates {
    /// Rate for hours 05:00-21:59.
    pub day: Decimal,
    /// Rate for hours 22:00-04:59.
    pub night: Decimal,
}

/// The AC4 rate table keyed by scale color and period.
///
/// # Example
///
/// ```
/// use ac4_engine::calculation::{Period, ScaleColor};
/// use ac4_engine::config::TariffTable;
/// use rust_decimal::Decimal;
///
/// let table = TariffTable::default();
/// assert_eq!(table.rate(ScaleColor::Red, Period::Night), Decimal::new(4138, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffTable {
    /// Monday to Thursday rates.
    pub blue: PeriodRates,
    /// Friday to Sunday rates.
    pub red: PeriodRates,
}

impl TariffTable {
    /// Looks up the hourly rate for a color and period.
    pub fn rate(&self, color: ScaleColor, period: Period) -> Decimal {
        let rates = match color {
            ScaleColor::Blue => &self.blue,
            ScaleColor::Red => &self.red,
        };
        match period {
            Period::Day => rates.day,
            Period::Night => rates.night,
        }
    }
}

impl Default for TariffTable {
    fn default() -> Self {
        Self {
            blue: PeriodRates {
                day: Decimal::new(2647, 2),
                night: Decimal::new(2980, 2),
            },
            red: PeriodRates {
                day: Decimal::new(3641, 2),
                night: Decimal::new(4138, 2),
            },
        }
    }
}

/// Structure of `tariff.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TariffFile {
    /// Scheme metadata.
    pub scheme: SchemeMetadata,
    /// The rate table.
    pub rates: TariffTable,
}

/// Holiday definitions from `holidays.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayConfig {
    /// Holidays repeating every year, keyed by `MM-DD`.
    pub recurring: BTreeMap<String, String>,
    /// Holidays on one specific date.
    #[serde(default)]
    pub dated: BTreeMap<NaiveDate, String>,
}

impl Default for HolidayConfig {
    fn default() -> Self {
        let recurring = [
            ("01-01", "Ano Novo"),
            ("04-03", "Sexta-feira Santa"),
            ("04-21", "Dia de Tiradentes"),
            ("05-01", "Dia do Trabalho"),
            ("09-07", "Independência do Brasil"),
            ("10-12", "Nossa Sra. Aparecida"),
            ("11-02", "Dia de Finados"),
            ("11-15", "Proclamação da República"),
            ("11-20", "Dia da Consciência Negra"),
            ("12-25", "Natal"),
            ("02-16", "Carnaval"),
            ("02-17", "Carnaval"),
            ("02-18", "Quarta-feira de Cinzas"),
            ("06-04", "Corpus Christi"),
        ]
        .into_iter()
        .map(|(key, name)| (key.to_string(), name.to_string()))
        .collect();

        Self {
            recurring,
            dated: BTreeMap::new(),
        }
    }
}

/// Hourly rate table keyed by role, as reported by the rate lookup.
///
/// This is advisory data only. It is not the AC4 color/period table and is
/// never fed into the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleRateTable {
    /// Enlisted rate.
    pub praca: Decimal,
    /// Officer rate.
    pub oficial: Decimal,
    /// Senior officer rate.
    pub oficial_superior: Decimal,
}

impl Default for RoleRateTable {
    fn default() -> Self {
        Self {
            praca: Decimal::new(2647, 2),
            oficial: Decimal::new(3500, 2),
            oficial_superior: Decimal::new(4500, 2),
        }
    }
}

/// Rate lookup settings from `role_rates.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Table returned whenever the lookup fails.
    pub defaults: RoleRateTable,
    /// Upper bound on a single lookup, in seconds.
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            defaults: RoleRateTable::default(),
            timeout_secs: 20,
        }
    }
}

/// The complete tariff configuration.
///
/// This struct aggregates all configuration loaded from the YAML files in a
/// configuration directory, or the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct TariffConfig {
    /// Scheme metadata.
    metadata: SchemeMetadata,
    /// The AC4 rate table.
    tariff: TariffTable,
    /// Holiday definitions.
    holidays: HolidayConfig,
    /// Rate lookup settings.
    lookup: LookupConfig,
}

impl TariffConfig {
    /// Creates a new TariffConfig from its component parts.
    pub fn new(
        metadata: SchemeMetadata,
        tariff: TariffTable,
        holidays: HolidayConfig,
        lookup: LookupConfig,
    ) -> Self {
        Self {
            metadata,
            tariff,
            holidays,
            lookup,
        }
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.metadata
    }

    /// Returns the rate table.
    pub fn tariff(&self) -> &TariffTable {
        &self.tariff
    }

    /// Returns the holiday definitions.
    pub fn holidays(&self) -> &HolidayConfig {
        &self.holidays
    }

    /// Returns the rate lookup settings.
    pub fn lookup(&self) -> &LookupConfig {
        &self.lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_table_has_ac4_constants() {
        let table = TariffTable::default();
        assert_eq!(table.rate(ScaleColor::Blue, Period::Day), dec("26.47"));
        assert_eq!(table.rate(ScaleColor::Blue, Period::Night), dec("29.80"));
        assert_eq!(table.rate(ScaleColor::Red, Period::Day), dec("36.41"));
        assert_eq!(table.rate(ScaleColor::Red, Period::Night), dec("41.38"));
    }

    #[test]
    fn test_tariff_table_deserializes_from_yaml_strings() {
        let yaml = r#"
blue:
  day: "10.00"
  night: "11.00"
red:
  day: "12.00"
  night: "13.50"
"#;
        let table: TariffTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(table.rate(ScaleColor::Red, Period::Night), dec("13.50"));
        assert_eq!(table.rate(ScaleColor::Blue, Period::Day), dec("10.00"));
    }

    #[test]
    fn test_role_rate_table_uses_pascal_case_keys() {
        let json = serde_json::to_value(RoleRateTable::default()).unwrap();
        assert!(json.get("Praca").is_some());
        assert!(json.get("OficialSuperior").is_some());
    }

    #[test]
    fn test_default_holidays_include_christmas() {
        let holidays = HolidayConfig::default();
        assert_eq!(holidays.recurring.get("12-25").map(String::as_str), Some("Natal"));
        assert!(holidays.dated.is_empty());
    }
}
