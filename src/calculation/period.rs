//! Period detection and operational-day attribution.
//!
//! This module provides utilities for determining whether an hour slice is
//! priced as day or night time, and to which civil date a night slice is
//! attributed for scale-color purposes.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// First hour of the evening night band.
pub const NIGHT_START_HOUR: u32 = 22;

/// Last hour of the early-morning night band (the band ends at 05:00).
pub const NIGHT_END_HOUR: u32 = 4;

/// The daily tariff tier of an hour slice.
///
/// # Example
///
/// ```
/// use ac4_engine::calculation::Period;
///
/// let period = Period::Night;
/// assert_eq!(period.to_string(), "Night");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Hours 05 through 21.
    Day,
    /// Hours 22, 23 and 00 through 04.
    Night,
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Day => write!(f, "Day"),
            Period::Night => write!(f, "Night"),
        }
    }
}

/// Determines the period for an hour of the day (0-23).
///
/// # Example
///
/// ```
/// use ac4_engine::calculation::{get_period, Period};
///
/// assert_eq!(get_period(21), Period::Day);
/// assert_eq!(get_period(22), Period::Night);
/// assert_eq!(get_period(4), Period::Night);
/// assert_eq!(get_period(5), Period::Day);
/// ```
pub fn get_period(hour: u32) -> Period {
    if hour >= NIGHT_START_HOUR || hour <= NIGHT_END_HOUR {
        Period::Night
    } else {
        Period::Day
    }
}

/// Returns the operational date of an hour slice.
///
/// Slices starting between 00:00 and 04:59 belong to the night that began on
/// the previous civil date, so they are attributed to that date. Every other
/// slice belongs to its own civil date.
///
/// # Example
///
/// ```
/// use ac4_engine::calculation::operational_date;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// // Saturday 03:00 is still Friday's night
/// let slice = NaiveDateTime::parse_from_str("2026-01-17 03:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(operational_date(slice), NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());
/// ```
pub fn operational_date(slice_start: NaiveDateTime) -> NaiveDate {
    let date = slice_start.date();
    if slice_start.hour() <= NIGHT_END_HOUR {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}
