//! Itemized classification output.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::calculation::{Period, ScaleColor};

/// One priced hour slice of a duty block.
///
/// # Example
///
/// ```
/// use ac4_engine::calculation::{Period, ScaleColor};
/// use ac4_engine::models::HourlyRate;
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let line = HourlyRate {
///     start: NaiveDateTime::parse_from_str("2026-01-16 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     hour: 22,
///     operational_date: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
///     color: ScaleColor::Red,
///     period: Period::Night,
///     rate: Decimal::new(4138, 2),
/// };
/// assert_eq!(line.rate, Decimal::new(4138, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRate {
    /// Wall-clock start of the slice.
    pub start: NaiveDateTime,
    /// Hour of day (0-23) the slice starts in.
    pub hour: u32,
    /// Civil date the slice's scale color was taken from.
    pub operational_date: NaiveDate,
    /// Scale color of the operational date.
    pub color: ScaleColor,
    /// Day or night period of the slice.
    pub period: Period,
    /// Rate charged for this hour.
    pub rate: Decimal,
}

/// The result of classifying a duty block hour by hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffBreakdown {
    /// The priced slices, in chronological order.
    pub lines: Vec<HourlyRate>,
    /// Sum of all slice rates, rounded to two decimal places.
    pub total: Decimal,
}

impl TariffBreakdown {
    /// Builds a breakdown from priced slices, rounding only the final sum.
    pub fn from_lines(lines: Vec<HourlyRate>) -> Self {
        let total = lines
            .iter()
            .map(|line| line.rate)
            .sum::<Decimal>()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self { lines, total }
    }

    /// Number of hours priced in the given period.
    pub fn hours_in(&self, period: Period) -> usize {
        self.lines.iter().filter(|line| line.period == period).count()
    }
}
