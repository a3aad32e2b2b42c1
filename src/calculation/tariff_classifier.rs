//! AC4 tariff classification.
//!
//! This module walks a duty block one hour at a time and prices each slice
//! from the rate table. Night slices after midnight keep the scale color of
//! the date the night started on, so a block starting at 22:00 is priced
//! under one color even when it runs into the next civil date.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;

use crate::config::TariffTable;
use crate::models::{HourlyRate, TariffBreakdown};

use super::period::{get_period, operational_date};
use super::scale_color::get_scale_color;

/// Longest duty block the engine prices as a single entry.
pub const MAX_DUTY_HOURS: u32 = 24;

/// Classifies a duty block hour by hour.
///
/// Each of the `duration_hours` slices is priced on its own hour-of-day and
/// operational weekday; the clock advances by exactly one hour per slice,
/// crossing midnight, month and year boundaries transparently. A zero
/// duration yields an empty breakdown with a zero total. Slices past the end
/// of the supported calendar are not priced; callers check
/// [`duty_block_in_range`] first.
///
/// # Example
///
/// ```
/// use ac4_engine::calculation::classify_hourly;
/// use ac4_engine::config::TariffTable;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// // 2026-01-15 is a Thursday: 21:00 is blue day, 22:00 is blue night
/// let breakdown = classify_hourly(
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
///     2,
///     &TariffTable::default(),
/// );
/// assert_eq!(breakdown.lines.len(), 2);
/// assert_eq!(breakdown.total, Decimal::new(5627, 2));
/// ```
pub fn classify_hourly(
    date: NaiveDate,
    start_hour: NaiveTime,
    duration_hours: u32,
    table: &TariffTable,
) -> TariffBreakdown {
    let mut slice_start = date.and_time(start_hour);
    let mut lines = Vec::with_capacity(duration_hours as usize);

    for _ in 0..duration_hours {
        let hour = slice_start.hour();
        let period = get_period(hour);
        let attributed = operational_date(slice_start);
        let color = get_scale_color(attributed.weekday());

        lines.push(HourlyRate {
            start: slice_start,
            hour,
            operational_date: attributed,
            color,
            period,
            rate: table.rate(color, period),
        });

        match slice_start.checked_add_signed(Duration::hours(1)) {
            Some(next) => slice_start = next,
            None => break,
        }
    }

    TariffBreakdown::from_lines(lines)
}

/// Returns true if every hour slice of the block can be represented.
///
/// Only blocks at the very edge of the calendar range fail this check.
pub fn duty_block_in_range(date: NaiveDate, start_hour: NaiveTime, duration_hours: u32) -> bool {
    let last_slice = i64::from(duration_hours.saturating_sub(1));
    date.and_time(start_hour)
        .checked_add_signed(Duration::hours(last_slice))
        .is_some()
}

/// Classifies a duty block and returns only the total value.
///
/// # Example
///
/// ```
/// use ac4_engine::calculation::classify;
/// use ac4_engine::config::TariffTable;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// // 2026-01-16 is a Friday: seven red night hours
/// let total = classify(
///     NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
///     NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     7,
///     &TariffTable::default(),
/// );
/// assert_eq!(total, Decimal::new(28966, 2));
/// ```
pub fn classify(
    date: NaiveDate,
    start_hour: NaiveTime,
    duration_hours: u32,
    table: &TariffTable,
) -> Decimal {
    classify_hourly(date, start_hour, duration_hours, table).total
}
