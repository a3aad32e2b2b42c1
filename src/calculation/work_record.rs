//! Work record creation.
//!
//! This module validates a [`DutyRequest`] and prices it into an immutable
//! [`WorkRecord`], capturing the derived end hour and weekday name at
//! creation time.

use chrono::{Duration, NaiveTime};
use tracing::debug;
use uuid::Uuid;

use crate::config::TariffTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{DutyRequest, WorkRecord};

use super::locale::date_weekday_name;
use super::tariff_classifier::{classify, duty_block_in_range, MAX_DUTY_HOURS};

/// Parses a wall-clock `HH:MM` string.
///
/// # Example
///
/// ```
/// use ac4_engine::calculation::parse_hour_minute;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_hour_minute("08:30").unwrap(), NaiveTime::from_hms_opt(8, 30, 0).unwrap());
/// assert!(parse_hour_minute("8h").is_err());
/// ```
pub fn parse_hour_minute(value: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| EngineError::InvalidTime {
        value: value.to_string(),
    })
}

/// Computes the wall-clock end of a block: `(hour + duration) mod 24`,
/// keeping the minutes.
///
/// # Example
///
/// ```
/// use ac4_engine::calculation::calculate_end_hour;
/// use chrono::NaiveTime;
///
/// let start = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
/// assert_eq!(calculate_end_hour(start, 7), NaiveTime::from_hms_opt(5, 0, 0).unwrap());
/// ```
pub fn calculate_end_hour(start_hour: NaiveTime, duration_hours: u32) -> NaiveTime {
    let (end, _) = start_hour.overflowing_add_signed(Duration::hours(i64::from(duration_hours)));
    end
}

/// Prices a duty request into a new work record.
///
/// The request must have `1 <= duration <= 24` and end inside the supported
/// date range; anything else is rejected with [`EngineError::InvalidDuty`]
/// and no record is created.
///
/// # Example
///
/// ```
/// use ac4_engine::calculation::create_work_record;
/// use ac4_engine::config::TariffTable;
/// use ac4_engine::models::DutyRequest;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let request = DutyRequest {
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     start_hour: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
///     duration: 2,
///     rai_number: None,
/// };
/// let record = create_work_record(&request, &TariffTable::default()).unwrap();
/// assert_eq!(record.value(), Decimal::new(5627, 2));
/// assert_eq!(record.weekday(), "Quinta-feira");
/// ```
pub fn create_work_record(request: &DutyRequest, table: &TariffTable) -> EngineResult<WorkRecord> {
    if request.duration == 0 {
        return Err(EngineError::InvalidDuty {
            date: request.date.to_string(),
            message: "duration must be at least 1 hour".to_string(),
        });
    }
    if request.duration > MAX_DUTY_HOURS {
        return Err(EngineError::InvalidDuty {
            date: request.date.to_string(),
            message: format!("duration must not exceed {} hours", MAX_DUTY_HOURS),
        });
    }
    if !duty_block_in_range(request.date, request.start_hour, request.duration) {
        return Err(EngineError::InvalidDuty {
            date: request.date.to_string(),
            message: "duty block runs past the supported date range".to_string(),
        });
    }

    let value = classify(request.date, request.start_hour, request.duration, table);
    let end_hour = calculate_end_hour(request.start_hour, request.duration);

    debug!(
        date = %request.date,
        start_hour = %request.start_hour.format("%H:%M"),
        duration = request.duration,
        value = %value,
        "Priced duty request"
    );

    Ok(WorkRecord::new(
        Uuid::new_v4().to_string(),
        request.date,
        request.start_hour,
        end_hour,
        request.duration,
        value,
        date_weekday_name(request.date).to_string(),
        request.rai_number.clone(),
    ))
}
