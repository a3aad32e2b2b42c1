//! Calculation logic for the AC4 engine.
//!
//! This module contains the hour-granular tariff classifier, period and
//! operational-day detection, scale color detection, work record creation
//! and the pt-BR locale helpers used to label records.

mod locale;
mod period;
mod scale_color;
mod tariff_classifier;
mod work_record;

pub use locale::{
    date_weekday_name, format_currency, month_name, weekday_name, MONTH_NAMES, WEEKDAY_NAMES,
};
pub use period::{get_period, operational_date, Period, NIGHT_END_HOUR, NIGHT_START_HOUR};
pub use scale_color::{get_scale_color, ScaleColor};
pub use tariff_classifier::{classify, classify_hourly, duty_block_in_range, MAX_DUTY_HOURS};
pub use work_record::{calculate_end_hour, create_work_record, parse_hour_minute};
