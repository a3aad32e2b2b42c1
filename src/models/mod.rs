//! Core data models for the AC4 engine.
//!
//! This module contains the domain entities shared by the classifier, the
//! calendar and the ledger.

mod calendar_event;
mod shift_type;
mod tariff_breakdown;
mod time_format;
mod work_record;

pub use calendar_event::{CalendarEvent, MarkerOverride, OverrideField, ResolvedMarker};
pub use shift_type::{
    default_shift_types, extra_duty_shift_type, ShiftType, EXTRA_DUTY_SHIFT_ID, ORDINARY_SHIFT_ID,
};
pub use tariff_breakdown::{HourlyRate, TariffBreakdown};
pub use time_format::hour_minute;
pub use work_record::{DutyRequest, WorkRecord};
