//! Work record model.
//!
//! A [`WorkRecord`] is a priced duty entry. Its value, end hour and weekday
//! name are computed once when the record is created and stored as-is, so a
//! later change of tariff constants never alters historical pay. The only
//! field that may change afterwards is the free-text reference number.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::time_format::hour_minute;

/// A user-entered duty block awaiting pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyRequest {
    /// Start date of the block.
    pub date: NaiveDate,
    /// Wall-clock start time.
    #[serde(with = "hour_minute")]
    pub start_hour: NaiveTime,
    /// Length of the block in whole hours.
    pub duration: u32,
    /// Optional reference number.
    #[serde(default)]
    pub rai_number: Option<String>,
}

/// An immutable, priced duty entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRecord {
    id: String,
    date: NaiveDate,
    #[serde(with = "hour_minute")]
    start_hour: NaiveTime,
    #[serde(with = "hour_minute")]
    end_hour: NaiveTime,
    duration: u32,
    value: Decimal,
    weekday: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rai_number: Option<String>,
}

impl WorkRecord {
    /// Assembles a record from already computed parts.
    ///
    /// Use [`crate::calculation::create_work_record`] to price a request.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        date: NaiveDate,
        start_hour: NaiveTime,
        end_hour: NaiveTime,
        duration: u32,
        value: Decimal,
        weekday: String,
        rai_number: Option<String>,
    ) -> Self {
        Self {
            id,
            date,
            start_hour,
            end_hour,
            duration,
            value,
            weekday,
            rai_number: normalize_reference(rai_number.as_deref()),
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Start date of the duty block.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Wall-clock start time.
    pub fn start_hour(&self) -> NaiveTime {
        self.start_hour
    }

    /// Wall-clock end time, informational only.
    pub fn end_hour(&self) -> NaiveTime {
        self.end_hour
    }

    /// Duration in whole hours.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Value computed at creation time.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Localized weekday name captured at creation time.
    pub fn weekday(&self) -> &str {
        &self.weekday
    }

    /// Reference number, if any.
    pub fn rai_number(&self) -> Option<&str> {
        self.rai_number.as_deref().filter(|t| !t.is_empty())
    }

    /// Replaces the reference number, upper-cased. Blank text clears it.
    pub fn set_rai_number(&mut self, text: &str) {
        self.rai_number = normalize_reference(Some(&text.to_uppercase()));
    }
}

fn normalize_reference(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
