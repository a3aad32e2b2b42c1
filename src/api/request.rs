//! Request types for the AC4 engine API.
//!
//! Request bodies use snake_case field names. Shift types and calendar
//! events are accepted in their persisted camelCase shape.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calculation::{duty_block_in_range, MAX_DUTY_HOURS};
use crate::calendar::PaintTool;
use crate::models::{hour_minute, CalendarEvent, MarkerOverride, OverrideField};

/// Request body for `POST /classify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    /// Start date of the block.
    pub date: NaiveDate,
    /// Wall-clock start, `HH:MM`.
    #[serde(with = "hour_minute")]
    pub start_hour: NaiveTime,
    /// Length in whole hours, 1 to 24.
    pub duration: u32,
}

impl ClassifyRequest {
    /// Checks the duration and date range, returning a message on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.duration == 0 || self.duration > MAX_DUTY_HOURS {
            return Err(format!(
                "duration must be between 1 and {} hours, got {}",
                MAX_DUTY_HOURS, self.duration
            ));
        }
        if !duty_block_in_range(self.date, self.start_hour, self.duration) {
            return Err(format!(
                "duty block starting {} runs past the supported date range",
                self.date
            ));
        }
        Ok(())
    }
}

/// Request body for `PUT /calendar/events`.
///
/// Without an `id` a fresh one is generated. Either way the saved event
/// replaces whatever is stored for its date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEventRequest {
    /// Optional event id.
    #[serde(default)]
    pub id: Option<String>,
    /// The date of the event.
    pub date: NaiveDate,
    /// Markers in rendering order.
    #[serde(default)]
    pub shift_type_ids: Vec<String>,
    /// Free-text note.
    #[serde(default)]
    pub observation: String,
    /// Per-day overrides keyed by shift type id.
    #[serde(default)]
    pub overrides: BTreeMap<String, MarkerOverride>,
}

impl From<SaveEventRequest> for CalendarEvent {
    fn from(req: SaveEventRequest) -> Self {
        let mut event = CalendarEvent::new(req.date, req.shift_type_ids);
        if let Some(id) = req.id.filter(|id| !id.is_empty()) {
            event.id = id;
        }
        event.observation = req.observation;
        event.overrides = req.overrides;
        event
    }
}

/// Request body for `POST /calendar/paint`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintRequest {
    /// The clicked date.
    pub date: NaiveDate,
    /// The selected tool.
    pub tool: PaintTool,
}

/// Request body for `PUT /calendar/days/:date/overrides`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideRequest {
    /// The marker being restyled.
    pub shift_type_id: String,
    /// The field to override.
    pub field: OverrideField,
    /// The new value.
    pub value: String,
}

/// Request body for `PATCH /records/:id/rai`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaiNumberRequest {
    /// The new reference number. Blank clears it.
    #[serde(default)]
    pub rai_number: String,
}
