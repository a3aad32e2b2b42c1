//! Calendar event model and per-day marker overrides.
//!
//! A [`CalendarEvent`] holds the markers painted on one date. Its
//! `shift_type_ids` are references into the shift type registry, and its
//! `overrides` shadow individual style fields of those shift types on that
//! date only.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ShiftType;

/// Partial style set that shadows a shift type on one date.
///
/// Only fields that are present replace the global definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerOverride {
    /// Replacement label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Replacement background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Replacement label color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl MarkerOverride {
    /// Returns true if no field is overridden.
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.color.is_none() && self.text_color.is_none()
    }

    /// Merges this override over a shift type, field by field.
    ///
    /// # Example
    ///
    /// ```
    /// use ac4_engine::models::{MarkerOverride, ShiftType};
    ///
    /// let base = ShiftType::new("ordinario", "TURNO", "#0000FF", "#FFFFFF");
    /// let over = MarkerOverride { color: Some("#00FF00".to_string()), ..Default::default() };
    /// let marker = over.apply(&base);
    /// assert_eq!(marker.color, "#00FF00");
    /// assert_eq!(marker.label, "TURNO");
    /// ```
    pub fn apply(&self, base: &ShiftType) -> ResolvedMarker {
        ResolvedMarker {
            shift_type_id: base.id.clone(),
            label: self.label.clone().unwrap_or_else(|| base.label.clone()),
            color: self.color.clone().unwrap_or_else(|| base.color.clone()),
            text_color: self
                .text_color
                .clone()
                .unwrap_or_else(|| base.text_color.clone()),
            font_size: base.font_size,
            overridden: !self.is_empty(),
        }
    }
}

/// One overridable style field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideField {
    /// The marker label.
    Label,
    /// The background color.
    Color,
    /// The label color.
    TextColor,
}

/// The marker actually drawn for a shift type on a specific date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMarker {
    /// The referenced shift type.
    pub shift_type_id: String,
    /// Effective label.
    pub label: String,
    /// Effective background color.
    pub color: String,
    /// Effective label color.
    pub text_color: String,
    /// Font size from the global definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// Whether any field came from a per-day override.
    pub overridden: bool,
}

/// The markers and note attached to one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredCalendarEvent")]
pub struct CalendarEvent {
    /// Unique identifier.
    pub id: String,
    /// The date this event belongs to. At most one event exists per date.
    pub date: NaiveDate,
    /// Referenced shift types, in rendering order.
    pub shift_type_ids: Vec<String>,
    /// Free-text note.
    pub observation: String,
    /// Per-day style overrides keyed by shift type id.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, MarkerOverride>,
}

impl CalendarEvent {
    /// Creates an event with a fresh id.
    pub fn new(date: NaiveDate, shift_type_ids: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            shift_type_ids,
            observation: String::new(),
            overrides: BTreeMap::new(),
        }
    }

    /// Returns true if the event carries no markers and no note.
    pub fn is_empty(&self) -> bool {
        self.shift_type_ids.is_empty() && self.observation.is_empty()
    }

    /// Sets one override field for a shift type on this date.
    ///
    /// Labels are upper-cased like global shift type labels.
    pub fn set_override(&mut self, shift_type_id: &str, field: OverrideField, value: &str) {
        let entry = self
            .overrides
            .entry(shift_type_id.to_string())
            .or_default();
        match field {
            OverrideField::Label => entry.label = Some(value.to_uppercase()),
            OverrideField::Color => entry.color = Some(value.to_string()),
            OverrideField::TextColor => entry.text_color = Some(value.to_string()),
        }
    }

    /// Drops overrides for shift types no longer drawn on this date.
    pub fn prune_overrides(&mut self) {
        let ids = &self.shift_type_ids;
        self.overrides.retain(|id, _| ids.contains(id));
    }

    /// Drops all markers and overrides, keeping the note.
    pub fn clear_markers(&mut self) {
        self.shift_type_ids.clear();
        self.overrides.clear();
    }
}

/// Persisted shape of a calendar event, accepting the older single-marker
/// `shiftTypeId` field.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCalendarEvent {
    id: String,
    date: NaiveDate,
    #[serde(default)]
    shift_type_ids: Option<Vec<String>>,
    #[serde(default)]
    shift_type_id: Option<String>,
    #[serde(default)]
    observation: Option<String>,
    #[serde(default)]
    overrides: Option<BTreeMap<String, MarkerOverride>>,
}

impl From<StoredCalendarEvent> for CalendarEvent {
    fn from(stored: StoredCalendarEvent) -> Self {
        let shift_type_ids = match (stored.shift_type_ids, stored.shift_type_id) {
            (Some(ids), _) => ids,
            (None, Some(id)) => vec![id],
            (None, None) => Vec::new(),
        };

        Self {
            id: stored.id,
            date: stored.date,
            shift_type_ids,
            observation: stored.observation.unwrap_or_default(),
            overrides: stored.overrides.unwrap_or_default(),
        }
    }
}
