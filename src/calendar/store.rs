//! Calendar event store and paint interactions.
//!
//! The store keeps at most one [`CalendarEvent`] per date. Saving is keyed by
//! date with replace-if-exists semantics, and an event with neither markers
//! nor a note is deleted instead of stored.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{CalendarEvent, OverrideField, ResolvedMarker, EXTRA_DUTY_SHIFT_ID};

use super::registry::ShiftTypeRegistry;
use super::resolver::resolve_markers;

/// Markers a paint click may keep on one day.
pub const MAX_PAINTED_MARKERS: usize = 2;

/// What a save did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    /// The event was stored, replacing any event on the same date.
    Stored,
    /// The event was empty, so any event on that date was removed.
    Deleted,
    /// Nothing changed.
    Unchanged,
}

/// The tool selected for a paint click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "shift_type_id", rename_all = "snake_case")]
pub enum PaintTool {
    /// Toggle a shift type marker.
    Marker(String),
    /// Clear every marker and override on the day.
    Eraser,
}

/// Adds a marker under the two-slot rule.
///
/// Appends while fewer than [`MAX_PAINTED_MARKERS`] are present, otherwise
/// overwrites the second slot. The first slot is never evicted. Does nothing
/// if the id is already present.
pub fn place_marker(ids: &mut Vec<String>, shift_type_id: &str) {
    if ids.iter().any(|id| id == shift_type_id) {
        return;
    }
    if ids.len() < MAX_PAINTED_MARKERS {
        ids.push(shift_type_id.to_string());
    } else {
        ids[1] = shift_type_id.to_string();
    }
}

/// Toggles a marker: removes it if present, otherwise places it.
///
/// # Example
///
/// ```
/// use ac4_engine::calendar::toggle_marker;
///
/// let ids = vec!["a".to_string(), "b".to_string()];
/// assert_eq!(toggle_marker(&ids, "c"), vec!["a", "c"]);
/// assert_eq!(toggle_marker(&ids, "a"), vec!["b"]);
/// ```
pub fn toggle_marker(ids: &[String], shift_type_id: &str) -> Vec<String> {
    if ids.iter().any(|id| id == shift_type_id) {
        return ids
            .iter()
            .filter(|id| id.as_str() != shift_type_id)
            .cloned()
            .collect();
    }
    let mut next = ids.to_vec();
    place_marker(&mut next, shift_type_id);
    next
}

/// At most one calendar event per date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarStore {
    events: BTreeMap<NaiveDate, CalendarEvent>,
}

impl CalendarStore {
    /// Builds a store from a stored list. Later events for a date replace
    /// earlier ones; empty events are dropped.
    pub fn from_events(events: Vec<CalendarEvent>) -> Self {
        let mut store = Self::default();
        for event in events {
            store.save(event);
        }
        store
    }

    /// Saves an event keyed by its date.
    ///
    /// An existing event for the date is replaced, and its id discarded. An
    /// event with no markers and no note deletes any existing event for the
    /// date instead. Overrides for markers not on the date are dropped.
    pub fn save(&mut self, mut event: CalendarEvent) -> SaveOutcome {
        if event.is_empty() {
            let removed = self.events.remove(&event.date).is_some();
            debug!(date = %event.date, removed, "Empty calendar event not stored");
            return if removed {
                SaveOutcome::Deleted
            } else {
                SaveOutcome::Unchanged
            };
        }
        event.prune_overrides();
        self.events.insert(event.date, event);
        SaveOutcome::Stored
    }

    /// Deletes an event by id. Returns false if no event has the id.
    pub fn delete(&mut self, id: &str) -> bool {
        let date = self
            .events
            .values()
            .find(|event| event.id == id)
            .map(|event| event.date);
        match date {
            Some(date) => self.events.remove(&date).is_some(),
            None => false,
        }
    }

    /// Returns the event on a date.
    pub fn get(&self, date: NaiveDate) -> Option<&CalendarEvent> {
        self.events.get(&date)
    }

    /// Iterates over all events in date order.
    pub fn events(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.events.values()
    }

    /// Returns all events in date order.
    pub fn to_vec(&self) -> Vec<CalendarEvent> {
        self.events.values().cloned().collect()
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no event is stored.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Applies a paint click to a date.
    ///
    /// A marker tool toggles its id on the day, creating the event if needed.
    /// The eraser clears both markers and overrides; the event survives only
    /// if it still carries a note.
    pub fn paint(&mut self, date: NaiveDate, tool: &PaintTool) -> SaveOutcome {
        let existing = self.events.get(&date).cloned();
        match (tool, existing) {
            (PaintTool::Eraser, Some(mut event)) => {
                event.clear_markers();
                self.save(event)
            }
            (PaintTool::Eraser, None) => SaveOutcome::Unchanged,
            (PaintTool::Marker(id), Some(mut event)) => {
                event.shift_type_ids = toggle_marker(&event.shift_type_ids, id);
                self.save(event)
            }
            (PaintTool::Marker(id), None) => self.save(CalendarEvent::new(date, vec![id.clone()])),
        }
    }

    /// Places the reserved extra-duty marker on a date, keeping the existing
    /// event's id, note and overrides.
    pub fn mark_extra_duty(&mut self, date: NaiveDate) -> SaveOutcome {
        let mut event = self
            .events
            .get(&date)
            .cloned()
            .unwrap_or_else(|| CalendarEvent::new(date, Vec::new()));
        place_marker(&mut event.shift_type_ids, EXTRA_DUTY_SHIFT_ID);
        self.save(event)
    }

    /// Sets one override field for a shift type on a date.
    ///
    /// Returns false if there is no event on the date or the shift type is
    /// not drawn on it.
    pub fn set_override(
        &mut self,
        date: NaiveDate,
        shift_type_id: &str,
        field: OverrideField,
        value: &str,
    ) -> bool {
        match self.events.get_mut(&date) {
            Some(event) if event.shift_type_ids.iter().any(|id| id == shift_type_id) => {
                event.set_override(shift_type_id, field, value);
                true
            }
            _ => false,
        }
    }

    /// Resolves the markers drawn on a date.
    pub fn resolve(&self, date: NaiveDate, registry: &ShiftTypeRegistry) -> Vec<ResolvedMarker> {
        self.events
            .get(&date)
            .map(|event| resolve_markers(event, registry))
            .unwrap_or_default()
    }
}
