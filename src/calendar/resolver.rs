//! Effective marker resolution.
//!
//! Combines a day's shift type references and overrides with the global
//! registry to produce what is actually drawn for that day.

use crate::models::{CalendarEvent, MarkerOverride, ResolvedMarker};

use super::registry::ShiftTypeRegistry;

/// Resolves the markers drawn for an event, in rendering order.
///
/// References to shift types missing from the registry are skipped. For the
/// rest, the day's override (if any) is merged over the global definition
/// field by field.
///
/// # Example
///
/// ```
/// use ac4_engine::calendar::{ShiftTypeRegistry, resolve_markers};
/// use ac4_engine::models::{CalendarEvent, OverrideField};
/// use chrono::NaiveDate;
///
/// let registry = ShiftTypeRegistry::default();
/// let mut event = CalendarEvent::new(
///     NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
///     vec!["ordinario".to_string(), "deleted".to_string()],
/// );
/// event.set_override("ordinario", OverrideField::Color, "#FF00FF");
///
/// let markers = resolve_markers(&event, &registry);
/// assert_eq!(markers.len(), 1);
/// assert_eq!(markers[0].color, "#FF00FF");
/// assert_eq!(markers[0].label, "TURNO");
/// ```
pub fn resolve_markers(event: &CalendarEvent, registry: &ShiftTypeRegistry) -> Vec<ResolvedMarker> {
    event
        .shift_type_ids
        .iter()
        .filter_map(|id| {
            let base = registry.get(id)?;
            Some(match event.overrides.get(id) {
                Some(over) => over.apply(base),
                None => MarkerOverride::default().apply(base),
            })
        })
        .collect()
}
