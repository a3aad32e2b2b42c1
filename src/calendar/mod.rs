//! Shift markers calendar.
//!
//! This module contains the shift type registry, the per-date event store
//! with its paint rules, marker resolution against per-day overrides, and
//! the month grid and holiday lookups used for display.

mod grid;
mod holidays;
mod registry;
mod resolver;
mod store;

pub use grid::{month_grid, DayView, GridDay, GRID_CELLS};
pub use holidays::HolidayCalendar;
pub use registry::{ShiftTypeRegistry, UpsertOutcome};
pub use resolver::resolve_markers;
pub use store::{
    place_marker, toggle_marker, CalendarStore, PaintTool, SaveOutcome, MAX_PAINTED_MARKERS,
};
