//! Month grid layout and day views.
//!
//! A month is shown as six Monday-first weeks. Leading and trailing cells
//! belong to the neighbouring months and are flagged as such.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::ResolvedMarker;

/// Cells in a month grid: six weeks of seven days.
pub const GRID_CELLS: usize = 42;

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDay {
    /// The date shown in the cell.
    pub date: NaiveDate,
    /// False for padding days from the previous or next month.
    pub in_month: bool,
}

/// Everything drawn in one calendar cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayView {
    /// The date shown in the cell.
    pub date: NaiveDate,
    /// False for padding days from the previous or next month.
    pub in_month: bool,
    /// Holiday name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday: Option<String>,
    /// The day's note.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub observation: String,
    /// Markers in rendering order.
    pub markers: Vec<ResolvedMarker>,
}

/// Lays out the 42 cells for a month, starting on the Monday on or before
/// the 1st.
///
/// Returns `None` for an invalid year/month, or when the grid would run
/// outside the supported date range.
///
/// # Example
///
/// ```
/// use ac4_engine::calendar::month_grid;
/// use chrono::NaiveDate;
///
/// // January 2026 starts on a Thursday
/// let grid = month_grid(2026, 1).unwrap();
/// assert_eq!(grid.len(), 42);
/// assert_eq!(grid[0].date, NaiveDate::from_ymd_opt(2025, 12, 29).unwrap());
/// assert!(!grid[0].in_month);
/// assert!(grid[3].in_month);
/// ```
pub fn month_grid(year: i32, month: u32) -> Option<Vec<GridDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = i64::from(first.weekday().num_days_from_monday());
    let start = first.checked_sub_signed(Duration::days(lead))?;
    start.checked_add_signed(Duration::days(GRID_CELLS as i64 - 1))?;

    Some(
        start
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| GridDay {
                date,
                in_month: date.month() == month && date.year() == year,
            })
            .collect(),
    )
}
