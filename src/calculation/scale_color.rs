//! Weekly scale color detection.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// The weekly premium tier applied to an operational day.
///
/// # Example
///
/// ```
/// use ac4_engine::calculation::ScaleColor;
///
/// assert_eq!(format!("{:?}", ScaleColor::Red), "Red");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleColor {
    /// Monday through Thursday.
    Blue,
    /// Friday, Saturday and Sunday.
    Red,
}

impl std::fmt::Display for ScaleColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleColor::Blue => write!(f, "Blue"),
            ScaleColor::Red => write!(f, "Red"),
        }
    }
}

/// Determines the scale color for an operational weekday.
///
/// # Example
///
/// ```
/// use ac4_engine::calculation::{get_scale_color, ScaleColor};
/// use chrono::Weekday;
///
/// assert_eq!(get_scale_color(Weekday::Fri), ScaleColor::Red);
/// assert_eq!(get_scale_color(Weekday::Thu), ScaleColor::Blue);
/// ```
pub fn get_scale_color(weekday: Weekday) -> ScaleColor {
    match weekday {
        Weekday::Fri | Weekday::Sat | Weekday::Sun => ScaleColor::Red,
        _ => ScaleColor::Blue,
    }
}
