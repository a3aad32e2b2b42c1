//! Shift type model.
//!
//! A [`ShiftType`] is a globally styled marker definition that a user paints
//! onto calendar days.

use serde::{Deserialize, Serialize};

/// Id of the default ordinary-shift marker.
pub const ORDINARY_SHIFT_ID: &str = "ordinario";

/// Reserved id of the marker added automatically for every priced duty.
pub const EXTRA_DUTY_SHIFT_ID: &str = "extra_ac4";

/// A named, styled marker definition.
///
/// # Example
///
/// ```
/// use ac4_engine::models::ShiftType;
///
/// let shift = ShiftType::new("noturno", "noite", "#111827", "#FFFFFF").normalized();
/// assert_eq!(shift.label, "NOITE");
/// assert_eq!(shift.name, "NOITE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftType {
    /// Unique identifier across the registry. Blank until assigned.
    #[serde(default)]
    pub id: String,
    /// Long display name.
    #[serde(default)]
    pub name: String,
    /// Short label drawn on the day cell.
    pub label: String,
    /// Background color.
    pub color: String,
    /// Label color.
    pub text_color: String,
    /// Label font size in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// Optional start time shown with the marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Optional end time shown with the marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Whether the start/end times are drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_time: Option<bool>,
}

impl ShiftType {
    /// Creates a shift type with no font size or times.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        color: impl Into<String>,
        text_color: impl Into<String>,
    ) -> Self {
        let label = label.into();
        Self {
            id: id.into(),
            name: label.clone(),
            label,
            color: color.into(),
            text_color: text_color.into(),
            font_size: None,
            start_time: None,
            end_time: None,
            show_time: None,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Upper-cases the label and name; an empty name takes the label.
    pub fn normalized(mut self) -> Self {
        self.label = self.label.trim().to_uppercase();
        self.name = self.name.trim().to_uppercase();
        if self.name.is_empty() {
            self.name = self.label.clone();
        }
        self
    }

    /// Whether this is the reserved extra-duty marker.
    pub fn is_reserved(&self) -> bool {
        self.id == EXTRA_DUTY_SHIFT_ID
    }
}

/// The built-in extra-duty marker.
pub fn extra_duty_shift_type() -> ShiftType {
    ShiftType {
        name: "EXTRA AC4".to_string(),
        ..ShiftType::new(EXTRA_DUTY_SHIFT_ID, "EXTRA", "#EF4444", "#FFFFFF").with_font_size(10)
    }
}

/// The registry contents used when nothing has been saved yet.
pub fn default_shift_types() -> Vec<ShiftType> {
    vec![
        ShiftType::new(ORDINARY_SHIFT_ID, "TURNO", "#0000FF", "#FFFFFF").with_font_size(8),
        extra_duty_shift_type(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_contain_reserved_marker() {
        let defaults = default_shift_types();
        assert_eq!(defaults.len(), 2);
        assert!(defaults.iter().any(ShiftType::is_reserved));
        assert_eq!(defaults[0].id, ORDINARY_SHIFT_ID);
    }

    #[test]
    fn test_extra_duty_marker_style() {
        let extra = extra_duty_shift_type();
        assert_eq!(extra.label, "EXTRA");
        assert_eq!(extra.name, "EXTRA AC4");
        assert_eq!(extra.color, "#EF4444");
        assert_eq!(extra.font_size, Some(10));
    }

    #[test]
    fn test_normalized_keeps_explicit_name() {
        let shift = ShiftType {
            name: "Plantão".to_string(),
            ..ShiftType::new("p", " pl ", "#000", "#fff")
        }
        .normalized();
        assert_eq!(shift.label, "PL");
        assert_eq!(shift.name, "PLANTÃO");
    }

    #[test]
    fn test_deserializes_minimal_legacy_shape() {
        let json = r##"{"id":"x","label":"X","color":"#123456","textColor":"#FFFFFF"}"##;
        let shift: ShiftType = serde_json::from_str(json).unwrap();
        assert_eq!(shift.name, "");
        assert_eq!(shift.font_size, None);
    }

    #[test]
    fn test_optional_fields_round_trip() {
        let shift = ShiftType {
            start_time: Some("07:00".to_string()),
            end_time: Some("19:00".to_string()),
            show_time: Some(true),
            ..ShiftType::new("dia", "DIA", "#059669", "#ffffff").with_font_size(3)
        };
        let json = serde_json::to_string(&shift).unwrap();
        assert!(json.contains("\"showTime\":true"));
        let back: ShiftType = serde_json::from_str(&json).unwrap();
        assert_eq!(shift, back);
    }
}
