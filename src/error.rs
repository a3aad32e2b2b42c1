//! Error types for the AC4 engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur at the engine's call boundary.

use thiserror::Error;

/// The main error type for the AC4 engine.
///
/// The classifier itself never fails on valid input; these errors come from
/// configuration loading, record creation preconditions, lookups by id and
/// persistence writes.
///
/// # Example
///
/// ```
/// use ac4_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tariff.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tariff.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A duty request violated a precondition (zero or oversized duration).
    #[error("Invalid duty on {date}: {message}")]
    InvalidDuty {
        /// The start date of the rejected duty.
        date: String,
        /// A description of what made the duty invalid.
        message: String,
    },

    /// A wall-clock time string could not be parsed as `HH:MM`.
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTime {
        /// The rejected input.
        value: String,
    },

    /// No work record with the given id exists in either ledger.
    #[error("Work record not found: {id}")]
    RecordNotFound {
        /// The id that was not found.
        id: String,
    },

    /// No calendar event with the given id exists.
    #[error("Calendar event not found: {id}")]
    EventNotFound {
        /// The id that was not found.
        id: String,
    },

    /// No shift type with the given id exists in the registry.
    #[error("Shift type not found: {id}")]
    ShiftTypeNotFound {
        /// The id that was not found.
        id: String,
    },

    /// The reserved extra-duty shift type cannot be removed.
    #[error("Shift type '{id}' is reserved and cannot be removed")]
    ReservedShiftType {
        /// The reserved id.
        id: String,
    },

    /// A year/month pair does not name a calendar month.
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month number.
        month: u32,
    },

    /// A persisted collection could not be written.
    #[error("Storage error for key '{key}': {message}")]
    Storage {
        /// The storage key being written.
        key: String,
        /// A description of the failure.
        message: String,
    },

    /// The external rate lookup failed.
    #[error("Rate lookup failed: {message}")]
    RateLookup {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/tariff.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/tariff.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_duty_displays_date_and_message() {
        let error = EngineError::InvalidDuty {
            date: "2026-01-16".to_string(),
            message: "duration must be at least 1 hour".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid duty on 2026-01-16: duration must be at least 1 hour"
        );
    }

    #[test]
    fn test_invalid_time_displays_value() {
        let error = EngineError::InvalidTime {
            value: "25:00".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid time '25:00': expected HH:MM");
    }

    #[test]
    fn test_not_found_errors_display_id() {
        let record = EngineError::RecordNotFound {
            id: "r1".to_string(),
        };
        let event = EngineError::EventNotFound {
            id: "e1".to_string(),
        };
        let shift = EngineError::ShiftTypeNotFound {
            id: "s1".to_string(),
        };
        assert_eq!(record.to_string(), "Work record not found: r1");
        assert_eq!(event.to_string(), "Calendar event not found: e1");
        assert_eq!(shift.to_string(), "Shift type not found: s1");
    }

    #[test]
    fn test_storage_error_displays_key() {
        let error = EngineError::Storage {
            key: "ac4_draft_records".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Storage error for key 'ac4_draft_records': permission denied"
        );
    }

    #[test]
    fn test_reserved_shift_type_displays_id() {
        let error = EngineError::ReservedShiftType {
            id: "extra_ac4".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Shift type 'extra_ac4' is reserved and cannot be removed"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::RecordNotFound {
                id: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
