//! Response types for the AC4 engine API.
//!
//! This module defines the success payloads, the error response structure
//! and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::{DayView, SaveOutcome, UpsertOutcome};
use crate::error::EngineError;
use crate::ledger::{LedgerTotals, MonthSummary};
use crate::models::{hour_minute, HourlyRate, ResolvedMarker, ShiftType, WorkRecord};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid date error for a path segment.
    pub fn invalid_date(value: &str) -> Self {
        Self::with_details(
            "VALIDATION_ERROR",
            format!("Invalid date '{}'", value),
            "Dates must be formatted as YYYY-MM-DD",
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::InvalidDuty { .. } => (StatusCode::BAD_REQUEST, "INVALID_DUTY"),
            EngineError::InvalidTime { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            EngineError::InvalidMonth { .. } => (StatusCode::BAD_REQUEST, "INVALID_MONTH"),
            EngineError::RecordNotFound { .. } => (StatusCode::NOT_FOUND, "RECORD_NOT_FOUND"),
            EngineError::EventNotFound { .. } => (StatusCode::NOT_FOUND, "EVENT_NOT_FOUND"),
            EngineError::ShiftTypeNotFound { .. } => {
                (StatusCode::NOT_FOUND, "SHIFT_TYPE_NOT_FOUND")
            }
            EngineError::ReservedShiftType { .. } => (StatusCode::CONFLICT, "RESERVED_SHIFT_TYPE"),
            EngineError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            EngineError::RateLookup { .. } => (StatusCode::BAD_GATEWAY, "RATE_LOOKUP_ERROR"),
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}

/// Response body for `POST /classify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    /// Start date of the block.
    pub date: NaiveDate,
    /// Localized weekday of the start date.
    pub weekday: String,
    /// Wall-clock start.
    #[serde(with = "hour_minute")]
    pub start_hour: NaiveTime,
    /// Wall-clock end.
    #[serde(with = "hour_minute")]
    pub end_hour: NaiveTime,
    /// Length in hours.
    pub duration: u32,
    /// Total value.
    pub total: Decimal,
    /// Total formatted as currency.
    pub formatted_total: String,
    /// Hour by hour pricing.
    pub lines: Vec<HourlyRate>,
}

/// Response body for `PUT /shift-types`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftTypeUpsertResponse {
    /// Whether the id was new.
    pub outcome: UpsertOutcome,
    /// The stored definition after normalization.
    pub shift_type: ShiftType,
}

/// Response body for calendar writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarWriteResponse {
    /// What happened to the date's event.
    pub outcome: SaveOutcome,
    /// The date's markers after the write.
    pub markers: Vec<ResolvedMarker>,
}

/// Response body for `GET /calendar/months/:year/:month`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthViewResponse {
    /// Calendar year.
    pub year: i32,
    /// Month number.
    pub month: u32,
    /// Localized month name.
    pub month_name: String,
    /// The 42 grid cells, Monday first.
    pub days: Vec<DayView>,
}

/// Response body for `GET /drafts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftsResponse {
    /// Draft records in insertion order.
    pub records: Vec<WorkRecord>,
    /// Sum of draft values.
    pub total: Decimal,
    /// Total formatted as currency.
    pub formatted_total: String,
    /// Shareable text summary.
    pub summary: String,
}

/// Response body for `POST /drafts/post`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDraftsResponse {
    /// Number of records moved.
    pub posted: usize,
}

/// Response body for `GET /reports/monthly`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReportResponse {
    /// Months, newest first.
    pub months: Vec<MonthSummary>,
    /// Totals across all posted records.
    pub totals: LedgerTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_date_error() {
        let error = ApiError::invalid_date("2026-13-01");
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("2026-13-01"));
        assert!(error.details.is_some());
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::RecordNotFound {
            id: "r1".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "RECORD_NOT_FOUND");
        assert_eq!(api_error.error.message, "Work record not found: r1");
    }

    #[test]
    fn test_reserved_shift_type_maps_to_conflict() {
        let api_error: ApiErrorResponse = EngineError::ReservedShiftType {
            id: "extra_ac4".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_duty_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidDuty {
            date: "2026-01-16".to_string(),
            message: "duration must be at least 1 hour".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_DUTY");
    }
}
