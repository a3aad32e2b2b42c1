//! HTTP request handlers for the AC4 engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::{Duration, Instant};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_end_hour, classify_hourly, date_weekday_name, format_currency, month_name,
};
use crate::calendar::{DayView, SaveOutcome};
use crate::error::EngineError;
use crate::models::{CalendarEvent, DutyRequest, ShiftType, WorkRecord};
use crate::rates::{fetch_latest_rates, RateLookupResult};

use super::request::{
    ClassifyRequest, OverrideRequest, PaintRequest, RaiNumberRequest, SaveEventRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, CalendarWriteResponse, ClassifyResponse, DraftsResponse,
    MonthViewResponse, MonthlyReportResponse, PostDraftsResponse, ShiftTypeUpsertResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/classify", post(classify_handler))
        .route(
            "/shift-types",
            get(list_shift_types_handler).put(upsert_shift_type_handler),
        )
        .route("/shift-types/:id", delete(remove_shift_type_handler))
        .route("/calendar/events", put(save_event_handler))
        .route("/calendar/events/:id", delete(delete_event_handler))
        .route("/calendar/paint", post(paint_handler))
        .route("/calendar/days/:date", get(day_handler))
        .route("/calendar/days/:date/overrides", put(override_handler))
        .route("/calendar/months/:year/:month", get(month_handler))
        .route("/drafts", get(list_drafts_handler).post(add_draft_handler))
        .route("/drafts/post", post(post_drafts_handler))
        .route("/drafts/:id", delete(remove_draft_handler))
        .route("/monthly", get(list_monthly_handler))
        .route("/monthly/:id", delete(remove_posted_handler))
        .route("/records/:id/rai", patch(update_rai_handler))
        .route("/reports/monthly", get(monthly_report_handler))
        .route("/rates/latest", get(latest_rates_handler))
        .with_state(state)
}

/// Maps a JSON body rejection to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Logs an engine error and maps it to its HTTP response.
fn engine_error(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}

fn parse_path_date(value: &str) -> Result<NaiveDate, ApiErrorResponse> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiErrorResponse::bad_request(ApiError::invalid_date(value)))
}

/// Handler for POST /classify.
///
/// Prices a duty block hour by hour without recording it.
async fn classify_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> ApiResult<ClassifyResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing classification request");

    let Json(request) = payload.map_err(|r| rejection_response(correlation_id, r))?;
    request.validate().map_err(|message| {
        warn!(correlation_id = %correlation_id, %message, "Invalid classification request");
        ApiErrorResponse::bad_request(ApiError::validation_error(message))
    })?;

    let start_time = Instant::now();
    let breakdown = classify_hourly(
        request.date,
        request.start_hour,
        request.duration,
        state.config().tariff(),
    );

    info!(
        correlation_id = %correlation_id,
        date = %request.date,
        duration = request.duration,
        total = %breakdown.total,
        duration_us = start_time.elapsed().as_micros(),
        "Classification completed successfully"
    );

    Ok(Json(ClassifyResponse {
        date: request.date,
        weekday: date_weekday_name(request.date).to_string(),
        start_hour: request.start_hour,
        end_hour: calculate_end_hour(request.start_hour, request.duration),
        duration: request.duration,
        total: breakdown.total,
        formatted_total: format_currency(breakdown.total),
        lines: breakdown.lines,
    }))
}

/// Handler for GET /shift-types.
///
/// Lists the user-managed shift types; the reserved extra-duty marker is
/// not included.
async fn list_shift_types_handler(State(state): State<AppState>) -> Json<Vec<ShiftType>> {
    let book = state.book().lock().await;
    Json(book.shift_types().user_managed().cloned().collect())
}

/// Handler for PUT /shift-types.
///
/// A missing or blank `id` creates a new shift type under a generated id.
async fn upsert_shift_type_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftType>, JsonRejection>,
) -> ApiResult<ShiftTypeUpsertResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(shift) = payload.map_err(|r| rejection_response(correlation_id, r))?;

    let (outcome, shift_type) = state
        .book()
        .lock()
        .await
        .upsert_shift_type(shift)
        .map_err(|e| engine_error(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        shift_type_id = %shift_type.id,
        ?outcome,
        "Shift type saved"
    );
    Ok(Json(ShiftTypeUpsertResponse {
        outcome,
        shift_type,
    }))
}

/// Handler for DELETE /shift-types/:id.
async fn remove_shift_type_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    state
        .book()
        .lock()
        .await
        .remove_shift_type(&id)
        .map_err(|e| engine_error(correlation_id, e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for PUT /calendar/events.
///
/// Replaces the event on the body's date. An event with no markers and no
/// note deletes the date's event instead.
async fn save_event_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveEventRequest>, JsonRejection>,
) -> ApiResult<CalendarWriteResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|r| rejection_response(correlation_id, r))?;
    let event: CalendarEvent = request.into();
    let date = event.date;

    let mut book = state.book().lock().await;
    let outcome = book
        .save_event(event)
        .map_err(|e| engine_error(correlation_id, e))?;

    info!(correlation_id = %correlation_id, %date, ?outcome, "Calendar event saved");
    Ok(Json(CalendarWriteResponse {
        outcome,
        markers: book.resolve(date),
    }))
}

/// Handler for DELETE /calendar/events/:id.
async fn delete_event_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    state
        .book()
        .lock()
        .await
        .delete_event(&id)
        .map_err(|e| engine_error(correlation_id, e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /calendar/paint.
async fn paint_handler(
    State(state): State<AppState>,
    payload: Result<Json<PaintRequest>, JsonRejection>,
) -> ApiResult<CalendarWriteResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|r| rejection_response(correlation_id, r))?;

    let mut book = state.book().lock().await;
    let outcome = book
        .paint(request.date, &request.tool)
        .map_err(|e| engine_error(correlation_id, e))?;

    Ok(Json(CalendarWriteResponse {
        outcome,
        markers: book.resolve(request.date),
    }))
}

/// Handler for GET /calendar/days/:date.
async fn day_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<DayView> {
    let date = parse_path_date(&date)?;
    let book = state.book().lock().await;
    Ok(Json(book.day_view(date, true)))
}

/// Handler for PUT /calendar/days/:date/overrides.
async fn override_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
    payload: Result<Json<OverrideRequest>, JsonRejection>,
) -> ApiResult<CalendarWriteResponse> {
    let correlation_id = Uuid::new_v4();
    let date = parse_path_date(&date)?;
    let Json(request) = payload.map_err(|r| rejection_response(correlation_id, r))?;

    let markers = state
        .book()
        .lock()
        .await
        .set_override(date, &request.shift_type_id, request.field, &request.value)
        .map_err(|e| engine_error(correlation_id, e))?;

    Ok(Json(CalendarWriteResponse {
        outcome: SaveOutcome::Stored,
        markers,
    }))
}

/// Handler for GET /calendar/months/:year/:month.
async fn month_handler(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> ApiResult<MonthViewResponse> {
    let correlation_id = Uuid::new_v4();
    let days = state
        .book()
        .lock()
        .await
        .month_view(year, month)
        .map_err(|e| engine_error(correlation_id, e))?;

    Ok(Json(MonthViewResponse {
        year,
        month,
        month_name: month_name(month).unwrap_or_default().to_string(),
        days,
    }))
}

/// Handler for GET /drafts.
async fn list_drafts_handler(State(state): State<AppState>) -> Json<DraftsResponse> {
    let book = state.book().lock().await;
    let ledger = book.ledger();
    let total = ledger.draft_total();
    Json(DraftsResponse {
        records: ledger.drafts().to_vec(),
        total,
        formatted_total: format_currency(total),
        summary: ledger.draft_summary(),
    })
}

/// Handler for POST /drafts.
///
/// Prices the duty, appends it to the drafts and marks the date on the
/// calendar.
async fn add_draft_handler(
    State(state): State<AppState>,
    payload: Result<Json<DutyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WorkRecord>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing draft request");
    let Json(request) = payload.map_err(|r| rejection_response(correlation_id, r))?;

    let record = state
        .book()
        .lock()
        .await
        .add_draft(&request)
        .map_err(|e| engine_error(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        record_id = %record.id(),
        value = %record.value(),
        "Draft created successfully"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for DELETE /drafts/:id.
async fn remove_draft_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<WorkRecord> {
    let correlation_id = Uuid::new_v4();
    let record = state
        .book()
        .lock()
        .await
        .remove_draft(&id)
        .map_err(|e| engine_error(correlation_id, e))?;
    Ok(Json(record))
}

/// Handler for POST /drafts/post.
async fn post_drafts_handler(State(state): State<AppState>) -> ApiResult<PostDraftsResponse> {
    let correlation_id = Uuid::new_v4();
    let posted = state
        .book()
        .lock()
        .await
        .post_all_drafts()
        .map_err(|e| engine_error(correlation_id, e))?;

    info!(correlation_id = %correlation_id, posted, "Drafts posted");
    Ok(Json(PostDraftsResponse { posted }))
}

/// Handler for GET /monthly.
async fn list_monthly_handler(State(state): State<AppState>) -> Json<Vec<WorkRecord>> {
    let book = state.book().lock().await;
    Json(book.ledger().posted().to_vec())
}

/// Handler for DELETE /monthly/:id.
async fn remove_posted_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<WorkRecord> {
    let correlation_id = Uuid::new_v4();
    let record = state
        .book()
        .lock()
        .await
        .remove_posted(&id)
        .map_err(|e| engine_error(correlation_id, e))?;
    Ok(Json(record))
}

/// Handler for PATCH /records/:id/rai.
async fn update_rai_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RaiNumberRequest>, JsonRejection>,
) -> ApiResult<WorkRecord> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|r| rejection_response(correlation_id, r))?;

    let record = state
        .book()
        .lock()
        .await
        .update_rai_number(&id, &request.rai_number)
        .map_err(|e| engine_error(correlation_id, e))?;
    Ok(Json(record))
}

/// Handler for GET /reports/monthly.
async fn monthly_report_handler(State(state): State<AppState>) -> Json<MonthlyReportResponse> {
    let book = state.book().lock().await;
    Json(MonthlyReportResponse {
        months: book.monthly_report(),
        totals: book.totals(),
    })
}

/// Handler for GET /rates/latest.
///
/// Advisory only. Always answers 200; a failing source yields the
/// configured defaults with `fallback` set.
async fn latest_rates_handler(State(state): State<AppState>) -> Json<RateLookupResult> {
    let lookup = state.config().lookup();
    let result = fetch_latest_rates(
        state.rate_source(),
        lookup.defaults,
        Duration::from_secs(lookup.timeout_secs),
    )
    .await;
    Json(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::rates::{RateReport, StaticRateSource};
    use crate::storage::MemoryStore;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/ac4").expect("Failed to load config");
        let rates = StaticRateSource::new(RateReport {
            text: "Praça: R$ 27,00".to_string(),
            sources: vec!["https://example.org/ac4".to_string()],
        });
        AppState::new(config, MemoryStore::new(), Arc::new(rates))
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_classify_friday_night_returns_200() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "POST",
                "/classify",
                r#"{"date": "2026-01-16", "start_hour": "22:00", "duration": 7}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let result: ClassifyResponse = body_json(response).await;
        assert_eq!(result.total, dec("289.66"));
        assert_eq!(result.formatted_total, "R$ 289,66");
        assert_eq!(result.weekday, "Sexta-feira");
        assert_eq!(result.lines.len(), 7);
    }

    #[tokio::test]
    async fn test_classify_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request("POST", "/classify", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_classify_missing_field_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "POST",
                "/classify",
                r#"{"date": "2026-01-16", "duration": 7}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_classify_zero_duration_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "POST",
                "/classify",
                r#"{"date": "2026-01-16", "start_hour": "22:00", "duration": 0}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_draft_returns_201_and_marks_calendar() {
        let state = create_test_state();

        let response = create_router(state.clone())
            .oneshot(json_request(
                "POST",
                "/drafts",
                r#"{"date": "2026-01-15", "start_hour": "21:00", "duration": 2}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let record: WorkRecord = body_json(response).await;
        assert_eq!(record.value(), dec("56.27"));

        let response = create_router(state)
            .oneshot(empty_request("GET", "/calendar/days/2026-01-15"))
            .await
            .unwrap();
        let day: DayView = body_json(response).await;
        assert_eq!(day.markers.len(), 1);
        assert_eq!(day.markers[0].label, "EXTRA");
    }

    #[tokio::test]
    async fn test_add_draft_with_oversized_duration_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "POST",
                "/drafts",
                r#"{"date": "2026-01-15", "start_hour": "21:00", "duration": 30}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "INVALID_DUTY");
    }

    #[tokio::test]
    async fn test_remove_reserved_shift_type_returns_409() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(empty_request("DELETE", "/shift-types/extra_ac4"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_list_shift_types_hides_reserved_marker() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(empty_request("GET", "/shift-types"))
            .await
            .unwrap();

        let shift_types: Vec<ShiftType> = body_json(response).await;
        assert_eq!(shift_types.len(), 1);
        assert_eq!(shift_types[0].id, "ordinario");
    }

    #[tokio::test]
    async fn test_invalid_path_date_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(empty_request("GET", "/calendar/days/16-01-2026"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert!(error.message.contains("16-01-2026"));
    }

    #[tokio::test]
    async fn test_invalid_month_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(empty_request("GET", "/calendar/months/2026/13"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "INVALID_MONTH");
    }

    #[tokio::test]
    async fn test_update_rai_for_unknown_record_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "PATCH",
                "/records/missing/rai",
                r#"{"rai_number": "123"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_latest_rates_uses_source() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(empty_request("GET", "/rates/latest"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let result: RateLookupResult = body_json(response).await;
        assert!(!result.fallback);
        assert_eq!(result.rates.praca, dec("27.00"));
        assert_eq!(result.rates.oficial, dec("35.00"));
    }
}
