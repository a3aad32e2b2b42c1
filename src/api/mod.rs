//! HTTP API module for the AC4 engine.
//!
//! This module provides the REST endpoints for classification, the shift
//! marker calendar, the draft and posted ledgers, reports and the advisory
//! rate lookup.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ClassifyRequest, OverrideRequest, PaintRequest, RaiNumberRequest, SaveEventRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, CalendarWriteResponse, ClassifyResponse, DraftsResponse,
    MonthViewResponse, MonthlyReportResponse, PostDraftsResponse, ShiftTypeUpsertResponse,
};
pub use state::{AppState, SharedStore};
