//! Persistence of the application state.
//!
//! This module contains the [`KeyValueStore`] abstraction with file and
//! in-memory backends, and [`AppData`], which loads and saves the record
//! ledger, calendar events and shift types with their upgrade rules.

mod app_data;
mod store;

pub use app_data::AppData;
pub use store::{
    FileStore, KeyValueStore, MemoryStore, CALENDAR_EVENTS_KEY, DRAFT_RECORDS_KEY,
    MONTHLY_RECORDS_KEY, SHIFT_TYPES_KEY,
};
