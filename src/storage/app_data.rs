//! Loading and saving the three top-level collections.
//!
//! Stored blobs that are missing or malformed never fail a load: the
//! affected collection falls back to empty (or, for shift types, to the
//! built-in defaults) and a warning is logged.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::calendar::{CalendarStore, ShiftTypeRegistry};
use crate::error::{EngineError, EngineResult};
use crate::ledger::Ledger;
use crate::models::{CalendarEvent, ShiftType, WorkRecord};

use super::store::{
    KeyValueStore, CALENDAR_EVENTS_KEY, DRAFT_RECORDS_KEY, MONTHLY_RECORDS_KEY, SHIFT_TYPES_KEY,
};

/// The application's persisted state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppData {
    /// Draft and posted work records.
    pub ledger: Ledger,
    /// Calendar events by date.
    pub calendar: CalendarStore,
    /// Shift type definitions.
    pub shift_types: ShiftTypeRegistry,
}

impl AppData {
    /// Loads every collection from a store.
    ///
    /// Legacy single-marker calendar events are upgraded, and the reserved
    /// extra-duty shift type is injected into stored definitions that lack
    /// it.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let posted: Vec<WorkRecord> = read_blob(store, MONTHLY_RECORDS_KEY).unwrap_or_default();
        let drafts: Vec<WorkRecord> = read_blob(store, DRAFT_RECORDS_KEY).unwrap_or_default();
        let events: Vec<CalendarEvent> = read_blob(store, CALENDAR_EVENTS_KEY).unwrap_or_default();
        let shift_types = match read_blob::<S, Vec<ShiftType>>(store, SHIFT_TYPES_KEY) {
            Some(stored) => ShiftTypeRegistry::from_stored(stored),
            None => ShiftTypeRegistry::default(),
        };

        let data = Self {
            ledger: Ledger::new(drafts, posted),
            calendar: CalendarStore::from_events(events),
            shift_types,
        };
        info!(
            drafts = data.ledger.drafts().len(),
            posted = data.ledger.posted().len(),
            events = data.calendar.len(),
            shift_types = data.shift_types.len(),
            "Loaded application data"
        );
        data
    }

    /// Writes both record collections.
    pub fn save_ledger<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> EngineResult<()> {
        write_blob(store, DRAFT_RECORDS_KEY, self.ledger.drafts())?;
        write_blob(store, MONTHLY_RECORDS_KEY, self.ledger.posted())
    }

    /// Writes the calendar events.
    pub fn save_calendar<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> EngineResult<()> {
        write_blob(store, CALENDAR_EVENTS_KEY, &self.calendar.to_vec())
    }

    /// Writes the shift type definitions.
    pub fn save_shift_types<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> EngineResult<()> {
        write_blob(store, SHIFT_TYPES_KEY, self.shift_types.list())
    }

    /// Writes every collection.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> EngineResult<()> {
        self.save_ledger(store)?;
        self.save_calendar(store)?;
        self.save_shift_types(store)
    }
}

fn read_blob<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.read(key) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored data, using defaults");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Malformed stored data, using defaults");
            None
        }
    }
}

fn write_blob<S, T>(store: &mut S, key: &str, value: &T) -> EngineResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|e| EngineError::Storage {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.write(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::create_work_record;
    use crate::config::TariffTable;
    use crate::models::{DutyRequest, EXTRA_DUTY_SHIFT_ID, ORDINARY_SHIFT_ID};
    use crate::storage::MemoryStore;
    use chrono::{NaiveDate, NaiveTime};

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_store_loads_defaults() {
        let data = AppData::load(&MemoryStore::new());
        assert!(data.ledger.drafts().is_empty());
        assert!(data.ledger.posted().is_empty());
        assert!(data.calendar.is_empty());
        assert_eq!(data.shift_types, ShiftTypeRegistry::default());
    }

    #[test]
    fn test_malformed_blobs_fall_back_silently() {
        let store = MemoryStore::with_blobs([
            (MONTHLY_RECORDS_KEY, "{not json"),
            (DRAFT_RECORDS_KEY, "42"),
            (CALENDAR_EVENTS_KEY, "[{\"broken\": true}]"),
            (SHIFT_TYPES_KEY, "null"),
        ]);
        let data = AppData::load(&store);
        assert!(data.ledger.posted().is_empty());
        assert!(data.ledger.drafts().is_empty());
        assert!(data.calendar.is_empty());
        assert_eq!(data.shift_types, ShiftTypeRegistry::default());
    }

    #[test]
    fn test_legacy_event_and_missing_reserved_marker_are_upgraded() {
        let store = MemoryStore::with_blobs([
            (
                CALENDAR_EVENTS_KEY,
                r#"[{"id":"e1","date":"2026-01-16","shiftTypeId":"ordinario","observation":""}]"#,
            ),
            (
                SHIFT_TYPES_KEY,
                r##"[{"id":"ordinario","name":"TURNO","label":"TURNO","color":"#0000FF","textColor":"#FFFFFF"}]"##,
            ),
        ]);
        let data = AppData::load(&store);

        let event = data.calendar.get(make_date("2026-01-16")).unwrap();
        assert_eq!(event.shift_type_ids, vec![ORDINARY_SHIFT_ID.to_string()]);
        assert!(data.shift_types.contains(EXTRA_DUTY_SHIFT_ID));
        assert_eq!(data.shift_types.len(), 2);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut data = AppData::default();
        let request = DutyRequest {
            date: make_date("2026-01-16"),
            start_hour: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            duration: 7,
            rai_number: Some("12".to_string()),
        };
        data.ledger
            .add_draft(create_work_record(&request, &TariffTable::default()).unwrap());
        data.calendar.mark_extra_duty(request.date);

        let mut store = MemoryStore::new();
        data.save(&mut store).unwrap();

        assert_eq!(AppData::load(&store), data);
    }
}
