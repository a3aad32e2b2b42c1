//! The duty book: application state with write-through persistence.
//!
//! [`DutyBook`] owns the loaded [`AppData`] together with the store it came
//! from. Every mutating operation updates the in-memory collections and then
//! rewrites the affected blobs in full.

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{classify_hourly, create_work_record};
use crate::calendar::{
    month_grid, CalendarStore, DayView, HolidayCalendar, PaintTool, SaveOutcome, ShiftTypeRegistry,
    UpsertOutcome,
};
use crate::config::{ConfigLoader, TariffTable};
use crate::error::{EngineError, EngineResult};
use crate::ledger::{monthly_summaries, Ledger, LedgerTotals, MonthSummary};
use crate::models::{
    CalendarEvent, DutyRequest, OverrideField, ResolvedMarker, ShiftType, TariffBreakdown,
    WorkRecord, EXTRA_DUTY_SHIFT_ID,
};
use crate::storage::{AppData, KeyValueStore};

/// Application state bound to its backing store.
///
/// # Example
///
/// ```
/// use ac4_engine::book::DutyBook;
/// use ac4_engine::config::ConfigLoader;
/// use ac4_engine::models::DutyRequest;
/// use ac4_engine::storage::MemoryStore;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let mut book = DutyBook::open(MemoryStore::new(), &ConfigLoader::default());
/// let record = book
///     .add_draft(&DutyRequest {
///         date: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
///         start_hour: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///         duration: 7,
///         rai_number: None,
///     })
///     .unwrap();
///
/// assert_eq!(record.value().to_string(), "289.66");
/// assert_eq!(book.ledger().drafts().len(), 1);
/// ```
#[derive(Debug)]
pub struct DutyBook<S> {
    store: S,
    data: AppData,
    tariff: TariffTable,
    holidays: HolidayCalendar,
}

impl<S: KeyValueStore> DutyBook<S> {
    /// Loads application data from a store.
    pub fn open(store: S, config: &ConfigLoader) -> Self {
        let data = AppData::load(&store);
        Self {
            store,
            data,
            tariff: *config.tariff(),
            holidays: HolidayCalendar::new(config.holidays().clone()),
        }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The loaded application data.
    pub fn data(&self) -> &AppData {
        &self.data
    }

    /// The record ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.data.ledger
    }

    /// The calendar events.
    pub fn calendar(&self) -> &CalendarStore {
        &self.data.calendar
    }

    /// The shift type registry.
    pub fn shift_types(&self) -> &ShiftTypeRegistry {
        &self.data.shift_types
    }

    /// Prices a duty block hour by hour without recording it.
    pub fn classify(&self, date: NaiveDate, start_hour: NaiveTime, duration: u32) -> TariffBreakdown {
        classify_hourly(date, start_hour, duration, &self.tariff)
    }

    /// Inserts or replaces a shift type. A blank id gets a generated one.
    pub fn upsert_shift_type(
        &mut self,
        mut shift: ShiftType,
    ) -> EngineResult<(UpsertOutcome, ShiftType)> {
        if shift.id.trim().is_empty() {
            shift.id = Uuid::new_v4().to_string();
        }
        let id = shift.id.clone();
        let mut staged = self.data.clone();
        let outcome = staged.shift_types.upsert(shift);
        let stored = staged
            .shift_types
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::ShiftTypeNotFound { id: id.clone() })?;
        self.commit(staged, &[Collection::ShiftTypes], (outcome, stored))
    }

    /// Removes a shift type. Calendar events keep their references to it.
    ///
    /// # Errors
    ///
    /// [`EngineError::ReservedShiftType`] for the extra-duty marker and
    /// [`EngineError::ShiftTypeNotFound`] for an unknown id.
    pub fn remove_shift_type(&mut self, id: &str) -> EngineResult<()> {
        if id == EXTRA_DUTY_SHIFT_ID {
            return Err(EngineError::ReservedShiftType { id: id.to_string() });
        }
        let mut staged = self.data.clone();
        if !staged.shift_types.remove(id) {
            return Err(EngineError::ShiftTypeNotFound { id: id.to_string() });
        }
        self.commit(staged, &[Collection::ShiftTypes], ())?;
        info!(shift_type_id = %id, "Removed shift type");
        Ok(())
    }

    /// Saves a calendar event by date. An empty event deletes the date's
    /// event instead.
    pub fn save_event(&mut self, event: CalendarEvent) -> EngineResult<SaveOutcome> {
        let mut staged = self.data.clone();
        let outcome = staged.calendar.save(event);
        if outcome == SaveOutcome::Unchanged {
            return Ok(outcome);
        }
        self.commit(staged, &[Collection::Calendar], outcome)
    }

    /// Deletes a calendar event by id.
    pub fn delete_event(&mut self, id: &str) -> EngineResult<()> {
        let mut staged = self.data.clone();
        if !staged.calendar.delete(id) {
            return Err(EngineError::EventNotFound { id: id.to_string() });
        }
        self.commit(staged, &[Collection::Calendar], ())
    }

    /// Applies a paint click to a date.
    pub fn paint(&mut self, date: NaiveDate, tool: &PaintTool) -> EngineResult<SaveOutcome> {
        let mut staged = self.data.clone();
        let outcome = staged.calendar.paint(date, tool);
        debug!(%date, ?tool, ?outcome, "Painted calendar day");
        if outcome == SaveOutcome::Unchanged {
            return Ok(outcome);
        }
        self.commit(staged, &[Collection::Calendar], outcome)
    }

    /// Overrides one style field of a marker on a date.
    ///
    /// # Errors
    ///
    /// [`EngineError::EventNotFound`] if nothing is painted on the date and
    /// [`EngineError::ShiftTypeNotFound`] if the marker is not on that day.
    pub fn set_override(
        &mut self,
        date: NaiveDate,
        shift_type_id: &str,
        field: OverrideField,
        value: &str,
    ) -> EngineResult<Vec<ResolvedMarker>> {
        let Some(event) = self.data.calendar.get(date) else {
            return Err(EngineError::EventNotFound {
                id: date.to_string(),
            });
        };
        if !event.shift_type_ids.iter().any(|id| id == shift_type_id) {
            return Err(EngineError::ShiftTypeNotFound {
                id: shift_type_id.to_string(),
            });
        }
        let mut staged = self.data.clone();
        staged.calendar.set_override(date, shift_type_id, field, value);
        self.commit(staged, &[Collection::Calendar], ())?;
        Ok(self.resolve(date))
    }

    /// Resolves the markers drawn on a date.
    pub fn resolve(&self, date: NaiveDate) -> Vec<ResolvedMarker> {
        self.data.calendar.resolve(date, &self.data.shift_types)
    }

    /// Everything drawn in one calendar cell.
    pub fn day_view(&self, date: NaiveDate, in_month: bool) -> DayView {
        DayView {
            date,
            in_month,
            holiday: self.holidays.holiday_name(date).map(str::to_string),
            observation: self
                .data
                .calendar
                .get(date)
                .map(|event| event.observation.clone())
                .unwrap_or_default(),
            markers: self.resolve(date),
        }
    }

    /// The 42 cells of a month grid.
    pub fn month_view(&self, year: i32, month: u32) -> EngineResult<Vec<DayView>> {
        let grid = month_grid(year, month).ok_or(EngineError::InvalidMonth { year, month })?;
        Ok(grid
            .into_iter()
            .map(|cell| self.day_view(cell.date, cell.in_month))
            .collect())
    }

    /// Prices a duty request, appends it to the drafts and marks the date
    /// with the extra-duty marker.
    pub fn add_draft(&mut self, request: &DutyRequest) -> EngineResult<WorkRecord> {
        let record = create_work_record(request, &self.tariff)?;
        let mut staged = self.data.clone();
        staged.ledger.add_draft(record.clone());
        staged.calendar.mark_extra_duty(record.date());
        let record = self.commit(
            staged,
            &[Collection::Ledger, Collection::Calendar],
            record,
        )?;
        info!(
            record_id = %record.id(),
            date = %record.date(),
            value = %record.value(),
            "Added draft duty"
        );
        Ok(record)
    }

    /// Removes a draft record.
    pub fn remove_draft(&mut self, id: &str) -> EngineResult<WorkRecord> {
        let mut staged = self.data.clone();
        let record = staged
            .ledger
            .remove_draft(id)
            .ok_or_else(|| EngineError::RecordNotFound { id: id.to_string() })?;
        self.commit(staged, &[Collection::Ledger], record)
    }

    /// Removes a posted record.
    pub fn remove_posted(&mut self, id: &str) -> EngineResult<WorkRecord> {
        let mut staged = self.data.clone();
        let record = staged
            .ledger
            .remove_posted(id)
            .ok_or_else(|| EngineError::RecordNotFound { id: id.to_string() })?;
        self.commit(staged, &[Collection::Ledger], record)
    }

    /// Moves all drafts into the posted ledger.
    pub fn post_all_drafts(&mut self) -> EngineResult<usize> {
        let mut staged = self.data.clone();
        let count = staged.ledger.post_all_drafts();
        self.commit(staged, &[Collection::Ledger], count)
    }

    /// Updates the reference number of a draft or posted record.
    pub fn update_rai_number(&mut self, id: &str, text: &str) -> EngineResult<WorkRecord> {
        let mut staged = self.data.clone();
        let record = staged.ledger.update_rai_number(id, text)?.clone();
        self.commit(staged, &[Collection::Ledger], record)
    }

    /// Posted records grouped by month, newest first.
    pub fn monthly_report(&self) -> Vec<MonthSummary> {
        monthly_summaries(self.data.ledger.posted())
    }

    /// Totals over all posted records.
    pub fn totals(&self) -> LedgerTotals {
        LedgerTotals::from_records(self.data.ledger.posted())
    }

    /// Writes the touched collections of `staged` and swaps it in.
    ///
    /// On a failed write the in-memory data is left as it was, and every
    /// collection touched so far is rewritten from it.
    fn commit<T>(&mut self, staged: AppData, touched: &[Collection], value: T) -> EngineResult<T> {
        for (written, collection) in touched.iter().enumerate() {
            if let Err(error) = collection.write(&staged, &mut self.store) {
                for earlier in &touched[..=written] {
                    if let Err(restore_error) = earlier.write(&self.data, &mut self.store) {
                        warn!(
                            collection = ?earlier,
                            error = %restore_error,
                            "Failed to restore stored collection"
                        );
                    }
                }
                return Err(error);
            }
        }
        self.data = staged;
        Ok(value)
    }
}

/// A separately persisted part of [`AppData`].
#[derive(Debug, Clone, Copy)]
enum Collection {
    Ledger,
    Calendar,
    ShiftTypes,
}

impl Collection {
    fn write<S: KeyValueStore + ?Sized>(self, data: &AppData, store: &mut S) -> EngineResult<()> {
        match self {
            Collection::Ledger => data.save_ledger(store),
            Collection::Calendar => data.save_calendar(store),
            Collection::ShiftTypes => data.save_shift_types(store),
        }
    }
}
