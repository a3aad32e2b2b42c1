//! Draft and posted work record collections.

use std::fmt::Write;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculation::format_currency;
use crate::error::{EngineError, EngineResult};
use crate::models::WorkRecord;

/// The two work record collections: drafts awaiting posting and the posted
/// monthly history.
///
/// Records are append-only. Apart from the reference number, a record is
/// never modified after it enters the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    drafts: Vec<WorkRecord>,
    posted: Vec<WorkRecord>,
}

impl Ledger {
    /// Builds a ledger from stored collections.
    pub fn new(drafts: Vec<WorkRecord>, posted: Vec<WorkRecord>) -> Self {
        Self { drafts, posted }
    }

    /// Records awaiting posting, in insertion order.
    pub fn drafts(&self) -> &[WorkRecord] {
        &self.drafts
    }

    /// Posted records, in insertion order.
    pub fn posted(&self) -> &[WorkRecord] {
        &self.posted
    }

    /// Appends a draft record.
    pub fn add_draft(&mut self, record: WorkRecord) {
        debug!(record_id = %record.id(), "Added draft record");
        self.drafts.push(record);
    }

    /// Removes a draft by id. Returns the removed record, if any.
    pub fn remove_draft(&mut self, id: &str) -> Option<WorkRecord> {
        remove_by_id(&mut self.drafts, id)
    }

    /// Removes a posted record by id. Returns the removed record, if any.
    pub fn remove_posted(&mut self, id: &str) -> Option<WorkRecord> {
        remove_by_id(&mut self.posted, id)
    }

    /// Moves every draft into the posted collection, leaving drafts empty.
    ///
    /// Returns the number of records moved. Records are moved unchanged.
    pub fn post_all_drafts(&mut self) -> usize {
        let drafts = std::mem::take(&mut self.drafts);
        let count = drafts.len();
        self.posted.extend(drafts);
        info!(count, posted_total = self.posted.len(), "Posted draft records");
        count
    }

    /// Updates the reference number of a draft or posted record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RecordNotFound`] if neither collection holds
    /// the id.
    pub fn update_rai_number(&mut self, id: &str, text: &str) -> EngineResult<&WorkRecord> {
        let record = self
            .drafts
            .iter_mut()
            .chain(self.posted.iter_mut())
            .find(|r| r.id() == id)
            .ok_or_else(|| EngineError::RecordNotFound { id: id.to_string() })?;
        record.set_rai_number(text);
        Ok(record)
    }

    /// Sum of draft values.
    pub fn draft_total(&self) -> Decimal {
        self.drafts.iter().map(WorkRecord::value).sum()
    }

    /// Plain-text summary of the drafts, one line per record followed by the
    /// total. Suitable for pasting into a message.
    ///
    /// # Example
    ///
    /// ```
    /// use ac4_engine::ledger::Ledger;
    ///
    /// assert_eq!(Ledger::default().draft_summary(), "Total: R$ 0,00");
    /// ```
    pub fn draft_summary(&self) -> String {
        let mut out = String::new();
        for record in &self.drafts {
            let _ = write!(
                out,
                "{} ({}) {} {}h {}",
                record.date().format("%d/%m/%Y"),
                record.weekday(),
                record.start_hour().format("%H:%M"),
                record.duration(),
                format_currency(record.value()),
            );
            if let Some(rai) = record.rai_number() {
                let _ = write!(out, " RAI {}", rai);
            }
            out.push('\n');
        }
        let _ = write!(out, "Total: {}", format_currency(self.draft_total()));
        out
    }
}

fn remove_by_id(records: &mut Vec<WorkRecord>, id: &str) -> Option<WorkRecord> {
    let index = records.iter().position(|r| r.id() == id)?;
    Some(records.remove(index))
}
