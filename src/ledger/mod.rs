//! Work record ledger and monthly reporting.

mod monthly_report;
mod records;

pub use monthly_report::{monthly_summaries, LedgerTotals, MonthSummary};
pub use records::Ledger;
