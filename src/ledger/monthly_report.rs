//! Monthly aggregation of posted records.
//!
//! The report is a read-only view: it groups records by the calendar month
//! of their start date and never changes the ledger.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::month_name;
use crate::models::WorkRecord;

/// Totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// `YYYY-MM` key.
    pub month_key: String,
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
    /// Localized month name.
    pub month_name: String,
    /// Sum of durations.
    pub total_hours: u32,
    /// Sum of record values.
    pub total_value: Decimal,
    /// Number of records.
    pub count: usize,
    /// The month's records in ledger order.
    pub records: Vec<WorkRecord>,
}

/// Totals over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Sum of durations.
    pub total_hours: u32,
    /// Sum of record values.
    pub total_value: Decimal,
    /// Number of records.
    pub count: usize,
}

impl LedgerTotals {
    /// Sums durations and values.
    pub fn from_records(records: &[WorkRecord]) -> Self {
        records.iter().fold(Self::default(), |acc, r| Self {
            total_hours: acc.total_hours + r.duration(),
            total_value: acc.total_value + r.value(),
            count: acc.count + 1,
        })
    }
}

/// Groups records by month, newest month first.
///
/// # Example
///
/// ```
/// use ac4_engine::ledger::monthly_summaries;
///
/// assert!(monthly_summaries(&[]).is_empty());
/// ```
pub fn monthly_summaries(records: &[WorkRecord]) -> Vec<MonthSummary> {
    let mut groups: BTreeMap<(i32, u32), Vec<WorkRecord>> = BTreeMap::new();
    for record in records {
        let date = record.date();
        groups
            .entry((date.year(), date.month()))
            .or_default()
            .push(record.clone());
    }

    groups
        .into_iter()
        .rev()
        .map(|((year, month), records)| {
            let totals = LedgerTotals::from_records(&records);
            MonthSummary {
                month_key: format!("{:04}-{:02}", year, month),
                year,
                month,
                month_name: month_name(month).unwrap_or_default().to_string(),
                total_hours: totals.total_hours,
                total_value: totals.total_value,
                count: totals.count,
                records,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::create_work_record;
    use crate::config::TariffTable;
    use crate::models::DutyRequest;
    use chrono::{NaiveDate, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(date: &str, start: &str, duration: u32) -> WorkRecord {
        let request = DutyRequest {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            start_hour: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            duration,
            rai_number: None,
        };
        create_work_record(&request, &TariffTable::default()).unwrap()
    }

    #[test]
    fn test_groups_newest_month_first() {
        let records = vec![
            record("2025-12-05", "08:00", 6),
            record("2026-01-16", "22:00", 7),
            record("2026-01-15", "21:00", 2),
        ];

        let report = monthly_summaries(&records);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].month_key, "2026-01");
        assert_eq!(report[0].month_name, "Janeiro");
        assert_eq!(report[0].total_hours, 9);
        assert_eq!(report[0].total_value, dec("345.93"));
        assert_eq!(report[0].count, 2);
        assert_eq!(report[1].month_key, "2025-12");
        assert_eq!(report[1].month_name, "Dezembro");
    }

    #[test]
    fn test_overnight_duty_counts_in_start_month() {
        let records = vec![record("2026-01-31", "22:00", 6)];
        let report = monthly_summaries(&records);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].month, 1);
    }

    #[test]
    fn test_totals_match_sum_of_months() {
        let records = vec![
            record("2025-12-05", "08:00", 6),
            record("2026-01-16", "22:00", 7),
        ];
        let totals = LedgerTotals::from_records(&records);
        let by_month: Decimal = monthly_summaries(&records)
            .iter()
            .map(|m| m.total_value)
            .sum();

        assert_eq!(totals.count, 2);
        assert_eq!(totals.total_hours, 13);
        assert_eq!(totals.total_value, by_month);
    }
}
