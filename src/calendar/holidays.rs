//! Holiday lookup for calendar display.
//!
//! Holidays are informational: they label calendar days but never change
//! the color or value of a duty.

use chrono::NaiveDate;

use crate::config::HolidayConfig;

/// Answers "is this date a holiday, and which one".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    config: HolidayConfig,
}

impl HolidayCalendar {
    /// Wraps a holiday configuration.
    pub fn new(config: HolidayConfig) -> Self {
        Self { config }
    }

    /// Returns the holiday name for a date.
    ///
    /// Date-specific entries take precedence over recurring `MM-DD` ones.
    ///
    /// # Example
    ///
    /// ```
    /// use ac4_engine::calendar::HolidayCalendar;
    /// use chrono::NaiveDate;
    ///
    /// let holidays = HolidayCalendar::default();
    /// let christmas = NaiveDate::from_ymd_opt(2030, 12, 25).unwrap();
    /// assert_eq!(holidays.holiday_name(christmas), Some("Natal"));
    /// ```
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        if let Some(name) = self.config.dated.get(&date) {
            return Some(name.as_str());
        }
        let key = date.format("%m-%d").to_string();
        self.config.recurring.get(&key).map(String::as_str)
    }

    /// Returns true if the date is a holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_name(date).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_recurring_holiday_matches_any_year() {
        let holidays = HolidayCalendar::default();
        assert_eq!(holidays.holiday_name(make_date("2026-04-21")), Some("Dia de Tiradentes"));
        assert_eq!(holidays.holiday_name(make_date("2031-04-21")), Some("Dia de Tiradentes"));
        assert!(!holidays.is_holiday(make_date("2026-04-22")));
    }

    #[test]
    fn test_dated_entry_wins() {
        let mut config = HolidayConfig::default();
        config
            .dated
            .insert(make_date("2026-12-25"), "Natal (ponto facultativo)".to_string());
        let holidays = HolidayCalendar::new(config);

        assert_eq!(
            holidays.holiday_name(make_date("2026-12-25")),
            Some("Natal (ponto facultativo)")
        );
        assert_eq!(holidays.holiday_name(make_date("2027-12-25")), Some("Natal"));
    }
}
