//! Payroll period model.
//!
//! A period is a calendar month. It labels results and reports but never
//! feeds the calculation itself.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A monthly payroll period, written as `"YYYY-MM"`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period: PayrollPeriod = "2024-02".parse().unwrap();
/// assert_eq!(period.start_date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(period.to_string(), "2024-02");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayrollPeriod {
    start: NaiveDate,
}

impl PayrollPeriod {
    /// Creates the period for the given year and month (1-12).
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|start| Self { start })
            .ok_or_else(|| {
                EngineError::invalid_input(
                    "period",
                    format!("{:04}-{:02} is not a valid month", year, month),
                )
            })
    }

    /// The period containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: date.with_day(1).unwrap_or(date),
        }
    }

    /// Calendar year of the period.
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// Calendar month of the period (1-12).
    pub fn month(&self) -> u32 {
        self.start.month()
    }

    /// First day of the month.
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the month.
    pub fn end_date(&self) -> NaiveDate {
        self.start
            .iter_days()
            .take_while(|day| day.month() == self.start.month())
            .last()
            .unwrap_or(self.start)
    }

    /// Returns true if `date` falls within this month.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for PayrollPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for PayrollPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || {
            EngineError::invalid_input("period", format!("expected YYYY-MM, got '{}'", s))
        };

        let (year, month) = s.split_once('-').ok_or_else(malformed)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(malformed());
        }
        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;

        Self::new(year, month)
    }
}

impl TryFrom<String> for PayrollPeriod {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayrollPeriod> for String {
    fn from(period: PayrollPeriod) -> Self {
        period.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_period() {
        let period: PayrollPeriod = "2026-10".parse().unwrap();
        assert_eq!(period.year(), 2026);
        assert_eq!(period.month(), 10);
    }

    #[test]
    fn test_end_date_handles_month_lengths() {
        assert_eq!(PayrollPeriod::new(2024, 1).unwrap().end_date(), date(2024, 1, 31));
        assert_eq!(PayrollPeriod::new(2023, 2).unwrap().end_date(), date(2023, 2, 28));
        assert_eq!(PayrollPeriod::new(2024, 4).unwrap().end_date(), date(2024, 4, 30));
        assert_eq!(PayrollPeriod::new(2024, 12).unwrap().end_date(), date(2024, 12, 31));
    }

    #[test]
    fn test_invalid_month_rejected() {
        for bad in ["2024-13", "2024-00", "2024-1", "24-01", "2024/01", "abcd-ef", ""] {
            let result: EngineResult<PayrollPeriod> = bad.parse();
            match result {
                Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "period"),
                other => panic!("Expected InvalidInput for '{}', got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_containing_and_contains_date() {
        let period = PayrollPeriod::containing(date(2025, 6, 17));
        assert_eq!(period.start_date(), date(2025, 6, 1));
        assert!(period.contains_date(date(2025, 6, 30)));
        assert!(!period.contains_date(date(2025, 7, 1)));
        assert!(!period.contains_date(date(2024, 6, 15)));
    }

    #[test]
    fn test_serde_uses_string_form() {
        let period = PayrollPeriod::new(2024, 3).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, "\"2024-03\"");

        let back: PayrollPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
    }

    #[test]
    fn test_deserialize_invalid_period_fails() {
        let result: Result<PayrollPeriod, _> = serde_json::from_str("\"2024-13\"");
        assert!(result.is_err());
    }
}
