//! Calendar month and query filters
//!
//! Expense dates are stored as `YYYY-MM-DD` text, so a month is matched by
//! its `YYYY-MM` prefix.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::expense::Spender;

/// A calendar month (e.g., "2026-02")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a month, validating the month number
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month containing a date
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current local month
    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month
    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Day `day` of this month, clamped to the month's last day
    pub fn day_clamped(&self, day: u32) -> NaiveDate {
        let last = self.last_day();
        NaiveDate::from_ymd_opt(self.year, self.month, day.clamp(1, last.day())).unwrap_or(last)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid month '{}', expected YYYY-MM", s))?;

        if year.len() != 4 || month.len() != 2 {
            return Err(format!("Invalid month '{}', expected YYYY-MM", s));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in '{}'", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month in '{}'", s))?;

        YearMonth::new(year, month).ok_or_else(|| format!("Month out of range in '{}'", s))
    }
}

/// Month restriction for expense queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    /// Every month ("all time")
    #[default]
    All,
    /// Exact `YYYY-MM` prefix match
    Month(YearMonth),
}

impl FromStr for MonthFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            _ => s.parse().map(Self::Month),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all time"),
            Self::Month(m) => write!(f, "{}", m),
        }
    }
}

/// Spender restriction for expense queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpenderFilter {
    #[default]
    All,
    Only(Spender),
}

impl FromStr for SpenderFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            _ => s.parse().map(Self::Only),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let m: YearMonth = "2026-02".parse().unwrap();
        assert_eq!(m.year(), 2026);
        assert_eq!(m.month(), 2);
        assert_eq!(m.to_string(), "2026-02");

        assert!("2026-13".parse::<YearMonth>().is_err());
        assert!("2026-2".parse::<YearMonth>().is_err());
        assert!("February".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_month_bounds() {
        let feb = YearMonth::new(2026, 2).unwrap();
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(feb.day_clamped(31), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(feb.day_clamped(15), NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());

        let dec = YearMonth::new(2025, 12).unwrap();
        assert_eq!(dec.last_day(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_filters_parse() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!(
            "2026-01".parse::<MonthFilter>().unwrap(),
            MonthFilter::Month(YearMonth::new(2026, 1).unwrap())
        );
        assert_eq!("ALL".parse::<SpenderFilter>().unwrap(), SpenderFilter::All);
        assert_eq!(
            "wife".parse::<SpenderFilter>().unwrap(),
            SpenderFilter::Only(Spender::Wife)
        );
        assert!("neighbor".parse::<SpenderFilter>().is_err());
    }
}
