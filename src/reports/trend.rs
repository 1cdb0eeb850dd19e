//! Trend Report
//!
//! Month totals, month-over-month change, weekly buckets and daily totals.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{Expense, Money, YearMonth};

/// Change of one month's total against the previous month with data
#[derive(Debug, Clone, PartialEq)]
pub enum MonthDelta {
    /// No earlier month has any expenses
    NoPriorData,
    Change {
        previous_month: YearMonth,
        previous: Money,
        current: Money,
        difference: Money,
        /// `None` when the previous total is zero
        percent: Option<f64>,
    },
}

impl fmt::Display for MonthDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthDelta::NoPriorData => write!(f, "no prior data"),
            MonthDelta::Change {
                percent: Some(p), ..
            } => write!(f, "{:+.0}%", p),
            MonthDelta::Change { difference, .. } => {
                if difference.is_negative() {
                    write!(f, "-{}", difference.abs())
                } else {
                    write!(f, "+{}", difference)
                }
            }
        }
    }
}

/// Expense count and sum for one Monday-starting week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    pub week_start: NaiveDate,
    pub count: usize,
    pub total: Money,
}

/// Total per month, ascending
pub fn month_totals(expenses: &[Expense]) -> BTreeMap<YearMonth, Money> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(YearMonth::of(expense.date)).or_insert_with(Money::zero) += expense.amount;
    }
    totals
}

/// Compare `month` with the closest earlier month that has expenses
pub fn month_delta(totals: &BTreeMap<YearMonth, Money>, month: YearMonth) -> MonthDelta {
    let current = totals.get(&month).copied().unwrap_or_default();

    let Some((&previous_month, &previous)) = totals.range(..month).next_back() else {
        return MonthDelta::NoPriorData;
    };

    let difference = current - previous;
    let percent = if previous.is_zero() {
        None
    } else {
        Some(difference.units() as f64 / previous.units() as f64 * 100.0)
    };

    MonthDelta::Change {
        previous_month,
        previous,
        current,
        difference,
        percent,
    }
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Expenses grouped into Monday-starting weeks, ascending
pub fn weekly_buckets(expenses: &[Expense]) -> Vec<WeekBucket> {
    let mut weeks: BTreeMap<NaiveDate, (usize, Money)> = BTreeMap::new();
    for expense in expenses {
        let entry = weeks
            .entry(week_start(expense.date))
            .or_insert((0, Money::zero()));
        entry.0 += 1;
        entry.1 += expense.amount;
    }

    weeks
        .into_iter()
        .map(|(week_start, (count, total))| WeekBucket {
            week_start,
            count,
            total,
        })
        .collect()
}

/// Sum per calendar day, ascending
pub fn daily_totals(expenses: &[Expense]) -> BTreeMap<NaiveDate, Money> {
    let mut days = BTreeMap::new();
    for expense in expenses {
        *days.entry(expense.date).or_insert_with(Money::zero) += expense.amount;
    }
    days
}
