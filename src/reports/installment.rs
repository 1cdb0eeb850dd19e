//! Installment expansion
//!
//! Splits one purchase over consecutive months. Each installment gets the
//! integer share of the amount; the remainder of the division is dropped.

use chrono::Months;

use crate::error::{LedgerError, LedgerResult};
use crate::models::NewExpense;

/// Expand `entry` into `count` monthly installments
///
/// Installment `k` is dated `k - 1` months after the entry, with its day
/// clamped to the end of shorter months, and labelled `"item (k/count)"`.
/// A count of one returns the entry unchanged.
pub fn expand_installments(entry: &NewExpense, count: u32) -> LedgerResult<Vec<NewExpense>> {
    if count == 0 {
        return Err(LedgerError::Validation(
            "Installment count must be at least 1".into(),
        ));
    }

    if count == 1 {
        return Ok(vec![entry.clone()]);
    }

    let share = entry.amount.split(count as i64);

    (0..count)
        .map(|k| {
            let date = entry.date.checked_add_months(Months::new(k)).ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Installment {} of {} falls outside the calendar",
                    k + 1,
                    count
                ))
            })?;

            Ok(NewExpense {
                date,
                item: format!("{} ({}/{})", entry.item, k + 1, count),
                amount: share,
                ..entry.clone()
            })
        })
        .collect()
}
