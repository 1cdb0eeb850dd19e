//! Fixed (recurring) expense templates
//!
//! A template recurs on the same day every month. It never counts as
//! spending by itself; it is turned into an [`super::NewExpense`] for a
//! given month.

use serde::{Deserialize, Serialize};

use super::expense::{ExpenseValidationError, NewExpense, Spender};
use super::money::Money;
use super::month::YearMonth;

/// A stored recurring expense template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: i64,
    pub item: String,
    pub amount: Money,
    pub category: String,
    pub spender: Spender,
    /// Day of month the payment recurs on (1-31)
    pub payment_day: u32,
}

impl FixedExpense {
    /// Expense this template produces for `month`
    ///
    /// A payment day past the end of a short month falls on its last day.
    pub fn to_expense(&self, month: YearMonth) -> NewExpense {
        NewExpense::new(
            month.day_clamped(self.payment_day),
            self.item.clone(),
            self.amount,
            self.category.clone(),
        )
        .with_spender(self.spender)
    }
}

/// A template to be saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFixedExpense {
    pub item: String,
    pub amount: Money,
    pub category: String,
    #[serde(default)]
    pub spender: Spender,
    pub payment_day: u32,
}

impl NewFixedExpense {
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.item.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyItem);
        }

        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount.units()));
        }

        if !self.amount.within_limit() {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount.units()));
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        if !(1..=31).contains(&self.payment_day) {
            return Err(ExpenseValidationError::InvalidPaymentDay(self.payment_day));
        }

        Ok(())
    }
}
