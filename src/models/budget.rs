//! Budget model
//!
//! One monthly spending ceiling per category.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A per-category monthly budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Category name (primary key)
    pub category: String,
    /// Monthly target amount
    pub amount: Money,
}

impl Budget {
    pub fn new(category: impl Into<String>, amount: Money) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }

        if self.amount.is_negative() {
            return Err(BudgetValidationError::NegativeAmount(self.amount.units()));
        }

        if !self.amount.within_limit() {
            return Err(BudgetValidationError::AmountTooLarge(self.amount.units()));
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.amount)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyCategory,
    NegativeAmount(i64),
    AmountTooLarge(i64),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Budget category cannot be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Budget amount cannot be negative ({})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Budget amount {} exceeds the limit of {}", amount, Money::MAX)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
