//! Expense model
//!
//! An expense is one recorded transaction: date, item, amount, category and
//! the household member who spent it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Storage format for expense dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Household member an expense is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spender {
    /// Shared household spending
    #[default]
    Joint,
    Husband,
    Wife,
    Child,
}

impl Spender {
    /// All spenders in display order
    pub fn all() -> &'static [Self] {
        &[Self::Joint, Self::Husband, Self::Wife, Self::Child]
    }

    /// Stored text value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Joint => "joint",
            Self::Husband => "husband",
            Self::Wife => "wife",
            Self::Child => "child",
        }
    }
}

impl fmt::Display for Spender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Spender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "joint" => Ok(Self::Joint),
            "husband" => Ok(Self::Husband),
            "wife" => Ok(Self::Wife),
            "child" => Ok(Self::Child),
            other => Err(format!(
                "Unknown spender '{}' (expected joint, husband, wife or child)",
                other
            )),
        }
    }
}

/// A stored expense row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Surrogate row id
    pub id: i64,
    pub date: NaiveDate,
    pub item: String,
    pub amount: Money,
    pub category: String,
    pub spender: Spender,
    /// `CURRENT_TIMESTAMP` at insert time
    pub created_at: String,
}

impl Expense {
    /// Date in storage format
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Apply an update in memory
    pub fn apply(&mut self, update: &ExpenseUpdate) {
        match update {
            ExpenseUpdate::Date(date) => self.date = *date,
            ExpenseUpdate::Item(item) => self.item = item.clone(),
            ExpenseUpdate::Amount(amount) => self.amount = *amount,
            ExpenseUpdate::Category(category) => self.category = category.clone(),
            ExpenseUpdate::Spender(spender) => self.spender = *spender,
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} ({})",
            self.id, self.date, self.item, self.amount, self.category
        )
    }
}

/// A candidate expense supplied by an ingestion collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub item: String,
    pub amount: Money,
    pub category: String,
    #[serde(default)]
    pub spender: Spender,
}

impl NewExpense {
    /// Create a new candidate attributed to the joint spender
    pub fn new(
        date: NaiveDate,
        item: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            item: item.into(),
            amount,
            category: category.into(),
            spender: Spender::default(),
        }
    }

    /// Attribute the candidate to a spender
    pub fn with_spender(mut self, spender: Spender) -> Self {
        self.spender = spender;
        self
    }

    /// Validate the candidate
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount.units()));
        }

        if !self.amount.within_limit() {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount.units()));
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        Ok(())
    }
}

/// A single-field edit of a stored expense
///
/// Each variant maps to one fixed column, so no column name is ever taken
/// from user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "lowercase")]
pub enum ExpenseUpdate {
    Date(NaiveDate),
    Item(String),
    Amount(Money),
    Category(String),
    Spender(Spender),
}

impl ExpenseUpdate {
    /// Column written by this update
    pub fn column(&self) -> &'static str {
        match self {
            Self::Date(_) => "date",
            Self::Item(_) => "item",
            Self::Amount(_) => "amount",
            Self::Category(_) => "category",
            Self::Spender(_) => "spender",
        }
    }

    /// Value rendered as stored in the column
    pub fn value_string(&self) -> String {
        match self {
            Self::Date(date) => date.format(DATE_FORMAT).to_string(),
            Self::Item(item) => item.clone(),
            Self::Amount(amount) => amount.units().to_string(),
            Self::Category(category) => category.clone(),
            Self::Spender(spender) => spender.to_string(),
        }
    }

    /// Validate the new value
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        match self {
            Self::Amount(amount) if amount.is_negative() => {
                Err(ExpenseValidationError::NegativeAmount(amount.units()))
            }
            Self::Amount(amount) if !amount.within_limit() => {
                Err(ExpenseValidationError::AmountTooLarge(amount.units()))
            }
            Self::Category(category) if category.trim().is_empty() => {
                Err(ExpenseValidationError::EmptyCategory)
            }
            _ => Ok(()),
        }
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount(i64),
    AmountTooLarge(i64),
    EmptyCategory,
    InvalidPaymentDay(u32),
    EmptyItem,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount cannot be negative ({})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} exceeds the limit of {}", amount, Money::MAX)
            }
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
            Self::InvalidPaymentDay(day) => {
                write!(f, "Payment day must be between 1 and 31 (got {})", day)
            }
            Self::EmptyItem => write!(f, "Item cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_spender_parse() {
        assert_eq!("Wife".parse::<Spender>().unwrap(), Spender::Wife);
        assert_eq!(" joint ".parse::<Spender>().unwrap(), Spender::Joint);
        assert!("grandma".parse::<Spender>().is_err());
        assert_eq!(Spender::default(), Spender::Joint);
    }

    #[test]
    fn test_new_expense_defaults_to_joint() {
        let entry = NewExpense::new(date(2026, 1, 30), "Coffee", Money::from_units(5000), "Dining/Snacks");
        assert_eq!(entry.spender, Spender::Joint);
        assert!(entry.validate().is_ok());

        let entry = entry.with_spender(Spender::Child);
        assert_eq!(entry.spender, Spender::Child);
    }

    #[test]
    fn test_new_expense_validation() {
        let mut entry = NewExpense::new(date(2026, 1, 30), "Refund", Money::from_units(-100), "Other");
        assert_eq!(
            entry.validate(),
            Err(ExpenseValidationError::NegativeAmount(-100))
        );

        entry.amount = Money::from_units(100);
        entry.category = "  ".into();
        assert_eq!(entry.validate(), Err(ExpenseValidationError::EmptyCategory));
    }

    #[test]
    fn test_update_columns_are_fixed() {
        assert_eq!(ExpenseUpdate::Date(date(2026, 2, 1)).column(), "date");
        assert_eq!(ExpenseUpdate::Item("x".into()).column(), "item");
        assert_eq!(ExpenseUpdate::Amount(Money::from_units(1)).column(), "amount");
        assert_eq!(ExpenseUpdate::Category("x".into()).column(), "category");
        assert_eq!(ExpenseUpdate::Spender(Spender::Wife).column(), "spender");
    }

    #[test]
    fn test_apply_update() {
        let mut expense = Expense {
            id: 1,
            date: date(2026, 2, 3),
            item: "Lunch".into(),
            amount: Money::from_units(9000),
            category: "Dining/Snacks".into(),
            spender: Spender::Joint,
            created_at: "2026-02-03 12:00:00".into(),
        };

        expense.apply(&ExpenseUpdate::Amount(Money::from_units(7000)));
        assert_eq!(expense.amount, Money::from_units(7000));
        assert_eq!(expense.item, "Lunch");
        assert_eq!(expense.date_string(), "2026-02-03");
    }

    #[test]
    fn test_update_validation() {
        assert!(ExpenseUpdate::Amount(Money::from_units(-1)).validate().is_err());
        assert!(ExpenseUpdate::Amount(Money::zero()).validate().is_ok());
        assert_eq!(
            ExpenseUpdate::Amount(Money::from_units(i64::MAX)).validate(),
            Err(ExpenseValidationError::AmountTooLarge(i64::MAX))
        );
        assert!(ExpenseUpdate::Category("".into()).validate().is_err());
    }
}
