//! Core data models for the household ledger
//!
//! This module contains the data structures of the expense domain:
//! expenses, recurring templates, categories, budgets and the month and
//! spender filters used to query them.

pub mod budget;
pub mod category;
pub mod expense;
pub mod fixed;
pub mod money;
pub mod month;

pub use budget::Budget;
pub use category::{Category, ConsumptionType};
pub use expense::{Expense, ExpenseUpdate, NewExpense, Spender, DATE_FORMAT};
pub use fixed::{FixedExpense, NewFixedExpense};
pub use money::Money;
pub use month::{MonthFilter, SpenderFilter, YearMonth};
