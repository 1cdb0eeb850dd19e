//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod expense;
pub mod export;
pub mod fixed;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use fixed::{handle_fixed_command, FixedCommands};
pub use report::{handle_report_command, ReportCommands};

use crate::models::{Money, MonthFilter, YearMonth};

/// Parse an amount argument such as "12000", "12,000" or "12,000원"
pub fn parse_amount(s: &str) -> Result<Money, String> {
    let amount = Money::parse(s).map_err(|e| e.to_string())?;
    if amount.is_negative() {
        return Err(format!("Amount cannot be negative: {}", s));
    }
    Ok(amount)
}

/// The month argument, or the current month
pub fn month_or_current(month: Option<YearMonth>) -> YearMonth {
    month.unwrap_or_else(YearMonth::current)
}

/// The month filter argument, or the current month
pub fn filter_or_current(filter: Option<MonthFilter>) -> MonthFilter {
    filter.unwrap_or_else(|| MonthFilter::Month(YearMonth::current()))
}
