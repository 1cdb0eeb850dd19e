//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger data for terminal display,
//! mostly as `tabled` tables.

pub mod category;
pub mod expense;
pub mod report;

pub use category::{format_budget_list, format_category_tree};
pub use expense::{format_expense_line, format_expense_table, format_fixed_status, format_fixed_table};
pub use report::{
    format_budget_report, format_category_breakdown, format_consumption_breakdown, format_delta,
    format_percentage, format_summary, format_top, format_weekly,
};
