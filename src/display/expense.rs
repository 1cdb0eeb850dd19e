//! Expense display formatting
//!
//! Renders expense lists and fixed expense templates as terminal tables.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Expense, FixedExpense};
use crate::services::FixedExpenseStatus;

use super::report::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spender")]
    spender: String,
}

/// Format expenses as a table, in the order given
pub fn format_expense_table(expenses: &[Expense], suffix: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id,
        date: e.date_string(),
        item: truncate(&e.item, 30),
        amount: e.amount.format_with_suffix(suffix),
        category: e.category.clone(),
        spender: e.spender.to_string(),
    });

    format!("{}\n", Table::new(rows).with(Style::rounded()))
}

/// Format one expense for confirmation messages
pub fn format_expense_line(expense: &Expense, suffix: &str) -> String {
    format!(
        "#{} {} {} {} [{}, {}]",
        expense.id,
        expense.date_string(),
        expense.item,
        expense.amount.format_with_suffix(suffix),
        expense.category,
        expense.spender
    )
}

#[derive(Tabled)]
struct FixedRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Day")]
    payment_day: u32,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spender")]
    spender: String,
}

/// Format recurring templates as a table
pub fn format_fixed_table(fixed: &[FixedExpense], suffix: &str) -> String {
    if fixed.is_empty() {
        return "No fixed expenses.\n".to_string();
    }

    let rows = fixed.iter().map(|f| FixedRow {
        id: f.id,
        payment_day: f.payment_day,
        item: f.item.clone(),
        amount: f.amount.format_with_suffix(suffix),
        category: f.category.clone(),
        spender: f.spender.to_string(),
    });

    format!("{}\n", Table::new(rows).with(Style::rounded()))
}

#[derive(Tabled)]
struct FixedStatusRow {
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Format the paid/unpaid state of templates for a month
pub fn format_fixed_status(status: &[FixedExpenseStatus], suffix: &str) -> String {
    if status.is_empty() {
        return "No fixed expenses.\n".to_string();
    }

    let rows = status.iter().map(|s| FixedStatusRow {
        due: s.due.format("%m-%d").to_string(),
        item: s.fixed.item.clone(),
        amount: s.fixed.amount.format_with_suffix(suffix),
        status: if s.paid { "paid" } else { "unpaid" },
    });

    let unpaid = status.iter().filter(|s| !s.paid).count();
    format!(
        "{}\n{} of {} unpaid\n",
        Table::new(rows).with(Style::rounded()),
        unpaid,
        status.len()
    )
}
