//! CSV Export functionality
//!
//! Exports a filtered view of expenses as UTF-8 CSV.

use std::io::Write;

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Expense;

/// Column order of the expense export
pub const EXPENSE_HEADER: [&str; 7] = [
    "id",
    "date",
    "item",
    "amount",
    "category",
    "spender",
    "created_at",
];

#[derive(Serialize)]
struct ExpenseRecord<'a> {
    id: i64,
    date: String,
    item: &'a str,
    amount: i64,
    category: &'a str,
    spender: &'a str,
    created_at: &'a str,
}

impl<'a> From<&'a Expense> for ExpenseRecord<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            id: expense.id,
            date: expense.date_string(),
            item: &expense.item,
            amount: expense.amount.units(),
            category: &expense.category,
            spender: expense.spender.as_str(),
            created_at: &expense.created_at,
        }
    }
}

/// Write expenses as CSV, header first
///
/// The header is written even when there are no rows.
pub fn write_expenses_csv<W: Write>(writer: W, expenses: &[Expense]) -> LedgerResult<()> {
    let mut csv_writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(EXPENSE_HEADER)?;
    for expense in expenses {
        csv_writer.serialize(ExpenseRecord::from(expense))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(format!("Failed to flush CSV output: {}", e)))?;
    Ok(())
}
