//! Export module for the household ledger
//!
//! - CSV: a filtered view of expenses (spreadsheet-compatible)
//! - Database: a consistent copy of the SQLite file

pub mod csv;
pub mod database;

pub use self::csv::{write_expenses_csv, EXPENSE_HEADER};
pub use self::database::copy_database;
