//! Service layer for the household ledger
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, the category policy, and audit logging.

pub mod budget;
pub mod category;
pub mod expense;
pub mod fixed;

pub use budget::BudgetService;
pub use category::CategoryService;
pub use expense::ExpenseService;
pub use fixed::{FixedExpenseService, FixedExpenseStatus};
