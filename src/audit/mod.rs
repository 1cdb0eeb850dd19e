//! Audit trail for the household ledger
//!
//! Every committed create, update and delete of an expense, fixed expense,
//! category or budget is appended to `audit.log` next to the database.
//! `ledger history` prints the tail of that file.

mod diff;
mod entry;
mod logger;

pub use entry::{AuditEntry, AuditSubject, Change};
pub use logger::AuditLogger;
