//! Storage layer for the household ledger
//!
//! Provides SQLite-backed repositories for expenses, fixed expenses,
//! categories and budgets, plus the audit trail written after each change.

pub mod budget;
pub mod categories;
pub mod database;
pub mod expenses;
pub mod fixed;
pub mod init;
pub mod schema;

pub use budget::BudgetRepository;
pub use categories::{CategoryRemoval, CategoryRepository};
pub use database::Database;
pub use expenses::ExpenseRepository;
pub use fixed::FixedExpenseRepository;
pub use init::{initialize_storage, SeedOutcome};

use crate::audit::{AuditEntry, AuditLogger, AuditSubject, Change};
use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    settings: Settings,
    database: Database,
    audit: AuditLogger,
    pub expenses: ExpenseRepository,
    pub fixed: FixedExpenseRepository,
    pub categories: CategoryRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Open the ledger, creating and migrating the database as needed
    pub fn open(paths: LedgerPaths, settings: Settings) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        let database = Database::new(paths.database_file());
        let outcome = initialize_storage(&database.connect()?, &settings)?;
        tracing::debug!(path = %database.path().display(), ?outcome, "Opened ledger database");

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            expenses: ExpenseRepository::new(database.clone()),
            fixed: FixedExpenseRepository::new(database.clone()),
            categories: CategoryRepository::new(database.clone()),
            budgets: BudgetRepository::new(database.clone()),
            database,
            paths,
            settings,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Name of the category that absorbs unknown and deleted categories
    pub fn unclassified_category(&self) -> &str {
        &self.settings.unclassified_category
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Append a committed change to the audit trail
    ///
    /// The database change already stands, so a failed write is only logged.
    pub fn record(&self, subject: AuditSubject, label: Option<&str>, change: Change) {
        let entry = AuditEntry::now(subject, label, change);
        if let Err(e) = self.audit.append(&entry) {
            tracing::warn!(error = %e, subject = %entry.subject, "Failed to write audit entry");
        }
    }
}
