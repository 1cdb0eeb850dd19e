//! Fixed expense service
//!
//! Manages recurring templates and reports which of them have been paid in a
//! given month. A template counts as paid when the month has an expense with
//! the same item label.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::audit::{AuditSubject, Change};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{FixedExpense, MonthFilter, NewFixedExpense, SpenderFilter, YearMonth};
use crate::storage::Storage;

use super::expense::ExpenseService;

/// Payment state of one template in a month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedExpenseStatus {
    pub fixed: FixedExpense,
    /// Payment date in the month, clamped to its last day
    pub due: NaiveDate,
    pub paid: bool,
}

/// Service for recurring expense templates
pub struct FixedExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> FixedExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Save a new template
    pub fn save(&self, mut entry: NewFixedExpense) -> LedgerResult<FixedExpense> {
        entry
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        if !self.storage.categories.exists(&entry.category)? {
            let fallback = self.storage.unclassified_category();
            tracing::warn!(
                item = %entry.item,
                category = %entry.category,
                "Unknown category, filing under {}",
                fallback
            );
            entry.category = fallback.to_string();
        }

        let id = self.storage.fixed.insert(&entry)?;
        let fixed = self
            .storage
            .fixed
            .get(id)?
            .ok_or_else(|| LedgerError::fixed_expense_not_found(id))?;

        self.storage.record(
            AuditSubject::FixedExpense(id),
            Some(&fixed.item),
            Change::created(&fixed),
        );

        Ok(fixed)
    }

    /// All templates by payment day; storage failures read as empty
    pub fn list(&self) -> Vec<FixedExpense> {
        self.storage.fixed.list().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load fixed expenses");
            Vec::new()
        })
    }

    /// Delete a template; returns whether one was removed
    pub fn delete(&self, id: i64) -> LedgerResult<bool> {
        let Some(fixed) = self.storage.fixed.get(id)? else {
            return Ok(false);
        };

        let deleted = self.storage.fixed.delete(id)?;
        if deleted {
            self.storage.record(
                AuditSubject::FixedExpense(id),
                Some(&fixed.item),
                Change::deleted(&fixed),
            );
        }
        Ok(deleted)
    }

    /// Paid/unpaid state of every template for `month`
    pub fn status(&self, month: YearMonth) -> Vec<FixedExpenseStatus> {
        let expenses = ExpenseService::new(self.storage)
            .list(MonthFilter::Month(month), SpenderFilter::All);
        let paid_items: HashSet<&str> = expenses.iter().map(|e| e.item.as_str()).collect();

        self.list()
            .into_iter()
            .map(|fixed| FixedExpenseStatus {
                due: month.day_clamped(fixed.payment_day),
                paid: paid_items.contains(fixed.item.as_str()),
                fixed,
            })
            .collect()
    }

    /// Templates not yet paid in `month`
    pub fn pending(&self, month: YearMonth) -> Vec<FixedExpense> {
        self.status(month)
            .into_iter()
            .filter(|s| !s.paid)
            .map(|s| s.fixed)
            .collect()
    }

    /// Record every unpaid template as an expense on its payment day
    ///
    /// Returns the ids of the inserted expenses. Running it twice for the
    /// same month inserts nothing the second time.
    pub fn record_pending(&self, month: YearMonth) -> LedgerResult<Vec<i64>> {
        let entries = self
            .pending(month)
            .iter()
            .map(|fixed| fixed.to_expense(month))
            .collect();

        ExpenseService::new(self.storage).add_batch(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LedgerPaths, Settings};
    use crate::models::{Money, NewExpense, Spender};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, Settings::default()).unwrap();
        (temp_dir, storage)
    }

    fn template(item: &str, day: u32) -> NewFixedExpense {
        NewFixedExpense {
            item: item.to_string(),
            amount: Money::from_units(50000),
            category: "Utilities/Housing".to_string(),
            spender: Spender::Joint,
            payment_day: day,
        }
    }

    fn feb() -> YearMonth {
        YearMonth::new(2026, 2).unwrap()
    }

    #[test]
    fn test_save_validates_payment_day() {
        let (_temp, storage) = create_test_storage();
        let service = FixedExpenseService::new(&storage);

        assert!(service.save(template("Rent", 0)).unwrap_err().is_validation());
        assert!(service.save(template("Rent", 32)).unwrap_err().is_validation());
        assert!(service.list().is_empty());
    }

    #[test]
    fn test_status_matches_item_label() {
        let (_temp, storage) = create_test_storage();
        let service = FixedExpenseService::new(&storage);
        service.save(template("Rent", 1)).unwrap();
        service.save(template("Internet", 31)).unwrap();

        ExpenseService::new(&storage)
            .add_batch(vec![NewExpense::new(
                NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
                "Rent",
                Money::from_units(50000),
                "Utilities/Housing",
            )])
            .unwrap();

        let status = service.status(feb());
        assert_eq!(status.len(), 2);
        assert!(status[0].paid);
        assert!(!status[1].paid);
        assert_eq!(status[1].due, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());

        let pending = service.pending(feb());
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].item, "Internet");
    }

    #[test]
    fn test_record_pending_is_idempotent() {
        let (_temp, storage) = create_test_storage();
        let service = FixedExpenseService::new(&storage);
        service.save(template("Rent", 1)).unwrap();
        service.save(template("Internet", 30)).unwrap();

        assert_eq!(service.record_pending(feb()).unwrap().len(), 2);
        assert!(service.record_pending(feb()).unwrap().is_empty());
        assert!(service.pending(feb()).is_empty());

        let expenses = ExpenseService::new(&storage)
            .list(MonthFilter::Month(feb()), SpenderFilter::All);
        assert_eq!(expenses[0].date, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = FixedExpenseService::new(&storage);
        let rent = service.save(template("Rent", 1)).unwrap();

        assert!(service.delete(rent.id).unwrap());
        assert!(!service.delete(rent.id).unwrap());
        assert!(service.list().is_empty());
    }
}
