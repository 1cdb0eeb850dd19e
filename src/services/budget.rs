//! Budget service
//!
//! Sets per-category monthly budgets and reports progress against them.

use crate::audit::{AuditSubject, Change};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, Money, MonthFilter, SpenderFilter, YearMonth};
use crate::reports::BudgetReport;
use crate::storage::Storage;

use super::expense::ExpenseService;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the budget for a category, replacing any previous amount
    pub fn set(&self, category: &str, amount: Money) -> LedgerResult<Budget> {
        let budget = Budget::new(category.trim(), amount);
        budget
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        if !self.storage.categories.exists(&budget.category)? {
            return Err(LedgerError::category_not_found(budget.category.as_str()));
        }

        let before = self.storage.budgets.get(&budget.category)?;
        self.storage.budgets.upsert(&budget)?;

        let change = match before {
            Some(before) => Change::updated(&before, &budget),
            None => Change::created(&budget),
        };
        self.storage
            .record(AuditSubject::Budget(budget.category.clone()), None, change);

        Ok(budget)
    }

    /// All budgets by category; storage failures read as empty
    pub fn list(&self) -> Vec<Budget> {
        self.storage.budgets.list().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load budgets");
            Vec::new()
        })
    }

    /// Remove a category's budget
    pub fn delete(&self, category: &str) -> LedgerResult<Budget> {
        let budget = self
            .storage
            .budgets
            .get(category)?
            .ok_or_else(|| LedgerError::budget_not_found(category))?;

        self.storage.budgets.delete(category)?;
        self.storage.record(
            AuditSubject::Budget(category.to_string()),
            None,
            Change::deleted(&budget),
        );

        Ok(budget)
    }

    /// Spending against each budget for `month`
    pub fn progress(&self, month: YearMonth) -> BudgetReport {
        let expenses = ExpenseService::new(self.storage)
            .list(MonthFilter::Month(month), SpenderFilter::All);
        BudgetReport::generate(month, &self.list(), &expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LedgerPaths, Settings};
    use crate::models::NewExpense;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, Settings::default()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_set_twice_keeps_last_amount() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service.set("Shopping", Money::from_units(200000)).unwrap();
        service.set("Shopping", Money::from_units(150000)).unwrap();

        let budgets = service.list();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].amount, Money::from_units(150000));
    }

    #[test]
    fn test_set_requires_existing_category() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let err = service.set("Astrology", Money::from_units(1000)).unwrap_err();
        assert!(err.is_not_found());

        let err = service.set("Shopping", Money::from_units(-1)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set("Living", Money::from_units(400000)).unwrap();

        let removed = service.delete("Living").unwrap();
        assert_eq!(removed.amount, Money::from_units(400000));
        assert!(service.delete("Living").unwrap_err().is_not_found());
    }

    #[test]
    fn test_progress_uses_month_expenses() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set("Living", Money::from_units(100000)).unwrap();

        ExpenseService::new(&storage)
            .add_batch(vec![
                NewExpense::new(
                    NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
                    "Groceries",
                    Money::from_units(40000),
                    "Living",
                ),
                NewExpense::new(
                    NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
                    "Groceries",
                    Money::from_units(70000),
                    "Living",
                ),
            ])
            .unwrap();

        let report = service.progress(YearMonth::new(2026, 2).unwrap());
        assert_eq!(report.rows[0].spent, Money::from_units(40000));
        assert_eq!(report.rows[0].remaining, Money::from_units(60000));
        assert!((report.rows[0].percent_used - 40.0).abs() < 1e-9);
    }
}
