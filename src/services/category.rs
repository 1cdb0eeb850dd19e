//! Category service
//!
//! Adds and removes categories. Removing one moves its expenses, fixed
//! expenses and budget to the unclassified category, which itself can never
//! be removed.

use std::collections::HashMap;

use crate::audit::{AuditSubject, Change};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, ConsumptionType};
use crate::storage::{CategoryRemoval, Storage};

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All categories; storage failures read as empty
    pub fn list(&self) -> Vec<Category> {
        self.storage.categories.list().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load categories");
            Vec::new()
        })
    }

    pub fn names(&self) -> Vec<String> {
        self.list().into_iter().map(|c| c.name).collect()
    }

    /// Name to consumption type mapping
    pub fn types(&self) -> HashMap<String, ConsumptionType> {
        self.list()
            .into_iter()
            .map(|c| (c.name, c.consumption_type))
            .collect()
    }

    /// Add a user-defined category
    pub fn add(&self, name: &str, consumption_type: ConsumptionType) -> LedgerResult<Category> {
        let category = Category::new(name.trim(), consumption_type);
        category
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.categories.insert(&category)?;
        self.storage.record(
            AuditSubject::Category(category.name.clone()),
            None,
            Change::created(&category),
        );

        Ok(category)
    }

    /// Delete a category, moving everything that referenced it
    pub fn delete(&self, name: &str) -> LedgerResult<CategoryRemoval> {
        let fallback = self.storage.unclassified_category();
        if name == fallback {
            return Err(LedgerError::Validation(format!(
                "Category '{}' cannot be deleted",
                fallback
            )));
        }

        let category = self
            .storage
            .categories
            .get(name)?
            .ok_or_else(|| LedgerError::category_not_found(name))?;

        let removal = self
            .storage
            .categories
            .delete_and_reassign(name, fallback)?
            .ok_or_else(|| LedgerError::category_not_found(name))?;

        tracing::info!(
            category = name,
            expenses = removal.expenses,
            fixed_expenses = removal.fixed_expenses,
            budget_moved = removal.budget_moved,
            "Deleted category"
        );
        self.storage.record(
            AuditSubject::Category(name.to_string()),
            None,
            Change::deleted(&category),
        );

        Ok(removal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LedgerPaths, Settings};
    use crate::models::{Money, MonthFilter, NewExpense, SpenderFilter};
    use crate::services::{BudgetService, ExpenseService};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, Settings::default()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_requires_unique_name() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.add("Pets", ConsumptionType::Discretionary).unwrap();
        assert!(service
            .add("Pets", ConsumptionType::Essential)
            .unwrap_err()
            .is_duplicate());
        assert!(service
            .add("  ", ConsumptionType::Essential)
            .unwrap_err()
            .is_validation());

        assert_eq!(service.types().get("Pets"), Some(&ConsumptionType::Discretionary));
    }

    #[test]
    fn test_delete_moves_expenses_to_unclassified() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let expenses = ExpenseService::new(&storage);
        service.add("Pets", ConsumptionType::Discretionary).unwrap();

        let entry = NewExpense::new(
            NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
            "Pet food",
            Money::from_units(20000),
            "Pets",
        );
        expenses
            .add_batch(vec![entry.clone(), entry.clone(), entry])
            .unwrap();

        let removal = service.delete("Pets").unwrap();
        assert_eq!(removal.expenses, 3);

        let rows = expenses.list(MonthFilter::All, SpenderFilter::All);
        assert_eq!(rows.iter().filter(|e| e.category == "unclassified").count(), 3);
        assert!(rows.iter().all(|e| e.category != "Pets"));
        assert!(!service.names().contains(&"Pets".to_string()));
    }

    #[test]
    fn test_delete_moves_budget() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let budgets = BudgetService::new(&storage);
        service.add("Pets", ConsumptionType::Discretionary).unwrap();
        budgets.set("Pets", Money::from_units(50000)).unwrap();
        budgets.set("unclassified", Money::from_units(10000)).unwrap();

        service.delete("Pets").unwrap();

        let list = budgets.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].category, "unclassified");
        assert_eq!(list[0].amount, Money::from_units(60000));
    }

    #[test]
    fn test_unclassified_cannot_be_deleted() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        assert!(service.delete("unclassified").unwrap_err().is_validation());
        assert!(service.names().contains(&"unclassified".to_string()));
    }

    #[test]
    fn test_delete_missing_category() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        assert!(service.delete("Astrology").unwrap_err().is_not_found());
    }
}
