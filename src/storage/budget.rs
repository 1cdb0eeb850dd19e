//! Budget repository for SQLite storage
//!
//! One row per category; saving a budget for a category that already has
//! one replaces the amount.

use rusqlite::{params, OptionalExtension, Row};

use crate::error::LedgerResult;
use crate::models::{Budget, Money};

use super::database::Database;

fn from_row(row: &Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        category: row.get(0)?,
        amount: Money::from_units(row.get(1)?),
    })
}

/// Repository for budget persistence
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: Database,
}

impl BudgetRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert or replace the budget for a category
    pub fn upsert(&self, budget: &Budget) -> LedgerResult<()> {
        let conn = self.db.connect()?;
        conn.execute(
            "INSERT INTO budgets (category, amount) VALUES (?1, ?2)
             ON CONFLICT(category) DO UPDATE SET amount = excluded.amount",
            params![budget.category, budget.amount.units()],
        )?;
        Ok(())
    }

    pub fn get(&self, category: &str) -> LedgerResult<Option<Budget>> {
        let conn = self.db.connect()?;
        let budget = conn
            .query_row(
                "SELECT category, amount FROM budgets WHERE category = ?1",
                [category],
                from_row,
            )
            .optional()?;
        Ok(budget)
    }

    /// All budgets ordered by category name
    pub fn list(&self) -> LedgerResult<Vec<Budget>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare("SELECT category, amount FROM budgets ORDER BY category")?;
        let budgets = stmt
            .query_map([], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(budgets)
    }

    /// Remove the budget for a category; returns whether one existed
    pub fn delete(&self, category: &str) -> LedgerResult<bool> {
        let conn = self.db.connect()?;
        let deleted = conn.execute("DELETE FROM budgets WHERE category = ?1", [category])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::initialize_schema;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(temp_dir.path().join("ledger.db"));
        initialize_schema(&db.connect().unwrap()).unwrap();
        (temp_dir, BudgetRepository::new(db))
    }

    #[test]
    fn test_upsert_replaces_amount() {
        let (_temp, repo) = create_test_repo();
        repo.upsert(&Budget::new("Dining/Snacks", Money::from_units(300000)))
            .unwrap();
        repo.upsert(&Budget::new("Dining/Snacks", Money::from_units(250000)))
            .unwrap();

        let budgets = repo.list().unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].amount, Money::from_units(250000));
    }

    #[test]
    fn test_identical_upsert_keeps_one_row() {
        let (_temp, repo) = create_test_repo();
        let budget = Budget::new("Dining/Snacks", Money::from_units(300000));
        repo.upsert(&budget).unwrap();
        repo.upsert(&budget).unwrap();

        assert_eq!(repo.list().unwrap(), vec![budget.clone()]);
        assert_eq!(repo.get("Dining/Snacks").unwrap(), Some(budget));
    }

    #[test]
    fn test_list_sorted_and_delete() {
        let (_temp, repo) = create_test_repo();
        repo.upsert(&Budget::new("Shopping", Money::from_units(100000)))
            .unwrap();
        repo.upsert(&Budget::new("Living", Money::from_units(400000)))
            .unwrap();

        let names: Vec<_> = repo.list().unwrap().into_iter().map(|b| b.category).collect();
        assert_eq!(names, vec!["Living", "Shopping"]);

        assert!(repo.delete("Living").unwrap());
        assert!(!repo.delete("Living").unwrap());
        assert!(repo.get("Living").unwrap().is_none());
        assert!(repo.get("Shopping").unwrap().is_some());
    }
}
