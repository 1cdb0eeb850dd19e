//! Category repository for SQLite storage
//!
//! Category names are the primary key. Expenses, fixed expenses and budgets
//! refer to categories by name, so deleting one moves every reference to the
//! unclassified category inside a single transaction.

use std::collections::HashMap;

use rusqlite::{params, ErrorCode, OptionalExtension, Row};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, ConsumptionType};

use super::database::Database;

fn from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    let consumption_type: Option<String> = row.get(2)?;
    Ok(Category {
        name: row.get(0)?,
        is_default: row.get::<_, Option<i64>>(1)?.unwrap_or(0) != 0,
        consumption_type: ConsumptionType::from_stored(consumption_type.as_deref()),
    })
}

/// Rows moved when a category was deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryRemoval {
    pub expenses: usize,
    pub fixed_expenses: usize,
    /// Whether a budget was carried over to the unclassified category
    pub budget_moved: bool,
}

/// Repository for category persistence
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: Database,
}

impl CategoryRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All categories in insertion order
    pub fn list(&self) -> LedgerResult<Vec<Category>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(
            "SELECT name, is_default, consumption_type FROM categories ORDER BY rowid",
        )?;
        let categories = stmt
            .query_map([], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    pub fn names(&self) -> LedgerResult<Vec<String>> {
        Ok(self.list()?.into_iter().map(|c| c.name).collect())
    }

    pub fn get(&self, name: &str) -> LedgerResult<Option<Category>> {
        let conn = self.db.connect()?;
        let category = conn
            .query_row(
                "SELECT name, is_default, consumption_type FROM categories WHERE name = ?1",
                [name],
                from_row,
            )
            .optional()?;
        Ok(category)
    }

    pub fn exists(&self, name: &str) -> LedgerResult<bool> {
        Ok(self.get(name)?.is_some())
    }

    /// Name to consumption type mapping
    pub fn type_map(&self) -> LedgerResult<HashMap<String, ConsumptionType>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|c| (c.name, c.consumption_type))
            .collect())
    }

    /// Insert a category; an existing name is a `Duplicate` error
    pub fn insert(&self, category: &Category) -> LedgerResult<()> {
        let conn = self.db.connect()?;
        let result = conn.execute(
            "INSERT INTO categories (name, is_default, consumption_type) VALUES (?1, ?2, ?3)",
            params![
                category.name,
                category.is_default as i64,
                category.consumption_type.as_str()
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(LedgerError::Duplicate {
                    entity_type: "Category",
                    identifier: category.name.clone(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a category and move everything that referenced it
    ///
    /// Expenses and fixed expenses are reassigned to `fallback`. A budget on
    /// the deleted category is moved to `fallback`, added to any budget it
    /// already has. Returns `None` when the category does not exist; nothing
    /// is written in that case.
    pub fn delete_and_reassign(
        &self,
        name: &str,
        fallback: &str,
    ) -> LedgerResult<Option<CategoryRemoval>> {
        let mut conn = self.db.connect()?;
        let tx = conn.transaction()?;

        let exists: i64 = tx.query_row(
            "SELECT COUNT(*) FROM categories WHERE name = ?1",
            [name],
            |r| r.get(0),
        )?;
        if exists == 0 {
            return Ok(None);
        }

        let expenses = tx.execute(
            "UPDATE expenses SET category = ?1 WHERE category = ?2",
            params![fallback, name],
        )?;
        let fixed_expenses = tx.execute(
            "UPDATE fixed_expenses SET category = ?1 WHERE category = ?2",
            params![fallback, name],
        )?;

        let budget: Option<i64> = tx
            .query_row(
                "SELECT amount FROM budgets WHERE category = ?1",
                [name],
                |r| r.get(0),
            )
            .optional()?;
        if let Some(amount) = budget {
            tx.execute(
                "INSERT INTO budgets (category, amount) VALUES (?1, ?2)
                 ON CONFLICT(category) DO UPDATE SET amount = amount + excluded.amount",
                params![fallback, amount],
            )?;
            tx.execute("DELETE FROM budgets WHERE category = ?1", [name])?;
        }

        tx.execute("DELETE FROM categories WHERE name = ?1", [name])?;
        tx.commit()?;

        Ok(Some(CategoryRemoval {
            expenses,
            fixed_expenses,
            budget_moved: budget.is_some(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::initialize_schema;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, Database, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(temp_dir.path().join("ledger.db"));
        initialize_schema(&db.connect().unwrap()).unwrap();
        let repo = CategoryRepository::new(db.clone());
        repo.insert(&Category::seeded("unclassified", ConsumptionType::Unclassified))
            .unwrap();
        (temp_dir, db, repo)
    }

    fn count(db: &Database, sql: &str, name: &str) -> i64 {
        db.connect()
            .unwrap()
            .query_row(sql, [name], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn test_insert_duplicate() {
        let (_temp, _db, repo) = create_test_repo();
        repo.insert(&Category::new("Pets", ConsumptionType::Discretionary))
            .unwrap();

        let err = repo
            .insert(&Category::new("Pets", ConsumptionType::Essential))
            .unwrap_err();
        assert!(err.is_duplicate());

        let pets = repo.get("Pets").unwrap().unwrap();
        assert_eq!(pets.consumption_type, ConsumptionType::Discretionary);
        assert!(!pets.is_default);
    }

    #[test]
    fn test_type_map() {
        let (_temp, _db, repo) = create_test_repo();
        repo.insert(&Category::new("Pets", ConsumptionType::Discretionary))
            .unwrap();

        let map = repo.type_map().unwrap();
        assert_eq!(map.get("Pets"), Some(&ConsumptionType::Discretionary));
        assert_eq!(map.get("unclassified"), Some(&ConsumptionType::Unclassified));
        assert_eq!(repo.names().unwrap(), vec!["unclassified", "Pets"]);
    }

    #[test]
    fn test_delete_reassigns_expenses() {
        let (_temp, db, repo) = create_test_repo();
        repo.insert(&Category::new("Pets", ConsumptionType::Discretionary))
            .unwrap();
        db.connect()
            .unwrap()
            .execute_batch(
                "INSERT INTO expenses (date, item, amount, category) VALUES ('2026-01-02', 'Food', 30000, 'Pets');
                 INSERT INTO expenses (date, item, amount, category) VALUES ('2026-01-09', 'Vet', 80000, 'Pets');
                 INSERT INTO expenses (date, item, amount, category) VALUES ('2026-01-09', 'Bus', 1500, 'unclassified');
                 INSERT INTO fixed_expenses (item, amount, category, payment_day) VALUES ('Insurance', 20000, 'Pets', 5);",
            )
            .unwrap();

        let removal = repo.delete_and_reassign("Pets", "unclassified").unwrap().unwrap();
        assert_eq!(removal.expenses, 2);
        assert_eq!(removal.fixed_expenses, 1);
        assert!(!removal.budget_moved);

        let on_deleted = "SELECT COUNT(*) FROM expenses WHERE category = ?1";
        assert_eq!(count(&db, on_deleted, "Pets"), 0);
        assert_eq!(count(&db, on_deleted, "unclassified"), 3);
        assert_eq!(
            count(&db, "SELECT COUNT(*) FROM fixed_expenses WHERE category = ?1", "unclassified"),
            1
        );
        assert!(!repo.exists("Pets").unwrap());
    }

    #[test]
    fn test_delete_merges_budget_into_fallback() {
        let (_temp, db, repo) = create_test_repo();
        repo.insert(&Category::new("Pets", ConsumptionType::Discretionary))
            .unwrap();
        db.connect()
            .unwrap()
            .execute_batch(
                "INSERT INTO budgets (category, amount) VALUES ('Pets', 50000);
                 INSERT INTO budgets (category, amount) VALUES ('unclassified', 10000);",
            )
            .unwrap();

        let removal = repo.delete_and_reassign("Pets", "unclassified").unwrap().unwrap();
        assert!(removal.budget_moved);

        assert_eq!(count(&db, "SELECT COUNT(*) FROM budgets WHERE category = ?1", "Pets"), 0);
        assert_eq!(
            count(&db, "SELECT amount FROM budgets WHERE category = ?1", "unclassified"),
            60000
        );
    }

    #[test]
    fn test_delete_missing_category() {
        let (_temp, _db, repo) = create_test_repo();
        assert!(repo.delete_and_reassign("Nope", "unclassified").unwrap().is_none());
    }

    #[test]
    fn test_failed_delete_leaves_everything_in_place() {
        let (_temp, db, repo) = create_test_repo();
        repo.insert(&Category::new("Pets", ConsumptionType::Discretionary))
            .unwrap();
        db.connect()
            .unwrap()
            .execute_batch(
                "INSERT INTO expenses (date, item, amount, category) VALUES ('2026-01-02', 'Food', 30000, 'Pets');
                 CREATE TRIGGER keep_categories BEFORE DELETE ON categories
                 BEGIN SELECT RAISE(ABORT, 'locked'); END;",
            )
            .unwrap();

        assert!(repo.delete_and_reassign("Pets", "unclassified").is_err());

        assert_eq!(count(&db, "SELECT COUNT(*) FROM expenses WHERE category = ?1", "Pets"), 1);
        assert!(repo.exists("Pets").unwrap());
    }
}
