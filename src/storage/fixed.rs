//! Fixed expense repository for SQLite storage

use rusqlite::{params, OptionalExtension, Row};

use crate::error::LedgerResult;
use crate::models::{FixedExpense, Money, NewFixedExpense, Spender};

use super::database::Database;

const SELECT_COLUMNS: &str =
    "SELECT id, item, amount, category, spender, payment_day FROM fixed_expenses";

fn from_row(row: &Row<'_>) -> rusqlite::Result<FixedExpense> {
    let spender: Option<String> = row.get(4)?;
    Ok(FixedExpense {
        id: row.get(0)?,
        item: row.get(1)?,
        amount: Money::from_units(row.get(2)?),
        category: row.get(3)?,
        spender: spender
            .and_then(|s| s.parse::<Spender>().ok())
            .unwrap_or_default(),
        payment_day: row.get(5)?,
    })
}

/// Repository for recurring expense templates
#[derive(Debug, Clone)]
pub struct FixedExpenseRepository {
    db: Database,
}

impl FixedExpenseRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a template, returning its id
    pub fn insert(&self, entry: &NewFixedExpense) -> LedgerResult<i64> {
        let conn = self.db.connect()?;
        conn.execute(
            "INSERT INTO fixed_expenses (item, amount, category, spender, payment_day)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.item,
                entry.amount.units(),
                entry.category,
                entry.spender.as_str(),
                entry.payment_day,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// All templates ordered by payment day
    pub fn list(&self) -> LedgerResult<Vec<FixedExpense>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY payment_day, id", SELECT_COLUMNS))?;
        let rows = stmt
            .query_map([], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get(&self, id: i64) -> LedgerResult<Option<FixedExpense>> {
        let conn = self.db.connect()?;
        let row = conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_COLUMNS), [id], from_row)
            .optional()?;
        Ok(row)
    }

    /// Delete a template; deleting a missing id is a no-op
    pub fn delete(&self, id: i64) -> LedgerResult<bool> {
        let conn = self.db.connect()?;
        let deleted = conn.execute("DELETE FROM fixed_expenses WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::initialize_schema;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, FixedExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(temp_dir.path().join("ledger.db"));
        initialize_schema(&db.connect().unwrap()).unwrap();
        (temp_dir, FixedExpenseRepository::new(db))
    }

    fn template(item: &str, amount: i64, day: u32) -> NewFixedExpense {
        NewFixedExpense {
            item: item.to_string(),
            amount: Money::from_units(amount),
            category: "Utilities/Housing".to_string(),
            spender: Spender::Joint,
            payment_day: day,
        }
    }

    #[test]
    fn test_list_ordered_by_payment_day() {
        let (_temp, repo) = create_test_repo();
        repo.insert(&template("Internet", 33000, 25)).unwrap();
        repo.insert(&template("Rent", 700000, 1)).unwrap();
        repo.insert(&template("Phone", 55000, 10)).unwrap();

        let days: Vec<u32> = repo.list().unwrap().iter().map(|f| f.payment_day).collect();
        assert_eq!(days, vec![1, 10, 25]);
    }

    #[test]
    fn test_get_and_delete() {
        let (_temp, repo) = create_test_repo();
        let id = repo.insert(&template("Rent", 700000, 1)).unwrap();

        let stored = repo.get(id).unwrap().unwrap();
        assert_eq!(stored.item, "Rent");
        assert_eq!(stored.amount, Money::from_units(700000));

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }
}
