//! Expense repository for SQLite storage
//!
//! Reads and writes the `expenses` table. Dates are stored as `YYYY-MM-DD`
//! text; month filters compare the first seven characters.

use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use crate::error::LedgerResult;
use crate::models::{
    Expense, ExpenseUpdate, Money, MonthFilter, NewExpense, Spender, SpenderFilter, YearMonth,
    DATE_FORMAT,
};

use super::database::Database;

const SELECT_COLUMNS: &str =
    "SELECT id, date, item, amount, category, spender, created_at FROM expenses";

/// Row as stored; legacy databases may hold NULLs and malformed dates
struct RawExpense {
    id: i64,
    date: String,
    item: Option<String>,
    amount: Option<i64>,
    category: Option<String>,
    spender: Option<String>,
    created_at: Option<String>,
}

impl RawExpense {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            item: row.get(2)?,
            amount: row.get(3)?,
            category: row.get(4)?,
            spender: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    /// Convert to a typed expense, skipping rows whose date does not parse
    fn into_expense(self) -> Option<Expense> {
        let date = match NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT) {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!(id = self.id, date = %self.date, error = %e, "Skipping expense with unparseable date");
                return None;
            }
        };

        let spender = match self.spender.as_deref().map(str::parse::<Spender>) {
            Some(Ok(spender)) => spender,
            Some(Err(e)) => {
                tracing::warn!(id = self.id, error = %e, "Unknown spender, using joint");
                Spender::Joint
            }
            None => Spender::Joint,
        };

        Some(Expense {
            id: self.id,
            date,
            item: self.item.unwrap_or_default(),
            amount: Money::from_units(self.amount.unwrap_or(0)),
            category: self.category.unwrap_or_default(),
            spender,
            created_at: self.created_at.unwrap_or_default(),
        })
    }
}

/// Repository for expense persistence
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: Database,
}

impl ExpenseRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a batch in one transaction
    ///
    /// Any failure rolls back the whole batch. Returns the new row ids in
    /// input order.
    pub fn insert_batch(&self, entries: &[NewExpense]) -> LedgerResult<Vec<i64>> {
        let mut conn = self.db.connect()?;
        let tx = conn.transaction()?;
        let mut ids = Vec::with_capacity(entries.len());

        {
            let mut stmt = tx.prepare(
                "INSERT INTO expenses (date, item, amount, category, spender)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for entry in entries {
                stmt.execute(params![
                    entry.date.format(DATE_FORMAT).to_string(),
                    entry.item,
                    entry.amount.units(),
                    entry.category,
                    entry.spender.as_str(),
                ])?;
                ids.push(tx.last_insert_rowid());
            }
        }

        tx.commit()?;
        tracing::debug!(count = ids.len(), "Inserted expenses");
        Ok(ids)
    }

    /// Load expenses matching the filters, newest date first
    pub fn load(&self, month: MonthFilter, spender: SpenderFilter) -> LedgerResult<Vec<Expense>> {
        let mut clauses = Vec::new();
        let mut values = Vec::new();

        if let MonthFilter::Month(m) = month {
            clauses.push("substr(date, 1, 7) = ?");
            values.push(m.to_string());
        }
        if let SpenderFilter::Only(s) = spender {
            clauses.push("spender = ?");
            values.push(s.as_str().to_string());
        }

        let mut sql = SELECT_COLUMNS.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY date DESC, id DESC");

        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), RawExpense::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows.into_iter().filter_map(RawExpense::into_expense).collect())
    }

    /// Get a single expense by id
    pub fn get(&self, id: i64) -> LedgerResult<Option<Expense>> {
        let conn = self.db.connect()?;
        let raw = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                [id],
                RawExpense::from_row,
            )
            .optional()?;

        Ok(raw.and_then(RawExpense::into_expense))
    }

    /// Write several fields of one row in a single transaction
    ///
    /// Returns false, writing nothing, when the row does not exist.
    pub fn update(&self, id: i64, updates: &[ExpenseUpdate]) -> LedgerResult<bool> {
        let mut conn = self.db.connect()?;
        let tx = conn.transaction()?;

        for update in updates {
            let value = match update {
                ExpenseUpdate::Amount(amount) => Value::Integer(amount.units()),
                other => Value::Text(other.value_string()),
            };
            let changed = tx.execute(
                &format!("UPDATE expenses SET {} = ?1 WHERE id = ?2", update.column()),
                params![value, id],
            )?;
            if changed == 0 {
                return Ok(false);
            }
        }

        tx.commit()?;
        Ok(true)
    }

    /// Delete a row; deleting a missing id is a no-op
    pub fn delete(&self, id: i64) -> LedgerResult<bool> {
        let conn = self.db.connect()?;
        let deleted = conn.execute("DELETE FROM expenses WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }

    /// Distinct months with data, most recent first
    pub fn months(&self) -> LedgerResult<Vec<YearMonth>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT substr(date, 1, 7) AS month FROM expenses ORDER BY month DESC",
        )?;
        let months = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(months.into_iter().filter_map(|m| m.parse().ok()).collect())
    }

    /// Count all rows
    pub fn count(&self) -> LedgerResult<usize> {
        let conn = self.db.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::initialize_schema;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(temp_dir.path().join("ledger.db"));
        initialize_schema(&db.connect().unwrap()).unwrap();
        (temp_dir, ExpenseRepository::new(db))
    }

    fn entry(date: &str, item: &str, amount: i64, category: &str) -> NewExpense {
        NewExpense::new(
            NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
            item,
            Money::from_units(amount),
            category,
        )
    }

    #[test]
    fn test_insert_grows_load_by_batch_len() {
        let (_temp, repo) = create_test_repo();
        repo.insert_batch(&[entry("2026-01-05", "Groceries", 32000, "Living")])
            .unwrap();
        let before = repo.load(MonthFilter::All, SpenderFilter::All).unwrap().len();

        let batch = vec![
            entry("2026-01-30", "Coffee", 5000, "Dining/Snacks"),
            entry("2026-02-01", "Bus", 1500, "Transportation"),
            entry("2026-02-03", "Book", 18000, "Culture/Education"),
        ];
        let ids = repo.insert_batch(&batch).unwrap();
        assert_eq!(ids.len(), 3);

        let after = repo.load(MonthFilter::All, SpenderFilter::All).unwrap().len();
        assert_eq!(after, before + batch.len());
    }

    #[test]
    fn test_failed_batch_commits_nothing() {
        let (temp, repo) = create_test_repo();
        // Make the second insert fail
        let conn = Database::new(temp.path().join("ledger.db")).connect().unwrap();
        conn.execute_batch(
            "CREATE TRIGGER reject_poison BEFORE INSERT ON expenses
             WHEN NEW.item = 'poison' BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
        )
        .unwrap();

        let batch = vec![
            entry("2026-01-30", "Coffee", 5000, "Dining/Snacks"),
            entry("2026-01-30", "poison", 1, "Other"),
        ];
        assert!(repo.insert_batch(&batch).is_err());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_load_orders_by_date_descending() {
        let (_temp, repo) = create_test_repo();
        repo.insert_batch(&[
            entry("2026-01-10", "A", 1, "Other"),
            entry("2026-03-01", "B", 1, "Other"),
            entry("2026-02-15", "C", 1, "Other"),
        ])
        .unwrap();

        let items: Vec<_> = repo
            .load(MonthFilter::All, SpenderFilter::All)
            .unwrap()
            .into_iter()
            .map(|e| e.item)
            .collect();
        assert_eq!(items, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_month_filter_matches_prefix_only() {
        let (_temp, repo) = create_test_repo();
        repo.insert_batch(&[
            entry("2026-02-01", "Feb", 1000, "Other"),
            entry("2026-02-28", "Feb end", 2000, "Other"),
            entry("2026-12-02", "Dec", 3000, "Other"),
            entry("2025-02-10", "Last year", 4000, "Other"),
        ])
        .unwrap();

        let feb = YearMonth::new(2026, 2).unwrap();
        let rows = repo.load(MonthFilter::Month(feb), SpenderFilter::All).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|e| e.date_string().starts_with("2026-02")));

        let all = repo.load(MonthFilter::All, SpenderFilter::All).unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_spender_filter() {
        let (_temp, repo) = create_test_repo();
        repo.insert_batch(&[
            entry("2026-02-01", "Shared", 1000, "Living"),
            entry("2026-02-02", "Toy", 2000, "Shopping").with_spender(Spender::Child),
        ])
        .unwrap();

        let child = repo
            .load(MonthFilter::All, SpenderFilter::Only(Spender::Child))
            .unwrap();
        assert_eq!(child.len(), 1);
        assert_eq!(child[0].item, "Toy");

        let wife = repo
            .load(MonthFilter::All, SpenderFilter::Only(Spender::Wife))
            .unwrap();
        assert!(wife.is_empty());
    }

    #[test]
    fn test_update_amount_leaves_other_columns() {
        let (_temp, repo) = create_test_repo();
        let ids = repo
            .insert_batch(&[
                entry("2026-02-03", "Lunch", 9000, "Dining/Snacks"),
                entry("2026-02-04", "Dinner", 25000, "Dining/Snacks"),
            ])
            .unwrap();
        let before = repo.get(ids[0]).unwrap().unwrap();
        let other_before = repo.get(ids[1]).unwrap().unwrap();

        let changed = repo
            .update(ids[0], &[ExpenseUpdate::Amount(Money::from_units(7000))])
            .unwrap();
        assert!(changed);

        let after = repo.get(ids[0]).unwrap().unwrap();
        assert_eq!(after.amount, Money::from_units(7000));
        assert_eq!(after.date, before.date);
        assert_eq!(after.item, before.item);
        assert_eq!(after.category, before.category);
        assert_eq!(after.spender, before.spender);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(repo.get(ids[1]).unwrap().unwrap(), other_before);
    }

    #[test]
    fn test_update_each_field() {
        let (_temp, repo) = create_test_repo();
        let id = repo
            .insert_batch(&[entry("2026-02-03", "Lunch", 9000, "Other")])
            .unwrap()[0];

        let new_date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let changed = repo
            .update(
                id,
                &[
                    ExpenseUpdate::Date(new_date),
                    ExpenseUpdate::Item("Brunch".into()),
                    ExpenseUpdate::Category("Dining/Snacks".into()),
                    ExpenseUpdate::Spender(Spender::Husband),
                ],
            )
            .unwrap();
        assert!(changed);

        let row = repo.get(id).unwrap().unwrap();
        assert_eq!(row.date, new_date);
        assert_eq!(row.item, "Brunch");
        assert_eq!(row.category, "Dining/Snacks");
        assert_eq!(row.spender, Spender::Husband);
    }

    #[test]
    fn test_update_missing_row() {
        let (_temp, repo) = create_test_repo();
        let changed = repo
            .update(404, &[ExpenseUpdate::Item("Tea".into())])
            .unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_failed_field_rolls_back_earlier_fields() {
        let (temp, repo) = create_test_repo();
        let id = repo
            .insert_batch(&[entry("2026-02-03", "Lunch", 9000, "Living")])
            .unwrap()[0];
        let conn = Database::new(temp.path().join("ledger.db")).connect().unwrap();
        conn.execute_batch(
            "CREATE TRIGGER reject_category BEFORE UPDATE OF category ON expenses
             BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
        )
        .unwrap();

        let result = repo.update(
            id,
            &[
                ExpenseUpdate::Amount(Money::from_units(7000)),
                ExpenseUpdate::Category("Other".into()),
            ],
        );
        assert!(result.is_err());

        let row = repo.get(id).unwrap().unwrap();
        assert_eq!(row.amount, Money::from_units(9000));
        assert_eq!(row.category, "Living");
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let (_temp, repo) = create_test_repo();
        repo.insert_batch(&[entry("2026-02-03", "Lunch", 9000, "Other")])
            .unwrap();
        let before = repo.load(MonthFilter::All, SpenderFilter::All).unwrap();

        assert!(!repo.delete(9999).unwrap());

        let after = repo.load(MonthFilter::All, SpenderFilter::All).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_delete_existing() {
        let (_temp, repo) = create_test_repo();
        let id = repo
            .insert_batch(&[entry("2026-02-03", "Lunch", 9000, "Other")])
            .unwrap()[0];

        assert!(repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }

    #[test]
    fn test_months_most_recent_first() {
        let (_temp, repo) = create_test_repo();
        assert!(repo.months().unwrap().is_empty());

        repo.insert_batch(&[
            entry("2026-01-10", "A", 1, "Other"),
            entry("2026-02-15", "B", 1, "Other"),
            entry("2026-01-20", "C", 1, "Other"),
        ])
        .unwrap();

        let months: Vec<String> = repo.months().unwrap().iter().map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2026-02", "2026-01"]);
    }

    #[test]
    fn test_legacy_rows_with_bad_dates_are_skipped() {
        let (temp, repo) = create_test_repo();
        let conn = Database::new(temp.path().join("ledger.db")).connect().unwrap();
        conn.execute_batch(
            "INSERT INTO expenses (date, item, amount, category) VALUES ('2026-02-31', 'Bad', 1, 'Other');
             INSERT INTO expenses (date, item, amount, category) VALUES ('2026-02-01', 'Good', NULL, 'Other');",
        )
        .unwrap();

        let rows = repo.load(MonthFilter::All, SpenderFilter::All).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item, "Good");
        assert_eq!(rows[0].amount, Money::zero());
        assert_eq!(rows[0].spender, Spender::Joint);
    }
}
