//! Expense service
//!
//! Validation, category policy and audit logging on top of the expense
//! repository.

use std::collections::HashSet;

use crate::audit::{AuditSubject, Change};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseUpdate, MonthFilter, NewExpense, SpenderFilter, YearMonth};
use crate::reports::expand_installments;
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Insert a batch of expenses atomically
    ///
    /// Entries naming a category that does not exist are filed under the
    /// unclassified category. Returns the new ids in input order.
    pub fn add_batch(&self, entries: Vec<NewExpense>) -> LedgerResult<Vec<i64>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        for entry in &entries {
            entry
                .validate()
                .map_err(|e| LedgerError::Validation(format!("{}: {}", entry.item, e)))?;
        }

        let known: HashSet<String> = self.storage.categories.names()?.into_iter().collect();
        let fallback = self.storage.unclassified_category();

        let entries: Vec<NewExpense> = entries
            .into_iter()
            .map(|mut entry| {
                if !known.contains(&entry.category) {
                    tracing::warn!(
                        item = %entry.item,
                        category = %entry.category,
                        "Unknown category, filing under {}",
                        fallback
                    );
                    entry.category = fallback.to_string();
                }
                entry
            })
            .collect();

        let ids = self.storage.expenses.insert_batch(&entries)?;

        for (id, entry) in ids.iter().zip(&entries) {
            self.storage.record(
                AuditSubject::Expense(*id),
                Some(&entry.item),
                Change::created(entry),
            );
        }

        Ok(ids)
    }

    /// Add one expense, optionally split into monthly installments
    pub fn add_with_installments(
        &self,
        entry: NewExpense,
        installments: u32,
    ) -> LedgerResult<Vec<i64>> {
        let entries = expand_installments(&entry, installments)?;
        self.add_batch(entries)
    }

    /// Expenses matching the filters, newest first
    ///
    /// A storage failure is logged and reported as an empty list.
    pub fn list(&self, month: MonthFilter, spender: SpenderFilter) -> Vec<Expense> {
        match self.storage.expenses.load(month, spender) {
            Ok(expenses) => expenses,
            Err(e) => {
                tracing::warn!(error = %e, %month, "Failed to load expenses");
                Vec::new()
            }
        }
    }

    /// Get an expense by id
    pub fn get(&self, id: i64) -> LedgerResult<Expense> {
        self.storage
            .expenses
            .get(id)?
            .ok_or_else(|| LedgerError::expense_not_found(id))
    }

    /// Change one or more fields of an expense
    ///
    /// Every update is checked before anything is written, and the fields
    /// are written together, so a rejected edit leaves the row untouched.
    /// Moving an expense to a category that does not exist is rejected.
    pub fn update(&self, id: i64, updates: &[ExpenseUpdate]) -> LedgerResult<Expense> {
        if updates.is_empty() {
            return Err(LedgerError::Validation(format!(
                "Nothing to change for expense #{}",
                id
            )));
        }

        for update in updates {
            update
                .validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;

            if let ExpenseUpdate::Category(category) = update {
                if !self.storage.categories.exists(category)? {
                    return Err(LedgerError::category_not_found(category.as_str()));
                }
            }
        }

        let before = self.get(id)?;
        if !self.storage.expenses.update(id, updates)? {
            return Err(LedgerError::expense_not_found(id));
        }

        let mut after = before.clone();
        for update in updates {
            after.apply(update);
        }

        self.storage.record(
            AuditSubject::Expense(id),
            Some(&after.item),
            Change::updated(&before, &after),
        );

        Ok(after)
    }

    /// Delete an expense; returns whether a row was removed
    pub fn delete(&self, id: i64) -> LedgerResult<bool> {
        let existing = self.storage.expenses.get(id)?;
        let deleted = self.storage.expenses.delete(id)?;

        if let Some(expense) = existing.filter(|_| deleted) {
            self.storage.record(
                AuditSubject::Expense(id),
                Some(&expense.item),
                Change::deleted(&expense),
            );
        }

        Ok(deleted)
    }

    /// Months with data, most recent first
    pub fn months(&self) -> Vec<YearMonth> {
        match self.storage.expenses.months() {
            Ok(months) => months,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list months");
                Vec::new()
            }
        }
    }
}
