//! Budget Overview Report
//!
//! Compares a month's spending against each category budget and lists the
//! categories that were spent on without a budget.

use std::collections::HashMap;

use crate::models::{Budget, Expense, Money, YearMonth};

/// Progress of one category against its budget
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgress {
    pub category: String,
    pub budget: Money,
    pub spent: Money,
    /// `budget - spent`; negative when over budget
    pub remaining: Money,
    /// Spent as a percentage of budget; 0 when the budget is zero
    pub percent_used: f64,
}

impl BudgetProgress {
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Budget report for one month
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetReport {
    pub month: YearMonth,
    /// One row per budget, in budget order
    pub rows: Vec<BudgetProgress>,
    /// Spending in categories without a budget, highest first
    pub unbudgeted: Vec<(String, Money)>,
    pub total_budget: Money,
    pub total_spent: Money,
}

impl BudgetReport {
    /// Build the report from the month's expenses
    ///
    /// `expenses` is expected to be filtered to `month` already; rows from
    /// other months are ignored.
    pub fn generate(month: YearMonth, budgets: &[Budget], expenses: &[Expense]) -> Self {
        let mut spent_by_category: HashMap<&str, Money> = HashMap::new();
        for expense in expenses.iter().filter(|e| YearMonth::of(e.date) == month) {
            *spent_by_category
                .entry(expense.category.as_str())
                .or_default() += expense.amount;
        }

        let rows: Vec<BudgetProgress> = budgets
            .iter()
            .map(|budget| {
                let spent = spent_by_category
                    .get(budget.category.as_str())
                    .copied()
                    .unwrap_or_default();
                let percent_used = if budget.amount.is_zero() {
                    0.0
                } else {
                    spent.units() as f64 / budget.amount.units() as f64 * 100.0
                };
                BudgetProgress {
                    category: budget.category.clone(),
                    budget: budget.amount,
                    spent,
                    remaining: budget.amount - spent,
                    percent_used,
                }
            })
            .collect();

        let mut unbudgeted: Vec<(String, Money)> = spent_by_category
            .iter()
            .filter(|(category, _)| !budgets.iter().any(|b| b.category == **category))
            .map(|(category, spent)| (category.to_string(), *spent))
            .collect();
        unbudgeted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            month,
            total_budget: rows.iter().map(|r| r.budget).sum(),
            total_spent: spent_by_category.values().copied().sum(),
            rows,
            unbudgeted,
        }
    }

    /// Categories spending more than their budget
    pub fn over_budget(&self) -> impl Iterator<Item = &BudgetProgress> {
        self.rows.iter().filter(|r| r.is_over_budget())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::spending::tests::expense;

    fn feb() -> YearMonth {
        YearMonth::new(2026, 2).unwrap()
    }

    #[test]
    fn test_progress_and_remaining() {
        let budgets = vec![
            Budget::new("Dining/Snacks", Money::from_units(100000)),
            Budget::new("Living", Money::from_units(0)),
        ];
        let expenses = vec![
            expense(1, "2026-02-01", "Dinner", 120000, "Dining/Snacks"),
            expense(2, "2026-02-02", "Soap", 5000, "Living"),
            expense(3, "2026-01-31", "Old dinner", 99999, "Dining/Snacks"),
        ];

        let report = BudgetReport::generate(feb(), &budgets, &expenses);
        assert_eq!(report.rows[0].spent, Money::from_units(120000));
        assert_eq!(report.rows[0].remaining, Money::from_units(-20000));
        assert!((report.rows[0].percent_used - 120.0).abs() < 1e-9);
        assert!(report.rows[0].is_over_budget());

        // zero budget reports 0%
        assert_eq!(report.rows[1].percent_used, 0.0);
        assert_eq!(report.over_budget().count(), 2);
        assert_eq!(report.total_spent, Money::from_units(125000));
    }

    #[test]
    fn test_unbudgeted_spending_listed() {
        let budgets = vec![Budget::new("Living", Money::from_units(300000))];
        let expenses = vec![
            expense(1, "2026-02-01", "Soap", 5000, "Living"),
            expense(2, "2026-02-03", "Shoes", 80000, "Shopping"),
            expense(3, "2026-02-04", "Movie", 15000, "Culture/Education"),
        ];

        let report = BudgetReport::generate(feb(), &budgets, &expenses);
        assert_eq!(
            report.unbudgeted,
            vec![
                ("Shopping".to_string(), Money::from_units(80000)),
                ("Culture/Education".to_string(), Money::from_units(15000)),
            ]
        );
        assert_eq!(report.rows[0].remaining, Money::from_units(295000));
    }
}
