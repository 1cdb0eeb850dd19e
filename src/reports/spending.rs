//! Spending Report
//!
//! Totals, per-category and per-consumption-type breakdowns, and the
//! dashboard summary. Everything here is a pure function over loaded
//! expenses.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{ConsumptionType, Expense, Money};

/// Spending breakdown for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    pub category: String,
    pub total: Money,
    /// Number of expenses
    pub count: usize,
    /// Share of total spending, 0-100
    pub percentage: f64,
}

/// Spending total for one consumption type
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionSpending {
    pub consumption_type: ConsumptionType,
    pub total: Money,
    pub percentage: f64,
}

/// Headline numbers for a set of expenses
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total: Money,
    pub count: usize,
    /// Category with the highest spending, if any
    pub top_category: Option<CategorySpending>,
}

/// Sum of all amounts
pub fn total(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Sum of amounts dated on `day`
pub fn daily_total(expenses: &[Expense], day: NaiveDate) -> Money {
    expenses
        .iter()
        .filter(|e| e.date == day)
        .map(|e| e.amount)
        .sum()
}

fn percentage(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.units() as f64 / whole.units() as f64 * 100.0
    }
}

/// Totals per category, highest spending first
///
/// Ties keep the order in which categories first appear.
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategorySpending> {
    let grand_total = total(expenses);
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, (Money, usize)> = HashMap::new();

    for expense in expenses {
        let entry = totals.entry(expense.category.as_str()).or_insert_with(|| {
            order.push(expense.category.as_str());
            (Money::zero(), 0)
        });
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let mut rows: Vec<CategorySpending> = order
        .into_iter()
        .map(|category| {
            let (sum, count) = totals[category];
            CategorySpending {
                category: category.to_string(),
                total: sum,
                count,
                percentage: percentage(sum, grand_total),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

/// Totals per consumption type, in [`ConsumptionType::all`] order
///
/// Categories missing from `types` count as unclassified. Types with no
/// spending are included with a zero total.
pub fn consumption_breakdown(
    expenses: &[Expense],
    types: &HashMap<String, ConsumptionType>,
) -> Vec<ConsumptionSpending> {
    let grand_total = total(expenses);
    let mut totals: HashMap<ConsumptionType, Money> = HashMap::new();

    for expense in expenses {
        let consumption_type = types
            .get(&expense.category)
            .copied()
            .unwrap_or(ConsumptionType::Unclassified);
        *totals.entry(consumption_type).or_default() += expense.amount;
    }

    ConsumptionType::all()
        .iter()
        .map(|&consumption_type| {
            let sum = totals.get(&consumption_type).copied().unwrap_or_default();
            ConsumptionSpending {
                consumption_type,
                total: sum,
                percentage: percentage(sum, grand_total),
            }
        })
        .collect()
}

/// The `n` largest expenses, ties kept in input order
pub fn top_n(expenses: &[Expense], n: usize) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    // sort_by is stable
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
    sorted.truncate(n);
    sorted
}

/// Total, count and top category
pub fn dashboard_summary(expenses: &[Expense]) -> DashboardSummary {
    DashboardSummary {
        total: total(expenses),
        count: expenses.len(),
        top_category: category_breakdown(expenses).into_iter().next(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::Spender;

    pub(crate) fn expense(id: i64, date: &str, item: &str, amount: i64, category: &str) -> Expense {
        Expense {
            id,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            item: item.to_string(),
            amount: Money::from_units(amount),
            category: category.to_string(),
            spender: Spender::Joint,
            created_at: String::new(),
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(1, "2026-02-01", "Groceries", 50000, "Living"),
            expense(2, "2026-02-01", "Coffee", 5000, "Dining/Snacks"),
            expense(3, "2026-02-02", "Dinner", 45000, "Dining/Snacks"),
            expense(4, "2026-02-03", "Pet food", 20000, "Pets"),
        ]
    }

    #[test]
    fn test_totals() {
        let expenses = sample();
        assert_eq!(total(&expenses), Money::from_units(120000));
        assert_eq!(
            daily_total(&expenses, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()),
            Money::from_units(55000)
        );
        assert_eq!(total(&[]), Money::zero());
    }

    #[test]
    fn test_category_breakdown_sorted_with_percentages() {
        let rows = category_breakdown(&sample());
        let names: Vec<_> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["Living", "Dining/Snacks", "Pets"]);

        // Living and Dining tie at 50,000; Living appears first
        assert_eq!(rows[1].count, 2);
        assert!((rows[0].percentage - 41.666).abs() < 0.01);
        let sum: f64 = rows.iter().map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_consumption_breakdown_unknown_is_unclassified() {
        let mut types = HashMap::new();
        types.insert("Living".to_string(), ConsumptionType::Essential);
        types.insert("Dining/Snacks".to_string(), ConsumptionType::Discretionary);

        let rows = consumption_breakdown(&sample(), &types);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].total, Money::from_units(50000));
        assert_eq!(rows[1].total, Money::from_units(50000));
        assert_eq!(rows[2].consumption_type, ConsumptionType::Unclassified);
        assert_eq!(rows[2].total, Money::from_units(20000));
    }

    #[test]
    fn test_top_n_stable_for_ties() {
        let expenses = vec![
            expense(1, "2026-02-01", "A", 1000, "Other"),
            expense(2, "2026-02-01", "B", 3000, "Other"),
            expense(3, "2026-02-01", "C", 1000, "Other"),
            expense(4, "2026-02-01", "D", 2000, "Other"),
        ];
        let items: Vec<_> = top_n(&expenses, 3).into_iter().map(|e| e.item).collect();
        assert_eq!(items, vec!["B", "D", "A"]);
        assert!(top_n(&expenses, 0).is_empty());
    }

    #[test]
    fn test_dashboard_summary() {
        let summary = dashboard_summary(&sample());
        assert_eq!(summary.count, 4);
        assert_eq!(summary.top_category.unwrap().category, "Living");

        let empty = dashboard_summary(&[]);
        assert_eq!(empty.total, Money::zero());
        assert!(empty.top_category.is_none());
    }
}
