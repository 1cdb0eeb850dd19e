//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers for the spending, trend and budget reports.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Expense, Money};
use crate::reports::{
    BudgetReport, CategorySpending, ConsumptionSpending, DashboardSummary, MonthDelta, WeekBucket,
};

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Format the dashboard headline
pub fn format_summary(title: &str, summary: &DashboardSummary, suffix: &str) -> String {
    let mut output = format!(
        "{}\n  Total:    {}\n  Expenses: {}\n",
        title,
        summary.total.format_with_suffix(suffix),
        summary.count
    );

    if let Some(top) = &summary.top_category {
        output.push_str(&format!(
            "  Top:      {} ({}, {})\n",
            top.category,
            top.total.format_with_suffix(suffix),
            format_percentage(top.percentage)
        ));
    }

    output
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Share bar")]
    bar: String,
}

/// Format the per-category breakdown with share bars
pub fn format_category_breakdown(rows: &[CategorySpending], suffix: &str) -> String {
    if rows.is_empty() {
        return "No spending recorded.\n".to_string();
    }

    let table_rows = rows.iter().map(|r| BreakdownRow {
        category: r.category.clone(),
        count: r.count,
        total: r.total.format_with_suffix(suffix),
        share: format_percentage(r.percentage),
        bar: format_bar(r.percentage, 100.0, 20),
    });

    format!("{}\n", Table::new(table_rows).with(Style::rounded()))
}

/// Format essential / discretionary / unclassified totals
pub fn format_consumption_breakdown(rows: &[ConsumptionSpending], suffix: &str) -> String {
    rows.iter()
        .map(|r| {
            format!(
                "  {:<14} {:>14} {:>6}\n",
                r.consumption_type.to_string(),
                r.total.format_with_suffix(suffix),
                format_percentage(r.percentage)
            )
        })
        .collect()
}

#[derive(Tabled)]
struct WeekRow {
    #[tabled(rename = "Week of")]
    week_start: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
}

/// Format weekly buckets
pub fn format_weekly(buckets: &[WeekBucket], suffix: &str) -> String {
    if buckets.is_empty() {
        return "No spending recorded.\n".to_string();
    }

    let rows = buckets.iter().map(|b| WeekRow {
        week_start: b.week_start.to_string(),
        count: b.count,
        total: b.total.format_with_suffix(suffix),
    });

    format!("{}\n", Table::new(rows).with(Style::rounded()))
}

#[derive(Tabled)]
struct TopRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
}

/// Format the largest expenses
pub fn format_top(expenses: &[Expense], suffix: &str) -> String {
    if expenses.is_empty() {
        return "No spending recorded.\n".to_string();
    }

    let rows = expenses.iter().enumerate().map(|(i, e)| TopRow {
        rank: i + 1,
        date: e.date_string(),
        item: truncate(&e.item, 30),
        amount: e.amount.format_with_suffix(suffix),
        category: e.category.clone(),
    });

    format!("{}\n", Table::new(rows).with(Style::rounded()))
}

/// Format a month-over-month comparison
pub fn format_delta(month: &str, current: Money, delta: &MonthDelta, suffix: &str) -> String {
    match delta {
        MonthDelta::NoPriorData => format!(
            "{}: {} (no earlier month to compare)\n",
            month,
            current.format_with_suffix(suffix)
        ),
        MonthDelta::Change {
            previous_month,
            previous,
            ..
        } => format!(
            "{}: {} vs {} {} ({})\n",
            month,
            current.format_with_suffix(suffix),
            previous_month,
            previous.format_with_suffix(suffix),
            delta
        ),
    }
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Progress")]
    bar: String,
}

/// Format budget progress for a month
pub fn format_budget_report(report: &BudgetReport, suffix: &str) -> String {
    let mut output = format!("Budget status for {}\n", report.month);

    if report.rows.is_empty() {
        output.push_str("No budgets set.\n");
    } else {
        let rows = report.rows.iter().map(|r| BudgetRow {
            category: r.category.clone(),
            budget: r.budget.format_with_suffix(suffix),
            spent: r.spent.format_with_suffix(suffix),
            remaining: r.remaining.format_with_suffix(suffix),
            used: format_percentage(r.percent_used),
            bar: format_bar(r.percent_used.min(100.0), 100.0, 20),
        });
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');
        output.push_str(&format!(
            "Total: {} of {}\n",
            report.total_spent.format_with_suffix(suffix),
            report.total_budget.format_with_suffix(suffix)
        ));
    }

    if !report.unbudgeted.is_empty() {
        output.push_str("\nSpending without a budget:\n");
        for (category, spent) in &report.unbudgeted {
            output.push_str(&format!(
                "  {:<20} {}\n",
                category,
                spent.format_with_suffix(suffix)
            ));
        }
    }

    output
}
