//! Report CLI commands
//!
//! Implements CLI commands for spending summaries and trends.

use chrono::Local;
use clap::Subcommand;

use crate::display::{
    format_category_breakdown, format_consumption_breakdown, format_delta, format_summary,
    format_top, format_weekly,
};
use crate::error::LedgerResult;
use crate::models::{MonthFilter, SpenderFilter, YearMonth};
use crate::reports::{
    category_breakdown, consumption_breakdown, daily_total, dashboard_summary, month_delta,
    month_totals, top_n, weekly_buckets,
};
use crate::services::{CategoryService, ExpenseService};
use crate::storage::Storage;

use super::{filter_or_current, month_or_current};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Totals, top category and essential/discretionary split
    Summary {
        /// Month (YYYY-MM) or "all"; defaults to the current month
        #[arg(short, long)]
        month: Option<MonthFilter>,
        /// Spender or "all"
        #[arg(short, long, default_value = "all")]
        spender: SpenderFilter,
    },

    /// Spending per category
    Categories {
        /// Month (YYYY-MM) or "all"; defaults to the current month
        #[arg(short, long)]
        month: Option<MonthFilter>,
    },

    /// Spending per Monday-starting week
    Weekly {
        /// Month (YYYY-MM) or "all"; defaults to the current month
        #[arg(short, long)]
        month: Option<MonthFilter>,
    },

    /// Largest expenses
    Top {
        /// Month (YYYY-MM) or "all"; defaults to the current month
        #[arg(short, long)]
        month: Option<MonthFilter>,
        /// Number of expenses to show
        #[arg(short, long, default_value_t = 5)]
        count: usize,
    },

    /// Compare a month with the previous month that has spending
    Delta {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
}

/// Handle a report command
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> LedgerResult<()> {
    let expenses = ExpenseService::new(storage);
    let suffix = storage.settings().currency_suffix.as_str();

    match cmd {
        ReportCommands::Summary { month, spender } => {
            let month = filter_or_current(month);
            let rows = expenses.list(month, spender);
            let summary = dashboard_summary(&rows);

            print!(
                "{}",
                format_summary(&format!("Spending ({})", month), &summary, suffix)
            );

            let today = Local::now().date_naive();
            let today_rows = expenses.list(MonthFilter::Month(YearMonth::of(today)), spender);
            println!(
                "  Today:    {}",
                daily_total(&today_rows, today).format_with_suffix(suffix)
            );

            let types = CategoryService::new(storage).types();
            println!();
            println!("By consumption type:");
            print!(
                "{}",
                format_consumption_breakdown(&consumption_breakdown(&rows, &types), suffix)
            );
        }

        ReportCommands::Categories { month } => {
            let month = filter_or_current(month);
            let rows = expenses.list(month, SpenderFilter::All);
            println!("Spending by category ({})", month);
            print!(
                "{}",
                format_category_breakdown(&category_breakdown(&rows), suffix)
            );
        }

        ReportCommands::Weekly { month } => {
            let month = filter_or_current(month);
            let rows = expenses.list(month, SpenderFilter::All);
            println!("Weekly spending ({})", month);
            print!("{}", format_weekly(&weekly_buckets(&rows), suffix));
        }

        ReportCommands::Top { month, count } => {
            let month = filter_or_current(month);
            let rows = expenses.list(month, SpenderFilter::All);
            println!("Top {} expenses ({})", count, month);
            print!("{}", format_top(&top_n(&rows, count), suffix));
        }

        ReportCommands::Delta { month } => {
            let month = month_or_current(month);
            let totals = month_totals(&expenses.list(MonthFilter::All, SpenderFilter::All));
            let current = totals.get(&month).copied().unwrap_or_default();
            let delta = month_delta(&totals, month);
            print!(
                "{}",
                format_delta(&month.to_string(), current, &delta, suffix)
            );
        }
    }

    Ok(())
}
