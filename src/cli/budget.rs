//! Budget CLI commands
//!
//! Implements CLI commands for setting budgets and checking progress.

use clap::Subcommand;

use crate::display::{format_budget_list, format_budget_report};
use crate::error::LedgerResult;
use crate::models::{Money, YearMonth};
use crate::services::BudgetService;
use crate::storage::Storage;

use super::{month_or_current, parse_amount};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly budget for a category
    Set {
        /// Category name
        category: String,
        /// Monthly amount
        #[arg(value_parser = parse_amount)]
        amount: Money,
    },

    /// List budgets
    List,

    /// Remove the budget for a category
    Delete {
        /// Category name
        category: String,
    },

    /// Show spending against budgets for a month
    Status {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> LedgerResult<()> {
    let service = BudgetService::new(storage);
    let suffix = storage.settings().currency_suffix.as_str();

    match cmd {
        BudgetCommands::Set { category, amount } => {
            let budget = service.set(&category, amount)?;
            println!(
                "Budget for {}: {}",
                budget.category,
                budget.amount.format_with_suffix(suffix)
            );
        }

        BudgetCommands::List => {
            print!("{}", format_budget_list(&service.list(), suffix));
        }

        BudgetCommands::Delete { category } => {
            let budget = service.delete(&category)?;
            println!("Removed budget for {}", budget.category);
        }

        BudgetCommands::Status { month } => {
            let report = service.progress(month_or_current(month));
            print!("{}", format_budget_report(&report, suffix));
        }
    }

    Ok(())
}
