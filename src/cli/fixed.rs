//! Fixed expense CLI commands

use clap::Subcommand;

use crate::display::{format_fixed_status, format_fixed_table};
use crate::error::LedgerResult;
use crate::models::{Money, NewFixedExpense, Spender, YearMonth};
use crate::services::FixedExpenseService;
use crate::storage::Storage;

use super::{month_or_current, parse_amount};

/// Fixed expense subcommands
#[derive(Subcommand)]
pub enum FixedCommands {
    /// Add a recurring monthly expense
    Add {
        /// What is paid
        item: String,
        /// Amount per month
        #[arg(value_parser = parse_amount)]
        amount: Money,
        /// Day of month the payment is due (1-31)
        #[arg(short, long)]
        day: u32,
        /// Category name (defaults to the unclassified category)
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        spender: Option<Spender>,
    },

    /// List recurring expenses by payment day
    List,

    /// Delete a recurring expense
    Delete {
        /// Fixed expense ID
        id: i64,
    },

    /// Show which recurring expenses are paid this month
    Status {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<YearMonth>,
    },

    /// Record every unpaid recurring expense for the month
    Record {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
}

/// Handle a fixed expense command
pub fn handle_fixed_command(storage: &Storage, cmd: FixedCommands) -> LedgerResult<()> {
    let service = FixedExpenseService::new(storage);
    let suffix = storage.settings().currency_suffix.as_str();

    match cmd {
        FixedCommands::Add {
            item,
            amount,
            day,
            category,
            spender,
        } => {
            let fixed = service.save(NewFixedExpense {
                item,
                amount,
                category: category.unwrap_or_else(|| storage.unclassified_category().to_string()),
                spender: spender.unwrap_or(storage.settings().default_spender),
                payment_day: day,
            })?;
            println!(
                "Added fixed expense #{}: {} {} on day {}",
                fixed.id,
                fixed.item,
                fixed.amount.format_with_suffix(suffix),
                fixed.payment_day
            );
        }

        FixedCommands::List => {
            print!("{}", format_fixed_table(&service.list(), suffix));
        }

        FixedCommands::Delete { id } => {
            if service.delete(id)? {
                println!("Deleted fixed expense #{}", id);
            } else {
                println!("No fixed expense #{}", id);
            }
        }

        FixedCommands::Status { month } => {
            let month = month_or_current(month);
            println!("Fixed expenses for {}", month);
            print!("{}", format_fixed_status(&service.status(month), suffix));
        }

        FixedCommands::Record { month } => {
            let month = month_or_current(month);
            let ids = service.record_pending(month)?;
            if ids.is_empty() {
                println!("All fixed expenses for {} are already recorded.", month);
            } else {
                println!("Recorded {} fixed expense(s) for {}.", ids.len(), month);
            }
        }
    }

    Ok(())
}
