//! Expense CLI commands
//!
//! Implements CLI commands for recording, listing, editing and importing
//! expenses.

use std::io::Read;

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::display::{format_expense_line, format_expense_table};
use crate::error::{LedgerError, LedgerResult};
use crate::ingest::parse_extraction;
use crate::models::{ExpenseUpdate, Money, MonthFilter, NewExpense, Spender, SpenderFilter};
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::parse_amount;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// What was bought
        item: String,
        /// Amount (e.g., "12000" or "12,000원")
        #[arg(value_parser = parse_amount)]
        amount: Money,
        /// Category name (defaults to the unclassified category)
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Who spent it: joint, husband, wife or child
        #[arg(short, long)]
        spender: Option<Spender>,
        /// Split evenly over this many consecutive months
        #[arg(short, long, default_value_t = 1)]
        installments: u32,
    },

    /// List expenses, newest first
    List {
        /// Month (YYYY-MM) or "all"
        #[arg(short, long, default_value = "all")]
        month: MonthFilter,
        /// Spender or "all"
        #[arg(short, long, default_value = "all")]
        spender: SpenderFilter,
        /// Maximum number of rows to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Change fields of an expense
    Edit {
        /// Expense ID
        id: i64,
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        item: Option<String>,
        #[arg(short, long, value_parser = parse_amount)]
        amount: Option<Money>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        spender: Option<Spender>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: i64,
    },

    /// Import expenses from an extraction reply (JSON object or list)
    Import {
        /// File holding the reply, or "-" for stdin
        file: String,
        /// Date for entries without one (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Show what would be imported without saving
        #[arg(long)]
        dry_run: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(storage: &Storage, cmd: ExpenseCommands) -> LedgerResult<()> {
    let service = ExpenseService::new(storage);
    let suffix = storage.settings().currency_suffix.as_str();

    match cmd {
        ExpenseCommands::Add {
            item,
            amount,
            category,
            date,
            spender,
            installments,
        } => {
            let entry = NewExpense::new(
                date.unwrap_or_else(|| Local::now().date_naive()),
                item,
                amount,
                category.unwrap_or_else(|| storage.unclassified_category().to_string()),
            )
            .with_spender(spender.unwrap_or(storage.settings().default_spender));

            let ids = service.add_with_installments(entry, installments)?;
            for id in &ids {
                let expense = service.get(*id)?;
                println!("Added: {}", format_expense_line(&expense, suffix));
            }
        }

        ExpenseCommands::List {
            month,
            spender,
            limit,
        } => {
            let mut expenses = service.list(month, spender);
            if let Some(limit) = limit {
                expenses.truncate(limit);
            }
            println!("Expenses ({})", month);
            print!("{}", format_expense_table(&expenses, suffix));
        }

        ExpenseCommands::Edit {
            id,
            date,
            item,
            amount,
            category,
            spender,
        } => {
            let updates: Vec<ExpenseUpdate> = [
                date.map(ExpenseUpdate::Date),
                item.map(ExpenseUpdate::Item),
                amount.map(ExpenseUpdate::Amount),
                category.map(ExpenseUpdate::Category),
                spender.map(ExpenseUpdate::Spender),
            ]
            .into_iter()
            .flatten()
            .collect();

            if updates.is_empty() {
                return Err(LedgerError::Validation(
                    "Nothing to change: pass at least one of --date, --item, --amount, --category, --spender".into(),
                ));
            }

            let expense = service.update(id, &updates)?;
            println!("Updated: {}", format_expense_line(&expense, suffix));
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.get(id)?;
            service.delete(id)?;
            println!("Deleted: {}", format_expense_line(&expense, suffix));
        }

        ExpenseCommands::Import {
            file,
            date,
            dry_run,
        } => {
            let reply = read_reply(&file)?;
            let entries = parse_extraction(
                &reply,
                date.unwrap_or_else(|| Local::now().date_naive()),
                storage.unclassified_category(),
            )?;

            if entries.is_empty() {
                println!("Nothing to import.");
                return Ok(());
            }

            if dry_run {
                println!("Would import {} expense(s):", entries.len());
                for entry in &entries {
                    println!(
                        "  {} {} {} [{}, {}]",
                        entry.date,
                        entry.item,
                        entry.amount.format_with_suffix(suffix),
                        entry.category,
                        entry.spender
                    );
                }
                return Ok(());
            }

            let ids = service.add_batch(entries)?;
            println!("Imported {} expense(s).", ids.len());
        }
    }

    Ok(())
}

fn read_reply(file: &str) -> LedgerResult<String> {
    if file == "-" {
        let mut reply = String::new();
        std::io::stdin()
            .read_to_string(&mut reply)
            .map_err(|e| LedgerError::Import(format!("Failed to read stdin: {}", e)))?;
        Ok(reply)
    } else {
        std::fs::read_to_string(file)
            .map_err(|e| LedgerError::Import(format!("Failed to read {}: {}", file, e)))
    }
}
