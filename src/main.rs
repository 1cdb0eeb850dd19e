use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use household_ledger::audit::AuditLogger;
use household_ledger::cli::{
    handle_budget_command, handle_category_command, handle_expense_command,
    handle_export_command, handle_fixed_command, handle_report_command,
};
use household_ledger::config::{LedgerPaths, Settings};
use household_ledger::services::{CategoryService, ExpenseService};
use household_ledger::storage::Storage;

/// Environment variable holding the log filter (e.g. "debug")
const LOG_ENV: &str = "LEDGER_LOG";

#[derive(Parser)]
#[command(
    name = "ledger",
    author = "Kaylee Beyene",
    version,
    about = "Household expense ledger",
    long_about = "A household expense ledger backed by a single SQLite file. \
                  Record expenses per family member, keep recurring bills, \
                  set category budgets and see monthly trends."
)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the ledger in the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// List months that have expenses
    Months,

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(household_ledger::cli::ExpenseCommands),

    /// Recurring monthly expense commands
    #[command(subcommand)]
    Fixed(household_ledger::cli::FixedCommands),

    /// Budget commands
    #[command(subcommand)]
    Budget(household_ledger::cli::BudgetCommands),

    /// Category commands
    #[command(subcommand)]
    Category(household_ledger::cli::CategoryCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(household_ledger::cli::ReportCommands),

    /// Export expenses or the database
    #[command(subcommand)]
    Export(household_ledger::cli::ExportCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("ledger - household expense ledger");
        println!();
        println!("Run 'ledger --help' for usage information.");
        println!("Run 'ledger init' to set up a ledger in this directory.");
        return Ok(());
    };

    if let Commands::History { limit } = command {
        let audit = AuditLogger::new(paths.audit_log());
        let entries = audit.recent(limit)?;
        if entries.is_empty() {
            println!("No changes recorded.");
        }
        for entry in entries {
            println!("{}", entry);
        }
        return Ok(());
    }

    // Opening storage creates and migrates the database as needed
    let storage = Storage::open(paths.clone(), settings.clone())?;

    match command {
        Commands::Init => {
            settings.save(&paths)?;
            println!("Ledger ready at: {}", paths.base_dir().display());
            println!();
            println!("Categories:");
            for group in &settings.taxonomy.groups {
                println!(
                    "  {:<14} {}",
                    group.consumption_type.to_string(),
                    group.categories.join(", ")
                );
            }
            println!("  {:<14} {}", "fallback", settings.unclassified_category);
            println!();
            println!(
                "{} categories available. Run 'ledger category list' to see them.",
                CategoryService::new(&storage).names().len()
            );
        }
        Commands::Config => {
            println!("Household Ledger Configuration");
            println!("==============================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Database:       {}", paths.database_file().display());
            println!("Settings:       {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency suffix:     {}", settings.currency_suffix);
            println!("  Default spender:     {}", settings.default_spender);
            println!("  Fallback category:   {}", settings.unclassified_category);
        }
        Commands::Months => {
            let months = ExpenseService::new(&storage).months();
            if months.is_empty() {
                println!("No expenses recorded yet.");
            }
            for month in months {
                println!("{}", month);
            }
        }
        Commands::Expense(cmd) => handle_expense_command(&storage, cmd)?,
        Commands::Fixed(cmd) => handle_fixed_command(&storage, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&storage, cmd)?,
        Commands::Category(cmd) => handle_category_command(&storage, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, cmd)?,
        Commands::History { .. } => {}
    }

    Ok(())
}
