//! Export CLI commands

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::export::{copy_database, write_expenses_csv};
use crate::models::{MonthFilter, SpenderFilter};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export expenses as CSV
    Csv {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Month (YYYY-MM) or "all"
        #[arg(short, long, default_value = "all")]
        month: MonthFilter,
        /// Spender or "all"
        #[arg(short, long, default_value = "all")]
        spender: SpenderFilter,
    },

    /// Copy the whole database file
    Db {
        /// Destination path
        dest: PathBuf,
    },
}

/// Handle an export command
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Csv {
            output,
            month,
            spender,
        } => {
            // Read errors abort the export instead of writing an empty file
            let expenses = storage.expenses.load(month, spender)?;

            match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| {
                        LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
                    })?;
                    write_expenses_csv(BufWriter::new(file), &expenses)?;
                    eprintln!("Exported {} expense(s) to {}", expenses.len(), path.display());
                }
                None => write_expenses_csv(io::stdout().lock(), &expenses)?,
            }
        }

        ExportCommands::Db { dest } => {
            copy_database(storage, &dest)?;
            println!("Database copied to {}", dest.display());
        }
    }

    Ok(())
}
