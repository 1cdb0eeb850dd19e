//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_tree;
use crate::error::LedgerResult;
use crate::models::ConsumptionType;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories (organized by consumption type)
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// essential (needs), discretionary (wants) or unclassified
        #[arg(short = 't', long = "type")]
        consumption_type: ConsumptionType,
    },

    /// Delete a category, moving its expenses to the unclassified category
    Delete {
        /// Category name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> LedgerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_tree(&service.list()));
        }

        CategoryCommands::Add {
            name,
            consumption_type,
        } => {
            let category = service.add(&name, consumption_type)?;
            println!(
                "Created category: {} ({})",
                category.name, category.consumption_type
            );
        }

        CategoryCommands::Delete { name } => {
            let removal = service.delete(&name)?;
            println!("Deleted category: {}", name);
            println!(
                "  Moved {} expense(s) and {} fixed expense(s) to {}",
                removal.expenses,
                removal.fixed_expenses,
                storage.unclassified_category()
            );
            if removal.budget_moved {
                println!("  Budget carried over to {}", storage.unclassified_category());
            }
        }
    }

    Ok(())
}
