//! Category display formatting
//!
//! Formats categories grouped by consumption type, and budgets.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Budget, Category, ConsumptionType};

/// Format categories as a tree grouped by consumption type
pub fn format_category_tree(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'ledger init' to create default categories.\n"
            .to_string();
    }

    let mut sections = Vec::new();

    for consumption_type in ConsumptionType::all() {
        let members: Vec<&Category> = categories
            .iter()
            .filter(|c| c.consumption_type == *consumption_type)
            .collect();
        if members.is_empty() {
            continue;
        }

        let mut section = format!("{}\n", consumption_type);
        for (i, category) in members.iter().enumerate() {
            let prefix = if i == members.len() - 1 { "└── " } else { "├── " };
            let custom = if category.is_default { "" } else { " (custom)" };
            section.push_str(&format!("  {}{}{}\n", prefix, category.name, custom));
        }
        sections.push(section);
    }

    sections.join("\n")
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Monthly budget")]
    amount: String,
}

/// Format budgets as a table
pub fn format_budget_list(budgets: &[Budget], suffix: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let rows = budgets.iter().map(|b| BudgetRow {
        category: b.category.clone(),
        amount: b.amount.format_with_suffix(suffix),
    });

    format!("{}\n", Table::new(rows).with(Style::rounded()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_groups_by_type() {
        let categories = vec![
            Category::seeded("Living", ConsumptionType::Essential),
            Category::seeded("Shopping", ConsumptionType::Discretionary),
            Category::new("Pets", ConsumptionType::Discretionary),
            Category::seeded("unclassified", ConsumptionType::Unclassified),
        ];

        let tree = format_category_tree(&categories);
        assert_eq!(
            tree,
            "essential\n  └── Living\n\n\
             discretionary\n  ├── Shopping\n  └── Pets (custom)\n\n\
             unclassified\n  └── unclassified\n"
        );
    }

    #[test]
    fn test_empty_tree() {
        assert!(format_category_tree(&[]).starts_with("No categories found."));
    }
}
