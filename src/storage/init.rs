//! Storage initialization
//!
//! Runs the schema setup and seeds the category table from the configured
//! taxonomy.

use rusqlite::{params, Connection};

use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::ConsumptionType;

use super::schema::initialize_schema;

/// What seeding did to the category table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Fresh table: this many categories were inserted
    Seeded(usize),
    /// Existing table: this many rows had their consumption type backfilled
    Backfilled(usize),
}

/// Prepare a database for use: schema, migrations and category seed
pub fn initialize_storage(conn: &Connection, settings: &Settings) -> LedgerResult<SeedOutcome> {
    initialize_schema(conn)?;
    seed_categories(conn, settings)
}

/// Seed or backfill the category table
///
/// An empty table receives the whole taxonomy plus the unclassified
/// category. Otherwise only rows without a consumption type are touched, so
/// types set by the user survive.
pub fn seed_categories(conn: &Connection, settings: &Settings) -> LedgerResult<SeedOutcome> {
    let tx = conn.unchecked_transaction()?;
    let unclassified = settings.unclassified_category.as_str();

    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;

    let outcome = if existing == 0 {
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO categories (name, is_default, consumption_type)
                 VALUES (?1, 1, ?2)",
            )?;
            for (name, consumption_type) in settings.taxonomy.entries() {
                inserted += stmt.execute(params![name, consumption_type.as_str()])?;
            }
            inserted += stmt.execute(params![
                unclassified,
                ConsumptionType::Unclassified.as_str()
            ])?;
        }
        tracing::info!(count = inserted, "Seeded default categories");
        SeedOutcome::Seeded(inserted)
    } else {
        let mut backfilled = 0;
        {
            let mut stmt = tx.prepare(
                "UPDATE categories SET consumption_type = ?1
                 WHERE name = ?2 AND (consumption_type IS NULL OR consumption_type = '')",
            )?;
            for (name, consumption_type) in settings.taxonomy.entries() {
                backfilled += stmt.execute(params![consumption_type.as_str(), name])?;
            }
        }
        backfilled += tx.execute(
            "UPDATE categories SET consumption_type = ?1
             WHERE consumption_type IS NULL OR consumption_type = ''",
            [ConsumptionType::Unclassified.as_str()],
        )?;
        tx.execute(
            "INSERT OR IGNORE INTO categories (name, is_default, consumption_type)
             VALUES (?1, 1, ?2)",
            params![unclassified, ConsumptionType::Unclassified.as_str()],
        )?;
        if backfilled > 0 {
            tracing::info!(count = backfilled, "Backfilled category consumption types");
        }
        SeedOutcome::Backfilled(backfilled)
    };

    let orphaned = tx.execute(
        "UPDATE expenses SET category = ?1 WHERE category IS NULL OR category = ''",
        [unclassified],
    )?;
    if orphaned > 0 {
        tracing::warn!(count = orphaned, "Moved expenses without a category to {}", unclassified);
    }

    tx.commit()?;
    Ok(outcome)
}
