//! Database schema and migrations
//!
//! Tables are created with `CREATE TABLE IF NOT EXISTS`, then columns added
//! after the first release are backfilled onto older databases with
//! `ALTER TABLE ... ADD COLUMN`. Existing rows are never dropped.

use rusqlite::Connection;

use super::database::column_exists;
use crate::error::LedgerResult;

/// Current schema version, recorded in `PRAGMA user_version`
pub const SCHEMA_VERSION: i32 = 2;

const CREATE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS expenses (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        date        TEXT NOT NULL,
        item        TEXT,
        amount      INTEGER,
        category    TEXT,
        spender     TEXT NOT NULL DEFAULT 'joint',
        created_at  TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS fixed_expenses (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        item        TEXT NOT NULL,
        amount      INTEGER NOT NULL,
        category    TEXT NOT NULL,
        spender     TEXT NOT NULL DEFAULT 'joint',
        payment_day INTEGER NOT NULL,           -- 1-31
        created_at  TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS budgets (
        category    TEXT PRIMARY KEY,
        amount      INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS categories (
        name             TEXT PRIMARY KEY,
        is_default       INTEGER NOT NULL DEFAULT 0,
        consumption_type TEXT                   -- essential | discretionary | unclassified
    );
"#;

const CREATE_INDEXES: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
    CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category);
"#;

/// Columns that older databases may lack: (table, column, definition)
const COLUMN_MIGRATIONS: &[(&str, &str, &str)] = &[
    ("expenses", "spender", "TEXT NOT NULL DEFAULT 'joint'"),
    ("fixed_expenses", "spender", "TEXT NOT NULL DEFAULT 'joint'"),
    ("categories", "is_default", "INTEGER NOT NULL DEFAULT 0"),
    ("categories", "consumption_type", "TEXT"),
];

/// Create missing tables and add missing columns
///
/// Idempotent; safe to run on every process start.
pub fn initialize_schema(conn: &Connection) -> LedgerResult<()> {
    let current_version = get_schema_version(conn)?;

    tracing::debug!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database schema"
    );

    conn.execute_batch(CREATE_TABLES)?;

    for &(table, column, definition) in COLUMN_MIGRATIONS {
        if !column_exists(conn, table, column)? {
            tracing::info!(table, column, "Adding missing column");
            conn.execute_batch(&format!(
                "ALTER TABLE {} ADD COLUMN {} {}",
                table, column, definition
            ))?;
        }
    }

    conn.execute_batch(CREATE_INDEXES)?;

    if current_version < SCHEMA_VERSION {
        conn.execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))?;
        tracing::info!(
            from = current_version,
            to = SCHEMA_VERSION,
            "Schema migration complete"
        );
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> LedgerResult<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}
