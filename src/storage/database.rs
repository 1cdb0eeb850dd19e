//! SQLite connection handle
//!
//! The ledger never holds a connection open: every operation calls
//! [`Database::connect`], runs its statements, commits and drops the
//! connection.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;

use crate::error::{LedgerError, LedgerResult};

/// How long a connection waits on SQLite's writer lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Location of the ledger database
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a short-lived connection
    pub fn connect(&self) -> LedgerResult<Connection> {
        let conn = Connection::open(&self.path).map_err(|e| {
            LedgerError::Database(format!(
                "Failed to open database at '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Write a consistent copy of the database to `dest`
    pub fn copy_to(&self, dest: &Path) -> LedgerResult<()> {
        if dest.exists() {
            std::fs::remove_file(dest).map_err(|e| {
                LedgerError::Export(format!("Failed to replace {}: {}", dest.display(), e))
            })?;
        }

        let dest_str = dest.to_str().ok_or_else(|| {
            LedgerError::Export(format!("Path is not valid UTF-8: {}", dest.display()))
        })?;

        let conn = self.connect()?;
        conn.execute("VACUUM INTO ?1", [dest_str])
            .map_err(|e| LedgerError::Export(format!("Failed to copy database: {}", e)))?;
        Ok(())
    }
}

/// Check if a table exists
pub fn table_exists(conn: &Connection, table: &str) -> LedgerResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Check if a table has a column
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> LedgerResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
        [table, column],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
