//! Append-only audit file
//!
//! One JSON object per line. A line that no longer parses (hand edits, an
//! interrupted write) is skipped when reading so `ledger history` still works.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};

use super::entry::AuditEntry;

#[derive(Debug, Clone)]
pub struct AuditLogger {
    path: PathBuf,
}

impl AuditLogger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append one entry
    pub fn append(&self, entry: &AuditEntry) -> LedgerResult<()> {
        let line = serde_json::to_string(entry)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LedgerError::Io(format!("Cannot open {}: {}", self.path.display(), e))
            })?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// The last `limit` entries, oldest first
    pub fn recent(&self, limit: usize) -> LedgerResult<Vec<AuditEntry>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries: Vec<AuditEntry> = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(n, line)| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(line = n + 1, error = %e, "Skipping unreadable audit line");
                    None
                }
            })
            .collect();

        let skip = entries.len().saturating_sub(limit);
        Ok(entries.split_off(skip))
    }
}
