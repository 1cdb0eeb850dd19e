//! Database file export
//!
//! Writes a consistent snapshot of the ledger database to another path.

use std::path::Path;

use crate::error::{LedgerError, LedgerResult};
use crate::storage::Storage;

/// Copy the whole ledger database to `dest`
///
/// An existing file at `dest` is replaced. Copying onto the live database
/// itself is refused.
pub fn copy_database(storage: &Storage, dest: &Path) -> LedgerResult<()> {
    let source = storage.database().path();
    if dest == source {
        return Err(LedgerError::Export(
            "Destination is the ledger database itself".into(),
        ));
    }

    storage.database().copy_to(dest)?;
    tracing::info!(dest = %dest.display(), "Exported database copy");
    Ok(())
}
