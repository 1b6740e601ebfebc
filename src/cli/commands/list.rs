//! List entries — display the collection in a table.

use crate::cli::output;
use crate::errors::Result;
use crate::session::SessionStore;
use crate::vault::CredentialEntry;

/// Show every entry with its session index.
pub fn execute(store: &SessionStore) -> Result<()> {
    if store.is_empty() {
        output::info("The vault is empty.");
        output::tip("Choose 'Add entry' to store your first credential.");
        return Ok(());
    }

    let rows: Vec<(usize, &CredentialEntry)> = store.entries().iter().enumerate().collect();
    output::print_entries_table(&rows);

    Ok(())
}
