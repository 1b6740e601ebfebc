//! Delete entry — remove one entry from the collection.

use dialoguer::Confirm;

use crate::cli::commands::{cancelled, select_entry};
use crate::cli::output;
use crate::errors::{CredVaultError, Result};
use crate::session::SessionStore;

/// Remove the selected entry.  Later entries shift down one index.
pub fn execute(store: &mut SessionStore) -> Result<()> {
    let index = select_entry(store, "Delete which entry?")?;
    let website = store.entries()[index].website.clone();

    let confirmed = Confirm::new()
        .with_prompt(format!("Delete '{website}'?"))
        .default(false)
        .interact()
        .map_err(cancelled)?;
    if !confirmed {
        return Err(CredVaultError::UserCancelled);
    }

    let mut next = store.entries().to_vec();
    next.remove(index);
    store.replace_all(next)?;

    output::success(&format!("Deleted '{website}' ({} remaining)", store.len()));
    Ok(())
}
