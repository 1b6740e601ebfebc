//! Save now — persist the collection without ending the session.

use crate::cli::output;
use crate::errors::Result;
use crate::session::SessionStore;

/// Seal and write the current collection immediately.
pub fn execute(store: &SessionStore) -> Result<()> {
    store.persist()?;
    output::success(&format!("Saved to {}", store.vault_path().display()));
    Ok(())
}
