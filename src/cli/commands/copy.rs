//! Copy password — put one entry's password on the clipboard.

use crate::cli::commands::select_entry;
use crate::cli::{clipboard, output};
use crate::config::Settings;
use crate::errors::Result;
use crate::session::SessionStore;

/// Copy the selected entry's password, clearing the clipboard after the
/// configured delay.
pub fn execute(store: &SessionStore, settings: &Settings) -> Result<()> {
    let index = select_entry(store, "Copy password of which entry?")?;
    let entry = &store.entries()[index];

    match &entry.password {
        Some(password) => {
            clipboard::copy_with_clear(password, settings.clipboard_clear_secs)?;
            if settings.clipboard_clear_secs > 0 {
                output::success(&format!(
                    "Password copied — clipboard clears in {}s",
                    settings.clipboard_clear_secs
                ));
            } else {
                output::success("Password copied");
            }
        }
        None => output::info(&format!("'{}' stores no local password", entry.website)),
    }

    Ok(())
}
