//! Switch vault — move the session to a different vault file.

use std::path::Path;

use dialoguer::Input;

use crate::cli::commands::cancelled;
use crate::cli::output;
use crate::cli::{prompt_passphrase, validate_vault_name};
use crate::config::Settings;
use crate::errors::Result;
use crate::session::SessionStore;

/// Unlock another vault and swap the session over to it.
///
/// The current vault is persisted first — a failed save aborts the
/// switch, and a failed unlock of the target leaves the session exactly
/// where it was.  On success the new vault becomes the configured
/// default, so the next run opens it directly.
pub fn execute(
    store: &mut SessionStore,
    settings: &mut Settings,
    config_path: &Path,
) -> Result<()> {
    let name: String = Input::new()
        .with_prompt("Vault name to switch to")
        .interact_text()
        .map_err(cancelled)?;
    let name = name.trim().to_string();
    validate_vault_name(&name)?;

    let new_path = settings.vault_path(&name)?;
    if new_path == store.vault_path() {
        output::info(&format!("Vault '{name}' is already open."));
        return Ok(());
    }

    store.persist()?;

    let passphrase = prompt_passphrase(&format!("Passphrase for '{name}'"))?;
    store.switch_vault(&new_path, &passphrase)?;

    settings.default_vault = name.clone();
    settings.save_to(config_path)?;

    output::success(&format!(
        "Switched to vault '{name}' ({} entries)",
        store.len()
    ));
    Ok(())
}
