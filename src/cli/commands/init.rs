//! `credvault init` — create a new empty vault.

use crate::cli::output;
use crate::cli::{load_settings, prompt_new_passphrase, resolve_vault_path, Cli};
use crate::errors::{CredVaultError, Result};
use crate::session::SessionController;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (settings, _config_path) = load_settings(cli)?;
    let vault_path = resolve_vault_path(cli, &settings)?;

    if vault_path.exists() {
        output::tip("Run `credvault open` to start a session on the existing vault.");
        return Err(CredVaultError::VaultAlreadyExists(vault_path));
    }

    let passphrase = prompt_new_passphrase("Choose master passphrase")?;

    // The container is written by the close path — the same persist that
    // every session ends with.
    let mut session =
        SessionController::initialize_empty(&vault_path, &passphrase, &settings.argon2_params());
    session.close()?;

    output::success(&format!("Vault created at {}", vault_path.display()));
    output::tip("Run `credvault open` to add your first entry.");

    Ok(())
}
