//! `credvault open` — unlock a vault and run the interactive session.
//!
//! The session lifecycle lives here: exactly one of unlock /
//! initialize-empty runs at the start (chosen by whether the vault file
//! exists), the menu loop mutates the collection through the session
//! store, and every way out — quit, prompt interruption, mid-loop error
//! — funnels into the controller's single close path.

use std::path::Path;

use dialoguer::Select;

use crate::cli::commands;
use crate::cli::output;
use crate::cli::{
    load_settings, prompt_new_passphrase, prompt_passphrase, resolve_vault_path, Cli,
};
use crate::config::Settings;
use crate::errors::{CredVaultError, Result};
use crate::session::SessionController;

const MENU: &[&str] = &[
    "List entries",
    "Add entry",
    "Edit entry",
    "Delete entry",
    "Search",
    "Copy password",
    "Generate password",
    "Change master passphrase",
    "Switch vault",
    "Save now",
    "Quit",
];

/// Execute the `open` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (mut settings, config_path) = load_settings(cli)?;
    let vault_path = resolve_vault_path(cli, &settings)?;

    let mut session = if vault_path.exists() {
        let passphrase = prompt_passphrase("Master passphrase")?;
        let session = SessionController::unlock(&vault_path, &passphrase)?;
        output::success(&format!(
            "Unlocked {} ({} entries)",
            vault_path.display(),
            session.store()?.len()
        ));
        session
    } else {
        output::info(&format!(
            "No vault at {} — creating a new one.",
            vault_path.display()
        ));
        let passphrase = prompt_new_passphrase("Choose master passphrase")?;
        SessionController::initialize_empty(&vault_path, &passphrase, &settings.argon2_params())
    };

    let loop_result = menu_loop(&mut session, &mut settings, &config_path);

    // The one close: persists exactly once and scrubs, no matter how the
    // loop ended.
    let close_result = session.close();
    match &close_result {
        Ok(()) => output::success("Vault saved."),
        Err(e) => output::error(&format!("{e} — recent changes may be lost")),
    }

    match loop_result {
        // Interrupting a prompt ends the session like a quit.
        Err(CredVaultError::UserCancelled) => {}
        other => other?,
    }
    close_result
}

/// The interactive loop: prompt, act, repeat until quit or interruption.
///
/// Action-level errors are reported and the loop continues — a failed
/// rekey or rejected entry never ends the session.  Only a failure of
/// the menu prompt itself (interruption) propagates out.
fn menu_loop(
    session: &mut SessionController,
    settings: &mut Settings,
    config_path: &Path,
) -> Result<()> {
    loop {
        println!();
        let choice = Select::new()
            .with_prompt("credvault")
            .items(MENU)
            .default(0)
            .interact()
            .map_err(commands::cancelled)?;

        let result = match choice {
            0 => commands::list::execute(session.store()?),
            1 => commands::add::execute(session.store_mut()?, settings),
            2 => commands::edit::execute(session.store_mut()?, settings),
            3 => commands::delete::execute(session.store_mut()?),
            4 => commands::search::execute(session.store()?, settings),
            5 => commands::copy::execute(session.store()?, settings),
            6 => commands::generate::menu_action(settings),
            7 => commands::rekey::execute(session.store_mut()?),
            8 => commands::switch::execute(session.store_mut()?, settings, config_path),
            9 => commands::save::execute(session.store()?),
            _ => return Ok(()),
        };

        if let Err(e) = result {
            match e {
                CredVaultError::UserCancelled => output::info("Cancelled."),
                other => output::error(&other.user_message()),
            }
        }
    }
}
