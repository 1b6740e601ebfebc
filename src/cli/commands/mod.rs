//! Command implementations — the `init`/`open`/`generate` subcommands
//! and the menu actions of the interactive session.

pub mod add;
pub mod copy;
pub mod delete;
pub mod edit;
pub mod generate;
pub mod init;
pub mod list;
pub mod open;
pub mod rekey;
pub mod save;
pub mod search;
pub mod switch;

use dialoguer::Select;

use crate::cli::output;
use crate::errors::{CredVaultError, Result};
use crate::session::SessionStore;

/// Map a prompt failure (Ctrl-C, closed terminal) to a cancellation.
pub(crate) fn cancelled<E>(_: E) -> CredVaultError {
    CredVaultError::UserCancelled
}

/// Trim free-form input; empty becomes `None` so absent fields are
/// omitted rather than stored as empty strings.
pub(crate) fn optional(input: String) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Pick an entry by index from a labelled list.
pub(crate) fn select_entry(store: &SessionStore, prompt: &str) -> Result<usize> {
    if store.is_empty() {
        return Err(CredVaultError::CommandFailed(
            "the vault has no entries yet".into(),
        ));
    }

    let labels: Vec<String> = store
        .entries()
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{i}: {} ({})", e.website, output::identity(e)))
        .collect();

    Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()
        .map_err(cancelled)
}
