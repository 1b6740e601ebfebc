//! Edit entry — re-prompt fields for an existing entry and replace it.

use chrono::Utc;
use dialoguer::{Input, Password, Select};

use crate::cli::commands::{cancelled, optional, select_entry};
use crate::cli::output;
use crate::config::Settings;
use crate::errors::Result;
use crate::generator::{generate_password, GeneratorOptions};
use crate::session::SessionStore;
use crate::vault::CredentialEntry;

/// Prompt updated fields for one entry (addressed by session index) and
/// hand the modified collection to the store.
pub fn execute(store: &mut SessionStore, settings: &Settings) -> Result<()> {
    let index = select_entry(store, "Edit which entry?")?;
    let current = store.entries()[index].clone();

    let website: String = Input::new()
        .with_prompt("Website")
        .default(current.website.clone())
        .interact_text()
        .map_err(cancelled)?;

    let mut updated = if current.logged_in_via.is_some() {
        edit_federated(website, &current)?
    } else {
        edit_direct(website, &current)?
    };
    updated.password = edit_password(current.password.clone(), settings)?;
    updated.added = Utc::now();

    let mut next = store.entries().to_vec();
    next[index] = updated;
    store.replace_all(next)?;

    output::success(&format!("Updated entry #{index}."));
    Ok(())
}

fn edit_direct(website: String, current: &CredentialEntry) -> Result<CredentialEntry> {
    let email = prompt_optional("Email (empty to clear)", current.email.clone())?;
    let username = prompt_optional("Username (empty to clear)", current.username.clone())?;
    let recovery_email =
        prompt_optional("Recovery email (empty to clear)", current.recovery_email.clone())?;

    Ok(CredentialEntry {
        website: website.trim().to_string(),
        email,
        username,
        password: None,
        recovery_email,
        logged_in_via: None,
        linked_email: None,
        added: current.added,
    })
}

fn edit_federated(website: String, current: &CredentialEntry) -> Result<CredentialEntry> {
    let provider: String = Input::new()
        .with_prompt("Login provider")
        .default(current.logged_in_via.clone().unwrap_or_default())
        .interact_text()
        .map_err(cancelled)?;

    let linked_email: String = Input::new()
        .with_prompt("Provider account email")
        .default(current.linked_email.clone().unwrap_or_default())
        .interact_text()
        .map_err(cancelled)?;

    let username = prompt_optional("Username (empty to clear)", current.username.clone())?;

    Ok(CredentialEntry {
        website: website.trim().to_string(),
        email: None,
        username,
        password: None,
        recovery_email: None,
        logged_in_via: Some(provider.trim().to_string()),
        linked_email: Some(linked_email.trim().to_string()),
        added: current.added,
    })
}

fn edit_password(current: Option<String>, settings: &Settings) -> Result<Option<String>> {
    let choice = Select::new()
        .with_prompt("Password")
        .items(&["Keep current", "Enter new", "Generate new", "Remove"])
        .default(0)
        .interact()
        .map_err(cancelled)?;

    match choice {
        1 => Ok(optional(
            Password::new()
                .with_prompt("New password")
                .allow_empty_password(true)
                .interact()
                .map_err(cancelled)?,
        )),
        2 => {
            let password = generate_password(&GeneratorOptions::from_settings(settings))?;
            println!("{password}");
            output::tip("Shown once — use 'Copy password' later to retrieve it.");
            Ok(Some(password))
        }
        3 => Ok(None),
        _ => Ok(current),
    }
}

fn prompt_optional(prompt: &str, current: Option<String>) -> Result<Option<String>> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(value) = current {
        input = input.default(value);
    }
    Ok(optional(input.interact_text().map_err(cancelled)?))
}
