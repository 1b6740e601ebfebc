//! Add entry — prompt for fields and append to the collection.

use chrono::Utc;
use dialoguer::{Confirm, Input, Password, Select};

use crate::cli::commands::{cancelled, optional};
use crate::cli::output;
use crate::config::Settings;
use crate::errors::Result;
use crate::generator::{generate_password, GeneratorOptions};
use crate::session::SessionStore;
use crate::vault::CredentialEntry;

/// Prompt for a new entry and hand the grown collection to the store.
pub fn execute(store: &mut SessionStore, settings: &Settings) -> Result<()> {
    let website: String = Input::new()
        .with_prompt("Website")
        .interact_text()
        .map_err(cancelled)?;

    let federated = Select::new()
        .with_prompt("Login type")
        .items(&["Direct (email/username)", "Federated (via provider)"])
        .default(0)
        .interact()
        .map_err(cancelled)?
        == 1;

    let entry = if federated {
        prompt_federated(website)?
    } else {
        prompt_direct(website, settings)?
    };

    let mut next = store.entries().to_vec();
    next.push(entry);
    store.replace_all(next)?;

    output::success(&format!(
        "Added entry ({} total). Changes are saved when the session ends.",
        store.len()
    ));
    Ok(())
}

fn prompt_direct(website: String, settings: &Settings) -> Result<CredentialEntry> {
    let mut email_input = Input::<String>::new()
        .with_prompt("Email (empty to skip)")
        .allow_empty(true);
    if let Some(prefill) = &settings.default_email {
        email_input = email_input.default(prefill.clone());
    }
    let email = optional(email_input.interact_text().map_err(cancelled)?);

    let mut username_input = Input::<String>::new()
        .with_prompt("Username (empty to skip)")
        .allow_empty(true);
    if let Some(prefill) = &settings.default_username {
        username_input = username_input.default(prefill.clone());
    }
    let username = optional(username_input.interact_text().map_err(cancelled)?);

    let password = prompt_password(settings)?;

    let recovery_email = optional(
        Input::<String>::new()
            .with_prompt("Recovery email (empty to skip)")
            .allow_empty(true)
            .interact_text()
            .map_err(cancelled)?,
    );

    Ok(CredentialEntry {
        website: website.trim().to_string(),
        email,
        username,
        password,
        recovery_email,
        logged_in_via: None,
        linked_email: None,
        added: Utc::now(),
    })
}

fn prompt_federated(website: String) -> Result<CredentialEntry> {
    let provider: String = Input::new()
        .with_prompt("Login provider (e.g. google)")
        .interact_text()
        .map_err(cancelled)?;

    let linked_email: String = Input::new()
        .with_prompt("Provider account email")
        .interact_text()
        .map_err(cancelled)?;

    let username = optional(
        Input::<String>::new()
            .with_prompt("Username (empty to skip)")
            .allow_empty(true)
            .interact_text()
            .map_err(cancelled)?,
    );

    // Purely federated logins often have no local secret at all.
    let password = if Confirm::new()
        .with_prompt("Store a local password too?")
        .default(false)
        .interact()
        .map_err(cancelled)?
    {
        optional(
            Password::new()
                .with_prompt("Password")
                .allow_empty_password(true)
                .interact()
                .map_err(cancelled)?,
        )
    } else {
        None
    };

    Ok(CredentialEntry {
        website: website.trim().to_string(),
        email: None,
        username,
        password,
        recovery_email: None,
        logged_in_via: Some(provider.trim().to_string()),
        linked_email: Some(linked_email.trim().to_string()),
        added: Utc::now(),
    })
}

fn prompt_password(settings: &Settings) -> Result<Option<String>> {
    if Confirm::new()
        .with_prompt("Generate a password?")
        .default(true)
        .interact()
        .map_err(cancelled)?
    {
        let password = generate_password(&GeneratorOptions::from_settings(settings))?;
        println!("{password}");
        output::tip("Shown once — use 'Copy password' later to retrieve it.");
        Ok(Some(password))
    } else {
        Ok(optional(
            Password::new()
                .with_prompt("Password (empty to skip)")
                .allow_empty_password(true)
                .interact()
                .map_err(cancelled)?,
        ))
    }
}
