//! `credvault generate` — random password generation, also available as
//! a menu action inside a session.

use dialoguer::Confirm;

use crate::cli::commands::cancelled;
use crate::cli::{clipboard, load_settings, output, Cli};
use crate::config::Settings;
use crate::errors::Result;
use crate::generator::{generate_password, GeneratorOptions};

/// Execute the `generate` subcommand: print one password to stdout.
pub fn execute(cli: &Cli, length: Option<usize>) -> Result<()> {
    let (settings, _config_path) = load_settings(cli)?;

    let mut opts = GeneratorOptions::from_settings(&settings);
    if let Some(length) = length {
        opts.length = length;
    }

    let password = generate_password(&opts)?;
    println!("{password}");
    Ok(())
}

/// Menu action: generate, show, and offer to copy.
pub fn menu_action(settings: &Settings) -> Result<()> {
    let password = generate_password(&GeneratorOptions::from_settings(settings))?;
    println!("{password}");

    let copy = Confirm::new()
        .with_prompt("Copy to clipboard?")
        .default(true)
        .interact()
        .map_err(cancelled)?;
    if copy {
        clipboard::copy_with_clear(&password, settings.clipboard_clear_secs)?;
        output::success("Copied.");
    }

    Ok(())
}
