//! CLI module — Clap argument parser, output helpers, and command
//! implementations.
//!
//! This is the collaborator layer on top of the core: it talks to the
//! session through `SessionController`/`SessionStore` accessors only and
//! never touches the codec or vault files directly.

pub mod clipboard;
pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{CredVaultError, Result};

/// Minimum passphrase length to prevent trivially weak passphrases.
const MIN_PASSPHRASE_LEN: usize = 8;

/// CredVault CLI: interactive encrypted vault for website credentials.
#[derive(Parser)]
#[command(
    name = "credvault",
    about = "Interactive encrypted vault for website credentials",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault name to operate on (default: from config)
    #[arg(short = 'n', long, global = true)]
    pub vault: Option<String>,

    /// Directory holding vault files (default: per-user data directory)
    #[arg(long, global = true)]
    pub vault_dir: Option<PathBuf>,

    /// Path to the config file (default: per-user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new empty vault
    Init,

    /// Unlock a vault and start an interactive session
    Open,

    /// Generate a random password without opening a vault
    Generate {
        /// Password length (default: from config)
        #[arg(short, long)]
        length: Option<usize>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from the configured path, applying CLI overrides and
/// reporting anything noteworthy (materialized file, unknown keys).
///
/// Returns the settings together with the path they live at, so
/// commands that change a setting can write it back.
pub fn load_settings(cli: &Cli) -> Result<(Settings, PathBuf)> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Settings::default_path()?,
    };

    let outcome = Settings::load_from(&config_path)?;
    if outcome.materialized {
        output::info(&format!(
            "Created config with defaults at {}",
            config_path.display()
        ));
    }
    for key in &outcome.unknown_keys {
        output::warning(&format!(
            "Ignoring unknown config key '{key}' in {}",
            config_path.display()
        ));
    }

    let mut settings = outcome.settings;
    if let Some(dir) = &cli.vault_dir {
        settings.vault_dir = Some(dir.clone());
    }

    Ok((settings, config_path))
}

/// Build the full path to the vault file selected by CLI args + config.
pub fn resolve_vault_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let name = cli.vault.as_deref().unwrap_or(&settings.default_vault);
    validate_vault_name(name)?;
    settings.vault_path(name)
}

/// Get the master passphrase, trying in order:
/// 1. `CREDVAULT_PASSPHRASE` env var (scripted use)
/// 2. Interactive prompt
///
/// An empty passphrase counts as the user aborting.
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on
/// drop.
pub fn prompt_passphrase(prompt: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDVAULT_PASSPHRASE") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| CredVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;

    if pw.is_empty() {
        return Err(CredVaultError::UserCancelled);
    }
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase with confirmation (vault creation and
/// rekey).  Also respects `CREDVAULT_PASSPHRASE` for scripted use.
/// Enforces a minimum length.
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on
/// drop.
pub fn prompt_new_passphrase(prompt: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDVAULT_PASSPHRASE") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSPHRASE_LEN {
                return Err(CredVaultError::CommandFailed(format!(
                    "passphrase must be at least {MIN_PASSPHRASE_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let passphrase = dialoguer::Password::new()
            .with_prompt(prompt)
            .with_confirmation("Confirm passphrase", "Passphrases do not match, try again")
            .interact()
            .map_err(|e| CredVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;

        if passphrase.len() < MIN_PASSPHRASE_LEN {
            output::warning(&format!(
                "Passphrase must be at least {MIN_PASSPHRASE_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(passphrase));
    }
}

/// Validate that a vault name is safe and sensible.
///
/// Allowed: lowercase letters, digits, hyphens. Must not be empty
/// or start/end with a hyphen. Max length 64 characters.
/// This prevents accidental typos from silently creating new vault files.
pub fn validate_vault_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CredVaultError::ConfigError(
            "vault name cannot be empty".into(),
        ));
    }

    if name.len() > 64 {
        return Err(CredVaultError::ConfigError(
            "vault name cannot exceed 64 characters".into(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CredVaultError::ConfigError(format!(
            "vault name '{name}' is invalid — only lowercase letters, digits, and hyphens are allowed"
        )));
    }

    if name.starts_with('-') || name.ends_with('-') {
        return Err(CredVaultError::ConfigError(format!(
            "vault name '{name}' cannot start or end with a hyphen"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_vault_names() {
        assert!(validate_vault_name("main").is_ok());
        assert!(validate_vault_name("work").is_ok());
        assert!(validate_vault_name("personal-2024").is_ok());
        assert!(validate_vault_name("v2").is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(validate_vault_name("").is_err());
    }

    #[test]
    fn rejects_uppercase() {
        assert!(validate_vault_name("Main").is_err());
        assert!(validate_vault_name("WORK").is_err());
    }

    #[test]
    fn rejects_special_chars() {
        assert!(validate_vault_name("main.test").is_err());
        assert!(validate_vault_name("main/test").is_err());
        assert!(validate_vault_name("main test").is_err());
        assert!(validate_vault_name("main_test").is_err());
    }

    #[test]
    fn rejects_leading_trailing_hyphens() {
        assert!(validate_vault_name("-main").is_err());
        assert!(validate_vault_name("main-").is_err());
    }

    #[test]
    fn rejects_too_long_name() {
        let long_name = "a".repeat(65);
        assert!(validate_vault_name(&long_name).is_err());
    }
}
