//! Change master passphrase — re-seal the vault under a new passphrase.
//!
//! The change is persisted immediately, not deferred to session end:
//! the old passphrase must stop working the instant the user confirms,
//! independent of whether the session later ends cleanly.

use crate::cli::output;
use crate::cli::{prompt_new_passphrase, prompt_passphrase};
use crate::errors::{CredVaultError, Result};
use crate::session::SessionStore;

/// Re-authenticate, then rekey.  All-or-nothing: a failure leaves the
/// old passphrase and the vault file untouched.
pub fn execute(store: &mut SessionStore) -> Result<()> {
    // An unattended open session must not be enough to change the
    // passphrase — require the current one again.
    let current = prompt_passphrase("Current passphrase")?;
    if !store.verify_passphrase(&current) {
        return Err(CredVaultError::AuthenticationFailed);
    }

    let new_passphrase = prompt_new_passphrase("New master passphrase")?;
    store.rekey(&new_passphrase)?;

    output::success("Passphrase changed — the old passphrase no longer opens this vault.");
    Ok(())
}
