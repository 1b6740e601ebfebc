//! The session controller: sequences authentication, session lifetime,
//! and the guaranteed-save-on-exit contract.
//!
//! States are `Unauthenticated → Authenticated → Closed`.  A controller
//! is constructed already-authenticated (via `unlock` or
//! `initialize_empty` — exactly one of the two runs per process start,
//! chosen by whether the vault file exists); the unauthenticated state
//! is the time before construction, during which nothing sensitive is
//! held and nothing is persisted on abort.
//!
//! `close` is the only path to Closed and runs persist-then-scrub
//! exactly once.  A `Drop` backstop routes panics and early returns
//! through the same path, so every termination reason — quit menu
//! choice, prompt interruption, panic — ends in one persist attempt.

use std::path::Path;

use crate::crypto::kdf::Argon2Params;
use crate::errors::{CredVaultError, Result};
use crate::session::store::SessionStore;

/// Owns the session store for the duration of a run and guarantees the
/// exit-time persistence contract.
pub struct SessionController {
    /// `Some` while authenticated, `None` once closed.
    store: Option<SessionStore>,

    /// Set before the persist attempt so the close path can never run
    /// twice, even re-entered from `Drop` after a persist error.
    closed: bool,
}

impl SessionController {
    /// Authenticate against an existing vault file.
    pub fn unlock(vault_path: &Path, passphrase: &str) -> Result<Self> {
        let store = SessionStore::unlock(vault_path, passphrase)?;
        Ok(Self {
            store: Some(store),
            closed: false,
        })
    }

    /// Start a first-run session with an empty collection.  The vault
    /// file is created at the first persist, not here.
    pub fn initialize_empty(
        vault_path: &Path,
        passphrase: &str,
        kdf_params: &Argon2Params,
    ) -> Self {
        Self {
            store: Some(SessionStore::initialize_empty(
                vault_path, passphrase, kdf_params,
            )),
            closed: false,
        }
    }

    /// Returns `true` while the session is open.
    pub fn is_authenticated(&self) -> bool {
        !self.closed && self.store.is_some()
    }

    /// Access the session store.
    pub fn store(&self) -> Result<&SessionStore> {
        self.store.as_ref().ok_or(CredVaultError::SessionClosed)
    }

    /// Mutable access to the session store.
    pub fn store_mut(&mut self) -> Result<&mut SessionStore> {
        self.store.as_mut().ok_or(CredVaultError::SessionClosed)
    }

    /// Close the session: persist the collection exactly once, then
    /// scrub passphrase and entries from memory.
    ///
    /// Idempotent — a second call is a no-op that performs no write.
    /// The persist outcome is always returned so the caller can report
    /// it; silent data loss is the worst failure mode for a vault.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        match self.store.take() {
            Some(mut store) => {
                let result = store.persist();
                store.scrub();
                result
            }
            None => Ok(()),
        }
    }
}

impl Drop for SessionController {
    /// Backstop for abnormal exits (panic, early return past the menu
    /// loop).  Normal code paths call `close` themselves and report the
    /// outcome; here a failure can only go to stderr.
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            eprintln!("credvault: failed to save vault on exit: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::entry::CredentialEntry;
    use chrono::Utc;
    use tempfile::TempDir;

    fn entry(website: &str) -> CredentialEntry {
        CredentialEntry {
            website: website.into(),
            email: Some("me@example.com".into()),
            username: None,
            password: Some("pw".into()),
            recovery_email: None,
            logged_in_via: None,
            linked_email: None,
            added: Utc::now(),
        }
    }

    // Fast KDF settings so tests do not burn 64 MB per derivation.
    fn test_params() -> Argon2Params {
        Argon2Params {
            memory_kib: 8_192,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn close_persists_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.vault");

        let mut ctl = SessionController::initialize_empty(&path, "pw", &test_params());
        ctl.store_mut()
            .unwrap()
            .replace_all(vec![entry("github.com")])
            .unwrap();

        ctl.close().unwrap();
        assert!(path.exists());
        assert!(!ctl.is_authenticated());

        // Overwrite the file with a sentinel: a second close must not
        // re-run the persist and clobber it.
        std::fs::write(&path, b"sentinel").unwrap();
        ctl.close().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"sentinel");
    }

    #[test]
    fn store_access_after_close_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.vault");

        let mut ctl = SessionController::initialize_empty(&path, "pw", &test_params());
        ctl.close().unwrap();

        assert!(ctl.store().is_err());
        assert!(ctl.store_mut().is_err());
    }

    #[test]
    fn drop_persists_unclosed_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.vault");

        {
            let mut ctl = SessionController::initialize_empty(&path, "pw", &test_params());
            ctl.store_mut()
                .unwrap()
                .replace_all(vec![entry("dropped.example")])
                .unwrap();
            // No explicit close — Drop must run the same path.
        }

        assert!(path.exists());
        let reopened = SessionStore::unlock(&path, "pw").unwrap();
        assert_eq!(reopened.entries().len(), 1);
        assert_eq!(reopened.entries()[0].website, "dropped.example");
    }
}
