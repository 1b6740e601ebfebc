//! The session store: single authoritative holder of the decrypted
//! credential collection for the lifetime of a run.
//!
//! A `SessionStore` is only obtainable through `unlock` (decrypt an
//! existing container) or `initialize_empty` (first run, no vault file
//! yet), so holding one means the session is authenticated.  Every read
//! and write goes through it, which is what lets the controller's exit
//! hook re-seal a consistent snapshot no matter how the process ends.

use std::path::{Path, PathBuf};

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::kdf::Argon2Params;
use crate::errors::{CredVaultError, Result};
use crate::vault::codec;
use crate::vault::entry::{validate_collection, CredentialEntry};

/// In-memory session state: vault path, passphrase, and the decrypted
/// collection.  Mutated only through `replace_all`; persisted only
/// through `persist`/`rekey`.
#[derive(Debug)]
pub struct SessionStore {
    /// Path to the `.vault` file on disk.  Changes only via `switch_vault`.
    vault_path: PathBuf,

    /// The master passphrase, wiped from memory on drop.
    passphrase: Zeroizing<String>,

    /// Argon2 params used for every seal in this session (taken from the
    /// container header on unlock, from settings on first run).
    kdf_params: Argon2Params,

    /// The decrypted collection, in insertion order.
    entries: Vec<CredentialEntry>,
}

impl SessionStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Decrypt the container at `vault_path` and start a session.
    ///
    /// A failed decryption — wrong passphrase or tampered bytes, the two
    /// are not distinguishable — surfaces as `AuthenticationFailed`.  A
    /// payload that decrypts but is not a valid collection surfaces as
    /// `MalformedCollection`: real data is never silently replaced by an
    /// empty collection.
    pub fn unlock(vault_path: &Path, passphrase: &str) -> Result<Self> {
        let (header, mut plaintext) =
            match codec::open_from_file(vault_path, passphrase.as_bytes()) {
                Ok(parts) => parts,
                Err(CredVaultError::DecryptionFailed) => {
                    return Err(CredVaultError::AuthenticationFailed)
                }
                Err(e) => return Err(e),
            };

        let parsed: std::result::Result<Vec<CredentialEntry>, _> =
            serde_json::from_slice(&plaintext);
        plaintext.zeroize();

        let entries =
            parsed.map_err(|e| CredVaultError::MalformedCollection(format!("payload JSON: {e}")))?;
        validate_collection(&entries)
            .map_err(|e| CredVaultError::MalformedCollection(e.to_string()))?;

        Ok(Self {
            vault_path: vault_path.to_path_buf(),
            passphrase: Zeroizing::new(passphrase.to_string()),
            kdf_params: header.kdf.into(),
            entries,
        })
    }

    /// Start a session with an empty collection — used when no vault file
    /// exists yet.  Nothing is written to disk; the first write happens
    /// at persist/close, the same as any other mutation.
    pub fn initialize_empty(
        vault_path: &Path,
        passphrase: &str,
        kdf_params: &Argon2Params,
    ) -> Self {
        Self {
            vault_path: vault_path.to_path_buf(),
            passphrase: Zeroizing::new(passphrase.to_string()),
            kdf_params: *kdf_params,
            entries: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Collection access
    // ------------------------------------------------------------------

    /// Read-only snapshot of the collection.
    pub fn entries(&self) -> &[CredentialEntry] {
        &self.entries
    }

    /// Atomic full replacement — the only mutation primitive.  The CRUD
    /// layer computes the next collection value and hands it over here.
    ///
    /// Every entry is validated; one bad entry rejects the whole batch
    /// and leaves the current collection untouched.
    pub fn replace_all(&mut self, new_entries: Vec<CredentialEntry>) -> Result<()> {
        validate_collection(&new_entries)?;
        self.entries = new_entries;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Passphrase operations
    // ------------------------------------------------------------------

    /// Constant-time check of a candidate against the session passphrase.
    ///
    /// The re-authentication gate the UI must pass before `rekey`.
    pub fn verify_passphrase(&self, candidate: &str) -> bool {
        self.passphrase
            .as_bytes()
            .ct_eq(candidate.as_bytes())
            .into()
    }

    /// Re-seal the current collection under `new_passphrase` and persist
    /// immediately — a passphrase change is durable the instant the user
    /// confirms it, not deferred to exit.
    ///
    /// All-or-nothing: the in-memory passphrase is only replaced after
    /// the new container is safely on disk, and a failed seal leaves the
    /// old file intact (temp-file-then-rename).
    pub fn rekey(&mut self, new_passphrase: &str) -> Result<()> {
        self.seal_with(new_passphrase)?;
        self.passphrase = Zeroizing::new(new_passphrase.to_string());
        Ok(())
    }

    /// Decrypt a different container and, on success, replace vault path,
    /// passphrase, and collection together as one transition.  Any
    /// failure leaves the current session fully intact.
    pub fn switch_vault(&mut self, new_path: &Path, passphrase: &str) -> Result<()> {
        let candidate = Self::unlock(new_path, passphrase)?;

        for entry in &mut self.entries {
            entry.scrub();
        }
        *self = candidate;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Seal the current collection under the current passphrase and write
    /// it to the current vault path, atomically.
    pub fn persist(&self) -> Result<()> {
        self.seal_with(&self.passphrase)
    }

    fn seal_with(&self, passphrase: &str) -> Result<()> {
        let mut plaintext = serde_json::to_vec(&self.entries)
            .map_err(|e| CredVaultError::SerializationError(format!("collection: {e}")))?;

        let result = codec::seal_to_file(
            &self.vault_path,
            &plaintext,
            passphrase.as_bytes(),
            &self.kdf_params,
        );
        plaintext.zeroize();
        result
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// Best-effort scrub of everything sensitive: every entry field and
    /// the passphrase.  Called by the controller on close.
    pub fn scrub(&mut self) {
        for entry in &mut self.entries {
            entry.scrub();
        }
        self.entries.clear();
        self.passphrase.zeroize();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path of the currently open vault file.
    pub fn vault_path(&self) -> &Path {
        &self.vault_path
    }

    /// Returns the number of entries in the collection.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the collection holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the Argon2 params this session seals with.
    pub fn kdf_params(&self) -> &Argon2Params {
        &self.kdf_params
    }
}
