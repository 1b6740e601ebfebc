//! Vault module — the credential data model and the encrypted container
//! codec.
//!
//! This module provides:
//! - `CredentialEntry` and collection validation (`entry`)
//! - The sealed envelope format and atomic file wrappers (`codec`)

pub mod codec;
pub mod entry;

// Re-export the most commonly used items.
pub use codec::{StoredKdfParams, VaultHeader};
pub use entry::{validate_collection, CredentialEntry};
