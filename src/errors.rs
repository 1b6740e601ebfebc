use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in CredVault.
#[derive(Debug, Error)]
pub enum CredVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong passphrase or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    // --- Session errors ---
    /// Unlock failed: wrong passphrase or a corrupted container.  The two
    /// cases are deliberately not distinguished in the message shown to
    /// the user.
    #[error("Unlock failed — wrong master passphrase or corrupted vault")]
    AuthenticationFailed,

    /// Decryption succeeded but the payload is not a valid credential
    /// collection (e.g. truncated write from a previous crash).  Shown at
    /// the prompt with the same wording as `AuthenticationFailed`; the
    /// detail string is for diagnostics only.
    #[error("Unlock failed — vault payload is not a valid collection: {0}")]
    MalformedCollection(String),

    #[error("Invalid credential entry: {0}")]
    InvalidEntry(String),

    #[error("Failed to persist vault: {0}")]
    PersistFailed(String),

    #[error("Session is closed")]
    SessionClosed,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl CredVaultError {
    /// The message shown to the end user.
    ///
    /// `MalformedCollection` and `InvalidVaultFormat` are reworded to
    /// match `AuthenticationFailed` so the prompt gives no
    /// corruption-vs-wrong-passphrase oracle; the variants stay distinct
    /// for diagnostics.
    pub fn user_message(&self) -> String {
        match self {
            Self::MalformedCollection(_) | Self::InvalidVaultFormat(_) => {
                Self::AuthenticationFailed.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Convenience type alias for CredVault results.
pub type Result<T> = std::result::Result<T, CredVaultError>;
