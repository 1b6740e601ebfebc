//! The vault codec: seals a plaintext blob into an encrypted container
//! and opens it back up, given a passphrase.  Pure functions, no state.
//!
//! A `.vault` file has this layout:
//!
//! ```text
//! [CVLT: 4 bytes][version: 1 byte][header_len: 4 bytes LE][header JSON][nonce + ciphertext + tag]
//! ```
//!
//! - **Magic** (`CVLT`): identifies the file as a CredVault container.
//! - **Version**: format version (currently `1`).
//! - **Header length**: little-endian u32 telling us where the header
//!   JSON ends and the ciphertext begins.
//! - **Header JSON**: serialized `VaultHeader` — salt, creation time, and
//!   the Argon2id parameters used at seal time.  Everything needed for
//!   decryption except the passphrase.
//! - **Ciphertext**: AES-256-GCM output (12-byte nonce prepended).  The
//!   header bytes are bound in as associated data, so tampering with
//!   either part fails the tag check.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{derive_vault_key, generate_salt, Argon2Params};
use crate::errors::{CredVaultError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes at the start of every vault file.
const MAGIC: &[u8; 4] = b"CVLT";

/// Current binary format version.
pub const CURRENT_VERSION: u8 = 1;

/// Fixed-size prefix: 4 (magic) + 1 (version) + 4 (header_len).
const PREFIX_LEN: usize = 9;

// ---------------------------------------------------------------------------
// VaultHeader
// ---------------------------------------------------------------------------

/// Argon2 parameters stored in the vault header so the exact same KDF
/// settings are used when re-opening.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StoredKdfParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl From<Argon2Params> for StoredKdfParams {
    fn from(p: Argon2Params) -> Self {
        Self {
            memory_kib: p.memory_kib,
            iterations: p.iterations,
            parallelism: p.parallelism,
        }
    }
}

impl From<StoredKdfParams> for Argon2Params {
    fn from(p: StoredKdfParams) -> Self {
        Self {
            memory_kib: p.memory_kib,
            iterations: p.iterations,
            parallelism: p.parallelism,
        }
    }
}

/// Metadata stored at the beginning of a vault file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultHeader {
    /// Format version.
    pub version: u8,

    /// The salt used for Argon2id key derivation (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// When this container was sealed.
    pub created_at: DateTime<Utc>,

    /// Argon2 params used at seal time (stored so open uses the same).
    pub kdf: StoredKdfParams,
}

// ---------------------------------------------------------------------------
// Seal / Open
// ---------------------------------------------------------------------------

/// Seal `plaintext` under `passphrase` into a self-contained envelope.
///
/// Generates a fresh random salt per call, derives the vault key with
/// Argon2id, and encrypts with AES-256-GCM using the header bytes as
/// associated data.
pub fn seal(plaintext: &[u8], passphrase: &[u8], params: &Argon2Params) -> Result<Vec<u8>> {
    let salt = generate_salt();

    let header = VaultHeader {
        version: CURRENT_VERSION,
        salt: salt.to_vec(),
        created_at: Utc::now(),
        kdf: (*params).into(),
    };
    let header_bytes = serde_json::to_vec(&header)
        .map_err(|e| CredVaultError::SerializationError(format!("header: {e}")))?;

    let mut key = derive_vault_key(passphrase, &salt, params)?;
    let body = encrypt(&key, plaintext, &header_bytes);
    key.zeroize();
    let body = body?;

    let header_len = u32::try_from(header_bytes.len()).map_err(|_| {
        CredVaultError::SerializationError(format!(
            "header length {} exceeds u32::MAX",
            header_bytes.len()
        ))
    })?;

    let mut buf = Vec::with_capacity(PREFIX_LEN + header_bytes.len() + body.len());
    buf.extend_from_slice(MAGIC); // 4 bytes
    buf.push(CURRENT_VERSION); // 1 byte
    buf.extend_from_slice(&header_len.to_le_bytes()); // 4 bytes LE
    buf.extend_from_slice(&header_bytes); // header JSON
    buf.extend_from_slice(&body); // nonce + ciphertext + tag

    Ok(buf)
}

/// Open an envelope produced by `seal`, returning the header and plaintext.
///
/// Structural problems (bad magic, unknown version, truncated prefix)
/// are `InvalidVaultFormat`.  A wrong passphrase or any tampering with
/// header or ciphertext is a deterministic `DecryptionFailed` — the
/// caller decides how to present that.
pub fn open(data: &[u8], passphrase: &[u8]) -> Result<(VaultHeader, Vec<u8>)> {
    if data.len() < PREFIX_LEN {
        return Err(CredVaultError::InvalidVaultFormat(
            "file too small to be a valid vault".into(),
        ));
    }

    if &data[0..4] != MAGIC {
        return Err(CredVaultError::InvalidVaultFormat(
            "missing CVLT magic bytes".into(),
        ));
    }

    let version = data[4];
    if version != CURRENT_VERSION {
        return Err(CredVaultError::InvalidVaultFormat(format!(
            "unsupported version {version}, expected {CURRENT_VERSION}"
        )));
    }

    let header_len_u32 = u32::from_le_bytes(
        data[5..9]
            .try_into()
            .map_err(|_| CredVaultError::InvalidVaultFormat("bad header length".into()))?,
    );
    let header_len = usize::try_from(header_len_u32).map_err(|_| {
        CredVaultError::InvalidVaultFormat(format!(
            "header length {header_len_u32} exceeds platform address space"
        ))
    })?;

    let header_end = PREFIX_LEN + header_len;
    if header_end > data.len() {
        return Err(CredVaultError::InvalidVaultFormat(
            "header length exceeds file size".into(),
        ));
    }

    let header_bytes = &data[PREFIX_LEN..header_end];
    let body = &data[header_end..];

    let header: VaultHeader = serde_json::from_slice(header_bytes)
        .map_err(|e| CredVaultError::InvalidVaultFormat(format!("header JSON: {e}")))?;

    let mut key = derive_vault_key(passphrase, &header.salt, &header.kdf.into())?;
    let plaintext = decrypt(&key, body, header_bytes);
    key.zeroize();

    Ok((header, plaintext?))
}

// ---------------------------------------------------------------------------
// File wrappers
// ---------------------------------------------------------------------------

/// Seal `plaintext` and write the envelope to `path` **atomically**.
///
/// The envelope is staged in a temp file in the same directory and then
/// renamed over the target, so a crash mid-write never corrupts the
/// existing vault file.  The temp file is removed on every failure path.
pub fn seal_to_file(
    path: &Path,
    plaintext: &[u8],
    passphrase: &[u8],
    params: &Argon2Params,
) -> Result<()> {
    let buf = seal(plaintext, passphrase, params)?;

    let parent = path.parent().unwrap_or(Path::new("."));
    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)
            .map_err(|e| CredVaultError::PersistFailed(format!("create vault directory: {e}")))?;
    }

    // The temp file is in the same directory so rename is guaranteed
    // to be atomic on the same filesystem.
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    if let Err(e) = fs::write(&tmp_path, &buf) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CredVaultError::PersistFailed(format!(
            "write {}: {e}",
            tmp_path.display()
        )));
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CredVaultError::PersistFailed(format!(
            "rename over {}: {e}",
            path.display()
        )));
    }

    Ok(())
}

/// Read an envelope from `path` and open it.
pub fn open_from_file(path: &Path, passphrase: &[u8]) -> Result<(VaultHeader, Vec<u8>)> {
    if !path.exists() {
        return Err(CredVaultError::VaultNotFound(path.to_path_buf()));
    }

    let data = fs::read(path)?;
    open(&data, passphrase)
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
