//! Credential entry type stored inside a vault.
//!
//! An entry identifies itself through exactly one of two paths:
//!
//! - **Direct**: `email` and/or `username` for the site itself.
//! - **Federated**: `logged_in_via` (provider name, e.g. "google") plus a
//!   mandatory `linked_email`, optionally with a provider `username`.
//!
//! Absent fields are omitted from the serialized form rather than stored
//! as empty strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::errors::{CredVaultError, Result};

/// A single stored credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    /// The service name or identifier (e.g. "github.com").
    pub website: String,

    /// Direct login email for the site.  Mutually exclusive with
    /// `logged_in_via`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Username, for the site itself or for the federated provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// May be absent when login is purely federated with no local secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_email: Option<String>,

    /// Federated-login provider name (e.g. "google").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_via: Option<String>,

    /// Email of the provider account; required when `logged_in_via` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_email: Option<String>,

    /// Set on create and refreshed on every update — a last-modified
    /// marker, not pure creation time.
    pub added: DateTime<Utc>,
}

impl CredentialEntry {
    /// Validate the identification-path invariant.
    ///
    /// - `website` must be non-empty.
    /// - No optional field may be present but empty.
    /// - Federated entries (`logged_in_via` set) must carry a
    ///   `linked_email` and must not carry a direct `email`.
    /// - Direct entries must carry at least one of `email`/`username`
    ///   and must not carry a `linked_email`.
    pub fn validate(&self) -> Result<()> {
        if self.website.trim().is_empty() {
            return Err(CredVaultError::InvalidEntry(
                "website must not be empty".into(),
            ));
        }

        for (field, value) in [
            ("email", &self.email),
            ("username", &self.username),
            ("password", &self.password),
            ("recovery_email", &self.recovery_email),
            ("logged_in_via", &self.logged_in_via),
            ("linked_email", &self.linked_email),
        ] {
            if matches!(value, Some(v) if v.is_empty()) {
                return Err(CredVaultError::InvalidEntry(format!(
                    "'{}': {field} is present but empty — omit it instead",
                    self.website
                )));
            }
        }

        if self.logged_in_via.is_some() {
            if self.email.is_some() {
                return Err(CredVaultError::InvalidEntry(format!(
                    "'{}': federated entries must not carry a direct email",
                    self.website
                )));
            }
            if self.linked_email.is_none() {
                return Err(CredVaultError::InvalidEntry(format!(
                    "'{}': federated entries require a linked_email",
                    self.website
                )));
            }
        } else {
            if self.email.is_none() && self.username.is_none() {
                return Err(CredVaultError::InvalidEntry(format!(
                    "'{}': at least one of email/username is required",
                    self.website
                )));
            }
            if self.linked_email.is_some() {
                return Err(CredVaultError::InvalidEntry(format!(
                    "'{}': linked_email only applies to federated entries",
                    self.website
                )));
            }
        }

        Ok(())
    }

    /// Best-effort zeroization of every string field.
    ///
    /// `Zeroize` cannot be derived because of the timestamp field, so the
    /// strings are wiped one by one.
    pub fn scrub(&mut self) {
        self.website.zeroize();
        for field in [
            &mut self.email,
            &mut self.username,
            &mut self.password,
            &mut self.recovery_email,
            &mut self.logged_in_via,
            &mut self.linked_email,
        ] {
            if let Some(v) = field {
                v.zeroize();
            }
            *field = None;
        }
    }
}

/// Validate a whole collection, rejecting the batch on the first bad entry.
pub fn validate_collection(entries: &[CredentialEntry]) -> Result<()> {
    for entry in entries {
        entry.validate()?;
    }
    Ok(())
}
