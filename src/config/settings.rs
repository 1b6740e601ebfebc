use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CredVaultError, Result};

/// How multi-field searches combine their matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCombinator {
    /// An entry matches if any field matches.
    Any,
    /// An entry matches only if every term matches.
    All,
}

/// User preferences, loaded from `config.toml` in the per-user config
/// directory.  Non-secret only — the vault passphrase is never stored.
///
/// Every field has a sensible default so CredVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory where vault files are stored.  Defaults to the per-user
    /// data directory when unset.  Absent keys stay absent on write-back
    /// (TOML has no null).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_dir: Option<PathBuf>,

    /// Vault opened when none is named on the command line.
    #[serde(default = "default_vault_name")]
    pub default_vault: String,

    /// Generated-password length (default: 20).
    #[serde(default = "default_generate_length")]
    pub generate_length: usize,

    /// Character classes used by the password generator.
    #[serde(default = "default_true")]
    pub generate_lowercase: bool,
    #[serde(default = "default_true")]
    pub generate_uppercase: bool,
    #[serde(default = "default_true")]
    pub generate_digits: bool,
    #[serde(default = "default_true")]
    pub generate_symbols: bool,

    /// Default combinator for multi-term searches.
    #[serde(default = "default_search_combinator")]
    pub search_combinator: SearchCombinator,

    /// Seconds before a copied password is cleared from the clipboard
    /// (0 disables the timer).
    #[serde(default = "default_clipboard_clear_secs")]
    pub clipboard_clear_secs: u64,

    /// Prefill offered by the add-entry prompts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_username: Option<String>,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

/// Keys recognized in `config.toml`; anything else is warned about and
/// ignored.
const KNOWN_KEYS: &[&str] = &[
    "vault_dir",
    "default_vault",
    "generate_length",
    "generate_lowercase",
    "generate_uppercase",
    "generate_digits",
    "generate_symbols",
    "search_combinator",
    "clipboard_clear_secs",
    "default_email",
    "default_username",
    "argon2_memory_kib",
    "argon2_iterations",
    "argon2_parallelism",
];

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_name() -> String {
    "main".to_string()
}

fn default_generate_length() -> usize {
    20
}

fn default_true() -> bool {
    true
}

fn default_search_combinator() -> SearchCombinator {
    SearchCombinator::Any
}

fn default_clipboard_clear_secs() -> u64 {
    30
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: None,
            default_vault: default_vault_name(),
            generate_length: default_generate_length(),
            generate_lowercase: true,
            generate_uppercase: true,
            generate_digits: true,
            generate_symbols: true,
            search_combinator: default_search_combinator(),
            clipboard_clear_secs: default_clipboard_clear_secs(),
            default_email: None,
            default_username: None,
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

/// Result of loading settings: the values plus what the caller may want
/// to tell the user about.
pub struct LoadOutcome {
    pub settings: Settings,
    /// Unrecognized top-level keys found in the file.
    pub unknown_keys: Vec<String>,
    /// `true` when no file existed and one was written with defaults.
    pub materialized: bool,
}

impl Settings {
    /// Default location: `<config_dir>/credvault/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| CredVaultError::ConfigError("no user config directory".into()))?;
        Ok(base.join("credvault").join("config.toml"))
    }

    /// Load settings from `path`.
    ///
    /// A missing file is materialized with defaults.  Unknown keys are
    /// collected for the caller to warn about, then ignored.  A file
    /// that exists but cannot be parsed is an error.
    pub fn load_from(path: &Path) -> Result<LoadOutcome> {
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(path)?;
            return Ok(LoadOutcome {
                settings,
                unknown_keys: Vec::new(),
                materialized: true,
            });
        }

        let contents = std::fs::read_to_string(path)?;

        let table: toml::Table = contents.parse().map_err(|e| {
            CredVaultError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;

        let unknown_keys: Vec<String> = table
            .keys()
            .filter(|k| !KNOWN_KEYS.contains(&k.as_str()))
            .cloned()
            .collect();

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CredVaultError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;

        Ok(LoadOutcome {
            settings,
            unknown_keys,
            materialized: false,
        })
    }

    /// Write the settings back to `path`, creating parent directories as
    /// needed.  Called whenever a setting changes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CredVaultError::ConfigError(format!("serialize settings: {e}")))?;

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Directory holding vault files: the configured one, or
    /// `<data_dir>/credvault`.
    pub fn resolve_vault_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.vault_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir()
            .ok_or_else(|| CredVaultError::ConfigError("no user data directory".into()))?;
        Ok(base.join("credvault"))
    }

    /// Build the full path to a vault file for a given vault name.
    ///
    /// Example: `~/.local/share/credvault/main.vault`
    pub fn vault_path(&self, name: &str) -> Result<PathBuf> {
        Ok(self.resolve_vault_dir()?.join(format!("{name}.vault")))
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> crate::crypto::kdf::Argon2Params {
        crate::crypto::kdf::Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.default_vault, "main");
        assert_eq!(s.generate_length, 20);
        assert!(s.generate_symbols);
        assert_eq!(s.search_combinator, SearchCombinator::Any);
        assert_eq!(s.clipboard_clear_secs, 30);
        assert_eq!(s.argon2_memory_kib, 65_536);
    }

    #[test]
    fn missing_file_is_materialized_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let outcome = Settings::load_from(&path).unwrap();
        assert!(outcome.materialized);
        assert!(path.exists());
        assert_eq!(outcome.settings.default_vault, "main");

        // A second load reads the materialized file.
        let outcome = Settings::load_from(&path).unwrap();
        assert!(!outcome.materialized);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        let config = r#"
default_vault = "work"
generate_length = 32
generate_symbols = false
search_combinator = "all"
clipboard_clear_secs = 10
argon2_iterations = 5
"#;
        fs::write(&path, config).unwrap();

        let outcome = Settings::load_from(&path).unwrap();
        let s = outcome.settings;
        assert_eq!(s.default_vault, "work");
        assert_eq!(s.generate_length, 32);
        assert!(!s.generate_symbols);
        assert_eq!(s.search_combinator, SearchCombinator::All);
        assert_eq!(s.clipboard_clear_secs, 10);
        assert_eq!(s.argon2_iterations, 5);
        // Rest should be defaults
        assert!(s.generate_lowercase);
        assert_eq!(s.argon2_memory_kib, 65_536);
    }

    #[test]
    fn unknown_keys_are_reported_and_ignored() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "default_vault = \"main\"\ncolor_theme = \"dark\"\n").unwrap();

        let outcome = Settings::load_from(&path).unwrap();
        assert_eq!(outcome.unknown_keys, vec!["color_theme".to_string()]);
        assert_eq!(outcome.settings.default_vault, "main");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "not valid {{toml").unwrap();

        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        let mut s = Settings::default();
        s.default_vault = "personal".into();
        s.clipboard_clear_secs = 0;
        s.default_email = Some("me@example.com".into());
        s.save_to(&path).unwrap();

        let reloaded = Settings::load_from(&path).unwrap().settings;
        assert_eq!(reloaded.default_vault, "personal");
        assert_eq!(reloaded.clipboard_clear_secs, 0);
        assert_eq!(reloaded.default_email.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn vault_path_respects_custom_vault_dir() {
        let s = Settings {
            vault_dir: Some(PathBuf::from("/tmp/vaults")),
            ..Settings::default()
        };
        let path = s.vault_path("work").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/vaults/work.vault"));
    }
}
