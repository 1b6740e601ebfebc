//! Random password generation from configurable character classes.
//!
//! The generated password contains at least one character from every
//! enabled class, with the rest drawn uniformly from the combined pool
//! and the result shuffled.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Settings;
use crate::errors::{CredVaultError, Result};

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()-_=+[]{};:,.<>?";

/// Which character classes to draw from, and how many characters.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorOptions {
    pub length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl GeneratorOptions {
    /// Build options from the configured defaults.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            length: settings.generate_length,
            lowercase: settings.generate_lowercase,
            uppercase: settings.generate_uppercase,
            digits: settings.generate_digits,
            symbols: settings.generate_symbols,
        }
    }
}

/// Generate a random password per `opts`.
///
/// Fails when every character class is disabled, or when `length` is
/// too short to fit one character of each enabled class.
pub fn generate_password(opts: &GeneratorOptions) -> Result<String> {
    let mut classes: Vec<&[u8]> = Vec::with_capacity(4);
    if opts.lowercase {
        classes.push(LOWERCASE);
    }
    if opts.uppercase {
        classes.push(UPPERCASE);
    }
    if opts.digits {
        classes.push(DIGITS);
    }
    if opts.symbols {
        classes.push(SYMBOLS);
    }

    if classes.is_empty() {
        return Err(CredVaultError::CommandFailed(
            "cannot generate a password with every character class disabled".into(),
        ));
    }
    if opts.length < classes.len() {
        return Err(CredVaultError::CommandFailed(format!(
            "password length {} is too short for {} enabled character classes",
            opts.length,
            classes.len()
        )));
    }

    let pool: Vec<u8> = classes.concat();
    let mut rng = rand::rng();
    let mut chars: Vec<u8> = Vec::with_capacity(opts.length);

    // One character from each enabled class first, so no class is absent.
    for class in &classes {
        chars.push(class[rng.random_range(0..class.len())]);
    }
    while chars.len() < opts.length {
        chars.push(pool[rng.random_range(0..pool.len())]);
    }
    chars.shuffle(&mut rng);

    // The pool is pure ASCII, so this cannot fail.
    String::from_utf8(chars)
        .map_err(|e| CredVaultError::CommandFailed(format!("generated non-UTF-8 bytes: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_classes(length: usize) -> GeneratorOptions {
        GeneratorOptions {
            length,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: true,
        }
    }

    #[test]
    fn generates_requested_length() {
        let pw = generate_password(&all_classes(20)).unwrap();
        assert_eq!(pw.len(), 20);
    }

    #[test]
    fn contains_one_of_each_enabled_class() {
        let pw = generate_password(&all_classes(8)).unwrap();
        assert!(pw.bytes().any(|b| LOWERCASE.contains(&b)));
        assert!(pw.bytes().any(|b| UPPERCASE.contains(&b)));
        assert!(pw.bytes().any(|b| DIGITS.contains(&b)));
        assert!(pw.bytes().any(|b| SYMBOLS.contains(&b)));
    }

    #[test]
    fn respects_disabled_classes() {
        let opts = GeneratorOptions {
            length: 16,
            lowercase: true,
            uppercase: false,
            digits: true,
            symbols: false,
        };
        let pw = generate_password(&opts).unwrap();
        assert!(pw
            .bytes()
            .all(|b| LOWERCASE.contains(&b) || DIGITS.contains(&b)));
    }

    #[test]
    fn all_classes_disabled_is_an_error() {
        let opts = GeneratorOptions {
            length: 16,
            lowercase: false,
            uppercase: false,
            digits: false,
            symbols: false,
        };
        assert!(generate_password(&opts).is_err());
    }

    #[test]
    fn length_shorter_than_class_count_is_an_error() {
        assert!(generate_password(&all_classes(3)).is_err());
    }

    #[test]
    fn two_passwords_differ() {
        let opts = all_classes(24);
        let a = generate_password(&opts).unwrap();
        let b = generate_password(&opts).unwrap();
        assert_ne!(a, b);
    }
}
