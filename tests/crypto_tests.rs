//! Integration tests for the CredVault crypto module.

use credvault::crypto::kdf::Argon2Params;
use credvault::crypto::{decrypt, derive_vault_key, encrypt, generate_salt};

/// Fast Argon2 settings so tests do not burn 64 MB per derivation.
fn test_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = [0xABu8; 32];
    let plaintext = b"[{\"website\":\"github.com\"}]";
    let aad = b"header bytes";

    let ciphertext = encrypt(&key, plaintext, aad).expect("encrypt should succeed");

    // Ciphertext must be longer than plaintext (12-byte nonce + 16-byte tag).
    assert!(ciphertext.len() > plaintext.len());

    let recovered = decrypt(&key, &ciphertext, aad).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = [0xCDu8; 32];
    let plaintext = b"same bytes";

    let ct1 = encrypt(&key, plaintext, b"").expect("encrypt 1");
    let ct2 = encrypt(&key, plaintext, b"").expect("encrypt 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(
        ct1, ct2,
        "two encryptions of the same plaintext must differ"
    );
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let key = [0x11u8; 32];
    let wrong_key = [0x22u8; 32];
    let plaintext = b"top secret";

    let ciphertext = encrypt(&key, plaintext, b"").expect("encrypt");
    let result = decrypt(&wrong_key, &ciphertext, b"");

    assert!(result.is_err(), "decryption with the wrong key must fail");
}

#[test]
fn decrypt_with_wrong_aad_fails() {
    let key = [0x33u8; 32];

    let ciphertext = encrypt(&key, b"payload", b"header v1").expect("encrypt");
    let result = decrypt(&key, &ciphertext, b"header v2");

    assert!(result.is_err(), "altered associated data must fail auth");
}

#[test]
fn decrypt_with_truncated_data_fails() {
    // Anything shorter than 12 bytes (nonce length) should fail.
    let key = [0xAAu8; 32];
    let result = decrypt(&key, &[0u8; 5], b"");
    assert!(result.is_err(), "truncated ciphertext must fail");
}

#[test]
fn decrypt_with_corrupted_ciphertext_fails() {
    let key = [0xBBu8; 32];
    let plaintext = b"payload";

    let mut ciphertext = encrypt(&key, plaintext, b"").expect("encrypt");
    // Flip a byte in the ciphertext portion (after the 12-byte nonce).
    if let Some(byte) = ciphertext.get_mut(15) {
        *byte ^= 0xFF;
    }

    let result = decrypt(&key, &ciphertext, b"");
    assert!(result.is_err(), "corrupted ciphertext must fail auth check");
}

// ---------------------------------------------------------------------------
// Key derivation (Argon2id)
// ---------------------------------------------------------------------------

#[test]
fn derive_vault_key_same_inputs_same_output() {
    let passphrase = b"my-secure-passphrase";
    let salt = generate_salt();

    let key1 = derive_vault_key(passphrase, &salt, &test_params()).expect("derive 1");
    let key2 = derive_vault_key(passphrase, &salt, &test_params()).expect("derive 2");

    assert_eq!(key1, key2, "same passphrase + salt must produce the same key");
}

#[test]
fn derive_vault_key_different_salts_different_keys() {
    let passphrase = b"same-passphrase";
    let salt1 = generate_salt();
    let salt2 = generate_salt();

    let key1 = derive_vault_key(passphrase, &salt1, &test_params()).expect("derive 1");
    let key2 = derive_vault_key(passphrase, &salt2, &test_params()).expect("derive 2");

    assert_ne!(key1, key2, "different salts must produce different keys");
}

#[test]
fn derive_vault_key_different_passphrases_different_keys() {
    let salt = generate_salt();

    let key1 = derive_vault_key(b"passphrase-one", &salt, &test_params()).expect("derive 1");
    let key2 = derive_vault_key(b"passphrase-two", &salt, &test_params()).expect("derive 2");

    assert_ne!(
        key1, key2,
        "different passphrases must produce different keys"
    );
}

#[test]
fn derive_vault_key_rejects_weak_params() {
    let salt = generate_salt();
    let weak = Argon2Params {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    };

    assert!(derive_vault_key(b"pw", &salt, &weak).is_err());
}

// ---------------------------------------------------------------------------
// End-to-end: passphrase -> vault key -> encrypt/decrypt
// ---------------------------------------------------------------------------

#[test]
fn full_crypto_pipeline() {
    let passphrase = b"hunter2-hunter2";
    let salt = generate_salt();

    // Step 1: Derive the vault key from the passphrase.
    let key = derive_vault_key(passphrase, &salt, &test_params()).expect("derive key");

    // Step 2: Encrypt a collection payload.
    let plaintext = b"[{\"website\":\"example.com\",\"username\":\"me\"}]";
    let ciphertext = encrypt(&key, plaintext, b"envelope header").expect("encrypt");

    // Step 3: Decrypt it back.
    let recovered = decrypt(&key, &ciphertext, b"envelope header").expect("decrypt");
    assert_eq!(recovered, plaintext.to_vec());
}
