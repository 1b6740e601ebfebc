//! Integration tests for the CredVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Interactive menu flows are difficult to automate, so they focus on
//! the non-interactive surface (`init`, `generate`, flag handling) and
//! the `CREDVAULT_PASSPHRASE` escape hatch for prompts.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the credvault binary.
fn credvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("credvault").expect("binary should exist")
}

/// Helper: point the global flags at throwaway config + vault dirs.
fn sandboxed(tmp: &TempDir) -> Command {
    let mut cmd = credvault();
    cmd.args([
        "--config",
        tmp.path().join("config.toml").to_str().unwrap(),
        "--vault-dir",
        tmp.path().join("vaults").to_str().unwrap(),
    ]);
    cmd
}

#[test]
fn help_flag_shows_usage() {
    credvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Interactive encrypted vault for website credentials",
        ))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn version_flag_shows_version() {
    credvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("credvault"));
}

#[test]
fn no_args_shows_help() {
    credvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn generate_prints_password_of_requested_length() {
    let tmp = TempDir::new().unwrap();

    let output = sandboxed(&tmp)
        .args(["generate", "--length", "24"])
        .output()
        .expect("run generate");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let password = stdout.lines().last().expect("a password line");
    assert_eq!(password.len(), 24);
}

#[test]
fn generate_materializes_default_config() {
    let tmp = TempDir::new().unwrap();

    sandboxed(&tmp).arg("generate").assert().success();
    assert!(tmp.path().join("config.toml").exists());
}

#[test]
fn init_creates_vault_file() {
    let tmp = TempDir::new().unwrap();

    sandboxed(&tmp)
        .arg("init")
        .env("CREDVAULT_PASSPHRASE", "testpass-123")
        .assert()
        .success();

    assert!(tmp.path().join("vaults").join("main.vault").exists());
}

#[test]
fn init_twice_fails() {
    let tmp = TempDir::new().unwrap();

    sandboxed(&tmp)
        .arg("init")
        .env("CREDVAULT_PASSPHRASE", "testpass-123")
        .assert()
        .success();

    sandboxed(&tmp)
        .arg("init")
        .env("CREDVAULT_PASSPHRASE", "testpass-123")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_invalid_vault_name() {
    let tmp = TempDir::new().unwrap();

    sandboxed(&tmp)
        .args(["init", "-n", "Bad_Name"])
        .env("CREDVAULT_PASSPHRASE", "testpass-123")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn open_with_wrong_passphrase_fails_without_oracle() {
    let tmp = TempDir::new().unwrap();

    sandboxed(&tmp)
        .arg("init")
        .env("CREDVAULT_PASSPHRASE", "testpass-123")
        .assert()
        .success();

    // The message must not say whether the passphrase was wrong or the
    // file corrupt.
    sandboxed(&tmp)
        .arg("open")
        .env("CREDVAULT_PASSPHRASE", "not-the-passphrase")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "wrong master passphrase or corrupted vault",
        ));
}

#[test]
fn open_without_terminal_still_saves_on_exit() {
    let tmp = TempDir::new().unwrap();

    sandboxed(&tmp)
        .arg("init")
        .env("CREDVAULT_PASSPHRASE", "testpass-123")
        .assert()
        .success();

    // With no TTY the menu prompt fails immediately; that counts as an
    // interruption and must still run the save-on-close path.
    sandboxed(&tmp)
        .arg("open")
        .env("CREDVAULT_PASSPHRASE", "testpass-123")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault saved."));
}
