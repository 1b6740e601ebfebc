//! Clipboard copy with a timed clear.

use std::thread;
use std::time::Duration;

use crate::errors::{CredVaultError, Result};

/// Copy `text` to the OS clipboard and, when `clear_after_secs` is
/// non-zero, clear it again after that many seconds.
///
/// The timer runs on a detached thread that touches only the OS
/// clipboard, never session state.  It dies with the process, so a quit
/// before the deadline skips the clear.
pub fn copy_with_clear(text: &str, clear_after_secs: u64) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| CredVaultError::CommandFailed(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| CredVaultError::CommandFailed(format!("clipboard copy: {e}")))?;

    if clear_after_secs > 0 {
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(clear_after_secs));
            if let Ok(mut clipboard) = arboard::Clipboard::new() {
                let _ = clipboard.set_text(String::new());
            }
        });
    }

    Ok(())
}
