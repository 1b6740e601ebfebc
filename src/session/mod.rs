//! Session module — the encrypted-session lifecycle.
//!
//! This module provides:
//! - `SessionStore`: the in-memory decrypted collection and its
//!   load/replace/rekey/switch/persist operations (`store`)
//! - `SessionController`: the unlock/close state machine with the
//!   exactly-once save-on-exit guarantee (`controller`)

pub mod controller;
pub mod store;

pub use controller::SessionController;
pub use store::SessionStore;
