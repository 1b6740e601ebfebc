//! Configuration module — non-secret user preferences.

pub mod settings;

pub use settings::{LoadOutcome, SearchCombinator, Settings};
