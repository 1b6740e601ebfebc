//! Search — filter entries by free-text terms.

use dialoguer::Input;

use crate::cli::commands::cancelled;
use crate::cli::output;
use crate::config::{SearchCombinator, Settings};
use crate::errors::Result;
use crate::session::SessionStore;
use crate::vault::CredentialEntry;

/// Match entries against whitespace-separated terms, combined with the
/// configured combinator.  Matches keep their collection index so they
/// can be addressed by edit/delete afterwards.
pub fn execute(store: &SessionStore, settings: &Settings) -> Result<()> {
    let query: String = Input::new()
        .with_prompt("Search terms")
        .interact_text()
        .map_err(cancelled)?;

    let terms: Vec<String> = query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();
    if terms.is_empty() {
        return Ok(());
    }

    let matches: Vec<(usize, &CredentialEntry)> = store
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| match settings.search_combinator {
            SearchCombinator::Any => terms.iter().any(|t| entry_matches(entry, t)),
            SearchCombinator::All => terms.iter().all(|t| entry_matches(entry, t)),
        })
        .collect();

    output::info(&format!("{} match(es)", matches.len()));
    output::print_entries_table(&matches);
    Ok(())
}

fn entry_matches(entry: &CredentialEntry, term: &str) -> bool {
    let fields = [
        Some(&entry.website),
        entry.email.as_ref(),
        entry.username.as_ref(),
        entry.logged_in_via.as_ref(),
        entry.linked_email.as_ref(),
    ];
    fields
        .into_iter()
        .flatten()
        .any(|f| f.to_lowercase().contains(term))
}
