//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::CredentialEntry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// One-line login identity for display: direct email/username, or the
/// federated provider plus linked account.
pub fn identity(entry: &CredentialEntry) -> String {
    if let Some(provider) = &entry.logged_in_via {
        let linked = entry.linked_email.as_deref().unwrap_or("?");
        return format!("via {provider} ({linked})");
    }
    match (&entry.email, &entry.username) {
        (Some(email), Some(user)) => format!("{email} / {user}"),
        (Some(email), None) => email.clone(),
        (None, Some(user)) => user.clone(),
        (None, None) => String::from("—"),
    }
}

/// Print a table of entries (Index, Website, Login, Updated).
///
/// Rows carry their collection index so search results keep the index
/// used for edit/delete addressing.
pub fn print_entries_table(rows: &[(usize, &CredentialEntry)]) {
    if rows.is_empty() {
        info("No entries to show.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Website", "Login", "Updated"]);

    for (index, entry) in rows {
        table.add_row(vec![
            index.to_string(),
            entry.website.clone(),
            identity(entry),
            entry.added.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}
