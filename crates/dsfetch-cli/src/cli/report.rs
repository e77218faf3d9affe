//! Human-readable messages printed by the commands.

use dsfetch_core::error::{AcquireError, Stage};
use std::path::Path;

/// Returned by a command that has already printed its failure to the user.
/// `main` only sets the exit status for it.
#[derive(Debug)]
pub struct Reported;

impl std::fmt::Display for Reported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failure already reported")
    }
}

impl std::error::Error for Reported {}

/// True if `err` is a [`Reported`] marker.
pub fn is_reported(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Reported>().is_some()
}

/// One-line summary of what went wrong, by stage.
pub fn failure_headline(err: &AcquireError) -> String {
    match err.stage() {
        Stage::Resolution => "Could not automatically find download link.".to_string(),
        Stage::Fetch => format!("Error downloading data: {}", err),
        Stage::Validation => "Downloaded file does not appear to be CSV format.".to_string(),
    }
}

/// Instructions for finishing the download by hand.
pub fn manual_fallback(landing_page: &str, output: &Path) -> String {
    format!(
        "Please download the CSV file manually from:\n{}\n\
         Look for the 'Raw_data (CSV)' download link and save it as '{}'.",
        landing_page,
        output.display()
    )
}

/// `1234567` → `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
