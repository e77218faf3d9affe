//! Decide whether a downloaded payload is plausibly the CSV we asked for.

use serde::Serialize;

use crate::error::FetchError;

/// How many leading bytes the sniff looks at.
pub const SNIFF_LEN: usize = 100;

/// Why a payload was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Evidence {
    /// Declared `Content-Type` mentions csv.
    ContentType,
    /// The URL path ends in `.csv`.
    Extension,
    /// The leading bytes contain something other than delimiters.
    Sniff,
}

/// Checks, in order: declared content type, URL extension, content sniff.
pub fn validate(
    url: &str,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<Evidence, FetchError> {
    if content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("csv")) {
        return Ok(Evidence::ContentType);
    }
    if path_ends_with_csv(url) {
        return Ok(Evidence::Extension);
    }
    if sniff_text(body) {
        return Ok(Evidence::Sniff);
    }
    Err(FetchError::NotCsv {
        url: url.to_string(),
    })
}

/// Path component only, so `?format=csv` style query strings don't count.
fn path_ends_with_csv(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(u) => u.path().ends_with(".csv"),
        Err(_) => url.ends_with(".csv"),
    }
}

/// Best-effort, not a CSV parser: decode the first [`SNIFF_LEN`] bytes
/// dropping invalid UTF-8, remove newlines, commas, semicolons and control
/// characters, trim whitespace, and report whether anything is left.
pub fn sniff_text(body: &[u8]) -> bool {
    let sample = &body[..body.len().min(SNIFF_LEN)];
    let mut decoded = String::with_capacity(sample.len());
    for chunk in sample.utf8_chunks() {
        decoded.push_str(chunk.valid());
    }
    let stripped: String = decoded
        .chars()
        .filter(|c| !matches!(c, '\n' | ',' | ';') && !c.is_control())
        .collect();
    !stripped.trim().is_empty()
}
