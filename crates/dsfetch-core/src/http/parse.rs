//! Parse HTTP response header lines into a HeaderSummary.

/// Headers of the final response that matter to discovery and validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSummary {
    /// `Content-Type` value if present, as sent.
    pub content_type: Option<String>,
    /// Declared size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
}

/// Parse collected header lines into HeaderSummary.
///
/// libcurl reports the headers of every hop when following redirects; each
/// `HTTP/` status line starts a new response, so only the last one counts.
pub(crate) fn parse_headers(lines: &[String]) -> HeaderSummary {
    let mut summary = HeaderSummary::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            summary = HeaderSummary::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                summary.content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    summary.content_length = Some(n);
                }
            }
        }
    }

    summary
}
