//! Final download of the resolved URL, plus payload validation.

mod validate;

pub use validate::{sniff_text, validate, Evidence, SNIFF_LEN};

use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::error::FetchError;
use crate::http::Transport;
use crate::resolver::ResolvedUrl;

/// Accepted payload, ready for the caller to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPayload {
    /// URL the payload was requested from (before redirects).
    pub url: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub evidence: Evidence,
}

impl FetchedPayload {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// SHA-256 of the payload as lowercase hex.
    pub fn sha256_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

/// GET `resolved` with the download timeout and validate the body.
pub fn fetch(
    transport: &dyn Transport,
    resolved: &ResolvedUrl,
    timeout: Duration,
) -> Result<FetchedPayload, FetchError> {
    let url = resolved.url.as_str();
    tracing::info!("downloading {}", url);
    let response = transport.get(url, timeout)?;
    if !response.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    if let Some(declared) = response.headers.content_length {
        if declared != response.body.len() as u64 {
            tracing::warn!(
                declared,
                received = response.body.len(),
                "body length differs from Content-Length"
            );
        }
    }

    let content_type = response.headers.content_type;
    let evidence = validate(url, content_type.as_deref(), &response.body)?;
    tracing::debug!(
        evidence = ?evidence,
        bytes = response.body.len(),
        content_type = content_type.as_deref().unwrap_or(""),
        "payload accepted"
    );
    Ok(FetchedPayload {
        url: url.to_string(),
        content_type,
        bytes: response.body,
        evidence,
    })
}
