//! Error taxonomy for discovery, fetch and validation.
//!
//! Request-level failures (`RequestError`) are absorbed inside discovery and
//! turned into "try the next method". Only `ResolveError` and `FetchError`
//! ever reach the caller, wrapped in `AcquireError` when both stages run.

use thiserror::Error;

/// Failure of a single HTTP request, classified from the transport error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Connect or transfer timeout hit.
    #[error("request to {url} timed out")]
    Timeout { url: String },
    /// DNS, refused connection, reset, empty reply.
    #[error("connection to {url} failed: {message}")]
    Connection { url: String, message: String },
    /// Anything else the transport reported (bad URL, TLS, ...).
    #[error("request to {url} failed: {message}")]
    Other { url: String, message: String },
}

impl RequestError {
    pub fn url(&self) -> &str {
        match self {
            RequestError::Timeout { url }
            | RequestError::Connection { url, .. }
            | RequestError::Other { url, .. } => url,
        }
    }
}

/// Failure of one discovery method. Never surfaced on its own; logged and
/// converted into a fall-through to the next method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("landing page {url} could not be scraped: {reason}")]
    ScrapeFailed { url: String, reason: String },
    #[error("none of {tried} probe candidates answered 200")]
    ProbeExhausted { tried: usize },
}

/// Terminal outcome of the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Every discovery method was exhausted without a candidate.
    #[error("no download URL found for {landing_page}")]
    NotFound { landing_page: String },
}

/// Terminal outcome of the final download and its validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("GET {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u32 },
    #[error("downloaded file from {url} does not appear to be CSV")]
    NotCsv { url: String },
    #[error("GET {url} timed out")]
    Timeout { url: String },
    #[error("GET {url} failed: {message}")]
    Connection { url: String, message: String },
}

impl From<RequestError> for FetchError {
    fn from(e: RequestError) -> Self {
        match e {
            RequestError::Timeout { url } => FetchError::Timeout { url },
            RequestError::Connection { url, message } | RequestError::Other { url, message } => {
                FetchError::Connection { url, message }
            }
        }
    }
}

/// Which stage of a resolve-then-fetch run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolution,
    Fetch,
    Validation,
}

/// Error returned by [`crate::acquire::acquire`]. Always carries the landing
/// page so the caller can point a human at it for a manual download.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("{source}")]
    Fetch {
        landing_page: String,
        #[source]
        source: FetchError,
    },
}

impl AcquireError {
    pub fn stage(&self) -> Stage {
        match self {
            AcquireError::Resolve(_) => Stage::Resolution,
            AcquireError::Fetch {
                source: FetchError::NotCsv { .. },
                ..
            } => Stage::Validation,
            AcquireError::Fetch { .. } => Stage::Fetch,
        }
    }

    pub fn landing_page(&self) -> &str {
        match self {
            AcquireError::Resolve(ResolveError::NotFound { landing_page }) => landing_page,
            AcquireError::Fetch { landing_page, .. } => landing_page,
        }
    }

    /// URL that was being downloaded when the fetch stage failed.
    pub fn attempted_url(&self) -> Option<&str> {
        match self {
            AcquireError::Resolve(_) => None,
            AcquireError::Fetch { source, .. } => Some(match source {
                FetchError::HttpStatus { url, .. }
                | FetchError::NotCsv { url }
                | FetchError::Timeout { url }
                | FetchError::Connection { url, .. } => url,
            }),
        }
    }
}
