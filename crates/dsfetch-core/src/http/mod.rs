//! Blocking HTTP transport.
//!
//! Discovery and fetch code only see the [`Transport`] trait; the libcurl
//! implementation lives here. Every call follows redirects, is bounded by the
//! timeout passed in, and owns its own curl handle for the duration of the call.

mod classify;
mod parse;

pub use parse::HeaderSummary;

use crate::error::RequestError;
use classify::classify_curl_error;
use std::str;
use std::time::Duration;

/// Final response of a request, after redirects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub status: u32,
    pub headers: HeaderSummary,
    /// Empty for HEAD.
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound HTTP used by the resolver and fetcher.
///
/// Non-2xx statuses are returned as `Ok`; callers decide what a status means.
/// `Err` is reserved for transport failures (timeouts, DNS, refused, ...).
pub trait Transport {
    fn get(&self, url: &str, timeout: Duration) -> Result<Response, RequestError>;
    fn head(&self, url: &str, timeout: Duration) -> Result<Response, RequestError>;
}

/// libcurl-backed [`Transport`]. Runs in the current thread.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    user_agent: String,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(15))
    }
}

impl CurlTransport {
    pub fn new(connect_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            user_agent: format!("dsfetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    fn perform(&self, url: &str, timeout: Duration, head: bool) -> Result<Response, RequestError> {
        let err = |e: curl::Error| classify_curl_error(url, &e);
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(err)?;
        easy.nobody(head).map_err(err)?;
        easy.follow_location(true).map_err(err)?;
        easy.max_redirections(10).map_err(err)?;
        easy.useragent(&self.user_agent).map_err(err)?;
        easy.connect_timeout(self.connect_timeout.min(timeout)).map_err(err)?;
        easy.timeout(timeout).map_err(err)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        header_lines.push(s.trim_end().to_string());
                    }
                    true
                })
                .map_err(err)?;
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(err)?;
            transfer.perform().map_err(err)?;
        }

        let status = easy.response_code().map_err(err)?;
        let headers = parse::parse_headers(&header_lines);
        tracing::debug!(
            method = if head { "HEAD" } else { "GET" },
            url,
            status,
            bytes = body.len(),
            "request complete"
        );
        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<Response, RequestError> {
        self.perform(url, timeout, false)
    }

    fn head(&self, url: &str, timeout: Duration) -> Result<Response, RequestError> {
        self.perform(url, timeout, true)
    }
}
