//! In-memory transport for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::RequestError;
use crate::http::{HeaderSummary, Response, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Method {
    Get,
    Head,
}

/// Canned responses keyed by method + URL. Unknown routes fail with a
/// connection error, like an unreachable host. Every call is recorded along
/// with the timeout it was made with.
#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: HashMap<(Method, String), Result<Response, RequestError>>,
    calls: RefCell<Vec<(Method, String, Duration)>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(self, url: &str, html: &str) -> Self {
        self.with_get(url, 200, Some("text/html; charset=utf-8"), html.as_bytes())
    }

    pub(crate) fn with_get(
        self,
        url: &str,
        status: u32,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Self {
        self.route(
            Method::Get,
            url,
            Ok(Response {
                status,
                headers: HeaderSummary {
                    content_type: content_type.map(String::from),
                    content_length: Some(body.len() as u64),
                },
                body: body.to_vec(),
            }),
        )
    }

    pub(crate) fn with_head(self, url: &str, status: u32) -> Self {
        self.route(
            Method::Head,
            url,
            Ok(Response {
                status,
                ..Response::default()
            }),
        )
    }

    pub(crate) fn with_timeout(self, method: Method, url: &str) -> Self {
        self.route(
            method,
            url,
            Err(RequestError::Timeout {
                url: url.to_string(),
            }),
        )
    }

    fn route(mut self, method: Method, url: &str, r: Result<Response, RequestError>) -> Self {
        self.routes.insert((method, url.to_string()), r);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(Method, String, Duration)> {
        self.calls.borrow().clone()
    }

    pub(crate) fn calls_of(&self, method: Method) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(m, _, _)| *m == method)
            .map(|(_, u, _)| u)
            .collect()
    }

    /// Timeout passed with the first `method` request to `url`.
    pub(crate) fn timeout_of(&self, method: Method, url: &str) -> Option<Duration> {
        self.calls()
            .into_iter()
            .find(|(m, u, _)| *m == method && u == url)
            .map(|(_, _, t)| t)
    }

    fn answer(
        &self,
        method: Method,
        url: &str,
        timeout: Duration,
    ) -> Result<Response, RequestError> {
        self.calls
            .borrow_mut()
            .push((method, url.to_string(), timeout));
        self.routes
            .get(&(method, url.to_string()))
            .cloned()
            .unwrap_or_else(|| {
                Err(RequestError::Connection {
                    url: url.to_string(),
                    message: "no route".to_string(),
                })
            })
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<Response, RequestError> {
        self.answer(Method::Get, url, timeout)
    }

    fn head(&self, url: &str, timeout: Duration) -> Result<Response, RequestError> {
        self.answer(Method::Head, url, timeout)
    }
}
