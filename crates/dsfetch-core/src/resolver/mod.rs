//! Resolver: turn a landing page into a single direct download URL.
//!
//! Discovery is an ordered list of [`Discovery`] methods evaluated left to
//! right. The first method to produce a URL wins and later methods are never
//! run. A method that fails (page unreachable, every probe refused) is logged
//! and treated as "nothing found".

mod probe;
mod scrape;

pub use probe::{candidates, PatternProbe};
pub use scrape::{scan_download_affordances, scan_links, scan_scripts, scrape_document, PageScrape};

use serde::Serialize;

use crate::config::FetchConfig;
use crate::error::{DiscoveryError, ResolveError};
use crate::http::Transport;
use crate::landing::LandingPage;

/// Where a resolved URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// `<a href>` whose target or label looks like the data file.
    Link,
    /// Element with a `download` attribute pointing at a `.csv`.
    DownloadAffordance,
    /// Literal `.csv` URL inside a `<script>`.
    Script,
    /// Guessed URL that answered a HEAD request.
    Probe,
}

/// The single URL a run commits to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedUrl {
    pub url: String,
    pub source: Source,
}

/// One discovery method.
///
/// `Ok(None)` means the method ran but found nothing; `Err` means it could not
/// run to completion. The resolver treats both as "try the next method".
pub trait Discovery {
    fn name(&self) -> &'static str;

    fn discover(
        &self,
        landing: &LandingPage,
        transport: &dyn Transport,
    ) -> Result<Option<ResolvedUrl>, DiscoveryError>;
}

pub struct Resolver<'a> {
    transport: &'a dyn Transport,
    methods: Vec<Box<dyn Discovery>>,
}

impl<'a> Resolver<'a> {
    /// Page scrape, then pattern probe.
    pub fn new(transport: &'a dyn Transport, cfg: &FetchConfig) -> Self {
        Self::with_methods(
            transport,
            vec![
                Box::new(PageScrape::new(cfg.timeouts.page())),
                Box::new(PatternProbe::new(cfg.probe.clone(), cfg.timeouts.probe())),
            ],
        )
    }

    pub fn with_methods(transport: &'a dyn Transport, methods: Vec<Box<dyn Discovery>>) -> Self {
        Self { transport, methods }
    }

    pub fn resolve(&self, landing: &LandingPage) -> Result<ResolvedUrl, ResolveError> {
        for method in &self.methods {
            tracing::debug!(method = method.name(), "trying discovery method");
            match method.discover(landing, self.transport) {
                Ok(Some(resolved)) => {
                    tracing::info!(
                        method = method.name(),
                        source = ?resolved.source,
                        "resolved download URL {}",
                        resolved.url
                    );
                    return Ok(resolved);
                }
                Ok(None) => {
                    tracing::debug!(method = method.name(), "no candidate");
                }
                Err(e) => {
                    tracing::warn!(method = method.name(), "discovery method failed: {}", e);
                }
            }
        }
        Err(ResolveError::NotFound {
            landing_page: landing.url().to_string(),
        })
    }
}
