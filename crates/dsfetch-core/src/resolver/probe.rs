//! Pattern probe: guess direct download URLs and keep the first that exists.

use std::time::Duration;

use super::{Discovery, ResolvedUrl, Source};
use crate::config::ProbeConfig;
use crate::error::DiscoveryError;
use crate::http::Transport;
use crate::landing::LandingPage;

/// Candidate URLs in probe order: every filename for the first template, then
/// every filename for the next one.
pub fn candidates(cfg: &ProbeConfig, landing: &LandingPage) -> Vec<String> {
    cfg.path_templates
        .iter()
        .flat_map(|template| {
            cfg.filenames.iter().map(move |file| {
                template
                    .replace("{origin}", landing.origin())
                    .replace("{id}", landing.identifier())
                    .replace("{file}", file)
            })
        })
        .collect()
}

/// Discovery method 2: HEAD each candidate until one answers 200.
#[derive(Debug, Clone)]
pub struct PatternProbe {
    cfg: ProbeConfig,
    timeout: Duration,
}

impl PatternProbe {
    pub fn new(cfg: ProbeConfig, timeout: Duration) -> Self {
        Self { cfg, timeout }
    }
}

impl Discovery for PatternProbe {
    fn name(&self) -> &'static str {
        "pattern-probe"
    }

    fn discover(
        &self,
        landing: &LandingPage,
        transport: &dyn Transport,
    ) -> Result<Option<ResolvedUrl>, DiscoveryError> {
        let urls = candidates(&self.cfg, landing);
        for url in &urls {
            match transport.head(url, self.timeout) {
                Ok(r) if r.status == 200 => {
                    return Ok(Some(ResolvedUrl {
                        url: url.clone(),
                        source: Source::Probe,
                    }));
                }
                Ok(r) => tracing::debug!(status = r.status, "probe miss {}", url),
                Err(e) => tracing::debug!("probe error: {}", e),
            }
        }
        Err(DiscoveryError::ProbeExhausted { tried: urls.len() })
    }
}
