//! Resolve-then-fetch for one landing page.

use crate::config::FetchConfig;
use crate::error::AcquireError;
use crate::fetcher::{self, FetchedPayload};
use crate::http::Transport;
use crate::resolver::{ResolvedUrl, Resolver};

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct Acquired {
    pub resolved: ResolvedUrl,
    pub payload: FetchedPayload,
}

/// Resolve the configured landing page, then download and validate the file.
///
/// The fetch stage only runs after discovery has committed to a URL; a
/// resolution failure means no download is attempted.
pub fn acquire(transport: &dyn Transport, cfg: &FetchConfig) -> Result<Acquired, AcquireError> {
    let landing = cfg.landing_page();
    let resolved = Resolver::new(transport, cfg).resolve(&landing)?;
    let payload = fetcher::fetch(transport, &resolved, cfg.timeouts.download()).map_err(
        |source| AcquireError::Fetch {
            landing_page: landing.url().to_string(),
            source,
        },
    )?;
    Ok(Acquired { resolved, payload })
}
