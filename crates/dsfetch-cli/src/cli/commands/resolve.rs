//! `dsfetch resolve` – print the discovered download URL without downloading.

use anyhow::Result;
use dsfetch_core::config::FetchConfig;
use dsfetch_core::http::CurlTransport;
use dsfetch_core::resolver::Resolver;
use std::path::Path;

use crate::cli::report::{manual_fallback, Reported};

pub fn run_resolve(cfg: &FetchConfig, json: bool) -> Result<()> {
    let transport = CurlTransport::new(cfg.timeouts.connect());
    let landing = cfg.landing_page();
    let resolved = Resolver::new(&transport, cfg)
        .resolve(&landing)
        .map_err(|err| {
            tracing::error!("resolve failed: {}", err);
            eprintln!("Could not automatically find download link.");
            eprintln!(
                "\n{}",
                manual_fallback(landing.url(), Path::new(&cfg.output_filename))
            );
            anyhow::anyhow!(Reported)
        })?;
    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        println!("{}", resolved.url);
    }
    Ok(())
}
