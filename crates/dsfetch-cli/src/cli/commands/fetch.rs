//! `dsfetch fetch` – resolve, download, validate and save the dataset CSV.

use anyhow::{Context, Result};
use dsfetch_core::acquire;
use dsfetch_core::config::FetchConfig;
use dsfetch_core::http::CurlTransport;
use dsfetch_core::storage;
use std::path::Path;

use crate::cli::report::{failure_headline, group_thousands, manual_fallback, Reported};

pub fn run_fetch(cfg: &FetchConfig, output: &Path) -> Result<()> {
    let transport = CurlTransport::new(cfg.timeouts.connect());
    println!("Locating download link on {} ...", cfg.landing_page_url);

    let acquired = match acquire::acquire(&transport, cfg) {
        Ok(a) => a,
        Err(err) => {
            tracing::error!(stage = ?err.stage(), "acquire failed: {}", err);
            eprintln!("{}", failure_headline(&err));
            eprintln!("\n{}", manual_fallback(err.landing_page(), output));
            return Err(anyhow::anyhow!(Reported));
        }
    };
    println!("Downloaded data from: {}", acquired.resolved.url);

    let written = storage::persist(&acquired.payload, output)
        .with_context(|| format!("save {}", output.display()))
        .inspect_err(|_| eprintln!("\n{}", manual_fallback(&cfg.landing_page_url, output)))?;

    println!(
        "Download complete! Saved as {} ({} bytes)",
        output.display(),
        group_thousands(written)
    );
    println!("sha256 {}", acquired.payload.sha256_hex());
    Ok(())
}
