//! CLI for dsfetch.

mod commands;
pub(crate) mod report;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dsfetch_core::config::{self, FetchConfig};
use dsfetch_core::landing::LandingPage;
use std::path::PathBuf;

use commands::{run_fetch, run_resolve};

/// Top-level CLI for dsfetch.
#[derive(Debug, Parser)]
#[command(name = "dsfetch")]
#[command(about = "dsfetch: find and download a dataset CSV from its landing page", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/dsfetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides for the dataset named in the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// Landing page URL of the dataset.
    #[arg(long, value_name = "URL")]
    pub landing_url: Option<String>,

    /// Dataset identifier used in guessed download URLs.
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,

    /// Platform origin (scheme://host). Defaults to the landing page's origin
    /// when --landing-url is given.
    #[arg(long, value_name = "URL")]
    pub origin: Option<String>,
}

impl TargetArgs {
    pub fn apply(&self, cfg: &mut FetchConfig) {
        if let Some(url) = &self.landing_url {
            cfg.landing_page_url = url.clone();
            if self.origin.is_none() {
                if let Some(origin) = LandingPage::origin_of(url) {
                    cfg.origin = origin;
                }
            }
        }
        if let Some(id) = &self.id {
            cfg.identifier = id.clone();
        }
        if let Some(origin) = &self.origin {
            cfg.origin = origin.clone();
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Find the dataset CSV, download it, check it and save it.
    Fetch {
        #[command(flatten)]
        target: TargetArgs,

        /// Where to save the file (default: output_filename from config, in the current directory).
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Only find the download URL and print it.
    Resolve {
        #[command(flatten)]
        target: TargetArgs,

        /// Print the URL and how it was found as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };

        match cli.command {
            CliCommand::Fetch { target, output } => {
                target.apply(&mut cfg);
                tracing::debug!("effective config: {:?}", cfg);
                let output = output.unwrap_or_else(|| PathBuf::from(&cfg.output_filename));
                run_fetch(&cfg, &output)?;
            }
            CliCommand::Resolve { target, json } => {
                target.apply(&mut cfg);
                tracing::debug!("effective config: {:?}", cfg);
                run_resolve(&cfg, json)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
