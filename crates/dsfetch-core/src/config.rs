use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::landing::LandingPage;

/// Request timeouts in seconds (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connect timeout applied to every request.
    pub connect_secs: u64,
    /// Landing page GET.
    pub page_secs: u64,
    /// HEAD existence check of each probe candidate.
    pub probe_secs: u64,
    /// Final payload GET. Bodies can be large, so this is the longest.
    pub download_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 15,
            page_secs: 30,
            probe_secs: 10,
            download_secs: 60,
        }
    }
}

impl TimeoutConfig {
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    pub fn page(&self) -> Duration {
        Duration::from_secs(self.page_secs)
    }

    pub fn probe(&self) -> Duration {
        Duration::from_secs(self.probe_secs)
    }

    pub fn download(&self) -> Duration {
        Duration::from_secs(self.download_secs)
    }

    /// Rejects zero: curl treats a zero timeout as no limit at all.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("connect_secs", self.connect_secs),
            ("page_secs", self.page_secs),
            ("probe_secs", self.probe_secs),
            ("download_secs", self.download_secs),
        ];
        for (name, secs) in fields {
            if secs == 0 {
                bail!("timeouts.{} must be at least 1 second", name);
            }
        }
        Ok(())
    }
}

/// URL guessing used when the landing page yields nothing.
///
/// Templates understand `{origin}`, `{id}` and `{file}` placeholders. Candidates
/// are generated template-major, in the order listed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub path_templates: Vec<String>,
    pub filenames: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            path_templates: vec![
                "{origin}/bitstream/handle/20.500.11850/{id}/{file}".to_string(),
                "{origin}/entities/file/{id}/{file}".to_string(),
            ],
            filenames: vec![
                "Raw_data.csv".to_string(),
                "raw_data.csv".to_string(),
                "data.csv".to_string(),
            ],
        }
    }
}

/// Global configuration loaded from `~/.config/dsfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Human-facing dataset page.
    pub landing_page_url: String,
    /// Unique resource identifier of the dataset on the platform.
    pub identifier: String,
    /// Scheme + host used to absolutize relative links and fill probe templates.
    pub origin: String,
    /// File name the CLI saves the payload under.
    pub output_filename: String,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            landing_page_url: "https://www.research-collection.ethz.ch/entities/researchdata/160b68a0-cbfb-4b11-900c-3d144f41eb07".to_string(),
            identifier: "160b68a0-cbfb-4b11-900c-3d144f41eb07".to_string(),
            origin: "https://www.research-collection.ethz.ch".to_string(),
            output_filename: "data_raw.csv".to_string(),
            timeouts: TimeoutConfig::default(),
            probe: ProbeConfig::default(),
        }
    }
}

impl FetchConfig {
    pub fn landing_page(&self) -> LandingPage {
        LandingPage::new(&self.origin, &self.landing_page_url, &self.identifier)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dsfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<FetchConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.timeouts
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
