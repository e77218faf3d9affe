//! Page scrape: fetch the landing page and look for the data file in it.
//!
//! Three scans run over the parsed document in a fixed order (links, download
//! affordances, scripts). Each is a plain function of the document so it can
//! be tested against an HTML fixture without any network.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::time::Duration;

use super::{Discovery, ResolvedUrl, Source};
use crate::error::DiscoveryError;
use crate::http::Transport;
use crate::landing::LandingPage;

static LINKS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));
static DOWNLOAD_AFFORDANCES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[download], button[download]").expect("valid selector"));
static SCRIPTS: Lazy<Selector> = Lazy::new(|| Selector::parse("script").expect("valid selector"));
static SCRIPT_CSV_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s"'<>]+\.csv"#).expect("valid regex"));

/// Label fragment the dataset uses for its data file.
const LABEL_HINT: &str = "raw_data";

type Scan = fn(&Html, &LandingPage) -> Option<String>;

/// Scans in the order they are tried.
const SCANS: &[(Source, Scan)] = &[
    (Source::Link, scan_links),
    (Source::DownloadAffordance, scan_download_affordances),
    (Source::Script, scan_scripts),
];

fn contains_csv(s: &str) -> bool {
    s.to_ascii_lowercase().contains(".csv")
}

/// First `<a href>` whose target contains `.csv` or whose visible text
/// contains `raw_data` (both case-insensitive), absolutized.
pub fn scan_links(doc: &Html, landing: &LandingPage) -> Option<String> {
    doc.select(&LINKS).find_map(|a| {
        let href = a.value().attr("href").unwrap_or_default();
        let text = a.text().collect::<String>();
        let label_hit = text.trim().to_lowercase().contains(LABEL_HINT);
        (contains_csv(href) || label_hit).then(|| landing.absolutize(href))
    })
}

/// First `a`/`button` carrying a `download` attribute whose `href` contains
/// `.csv`. Only absolute or rooted hrefs qualify.
pub fn scan_download_affordances(doc: &Html, landing: &LandingPage) -> Option<String> {
    doc.select(&DOWNLOAD_AFFORDANCES).find_map(|el| {
        let href = el.value().attr("href").filter(|h| !h.is_empty())?;
        if !contains_csv(href) {
            return None;
        }
        landing.absolutize_rooted(href)
    })
}

/// First literal `http(s)://….csv` inside any `<script>`, in document order.
pub fn scan_scripts(doc: &Html, _landing: &LandingPage) -> Option<String> {
    doc.select(&SCRIPTS).find_map(|script| {
        let body = script.text().collect::<String>();
        SCRIPT_CSV_URL.find(&body).map(|m| m.as_str().to_string())
    })
}

/// Runs every scan over `html` and returns the first hit.
pub fn scrape_document(html: &str, landing: &LandingPage) -> Option<ResolvedUrl> {
    let doc = Html::parse_document(html);
    SCANS.iter().find_map(|(source, scan)| {
        let url = scan(&doc, landing)?;
        tracing::debug!(source = ?source, "scrape hit {}", url);
        Some(ResolvedUrl {
            url,
            source: *source,
        })
    })
}

/// Discovery method 1: GET the landing page and scrape it.
///
/// Scraped URLs are trusted without a liveness check.
#[derive(Debug, Clone)]
pub struct PageScrape {
    timeout: Duration,
}

impl PageScrape {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Discovery for PageScrape {
    fn name(&self) -> &'static str {
        "page-scrape"
    }

    fn discover(
        &self,
        landing: &LandingPage,
        transport: &dyn Transport,
    ) -> Result<Option<ResolvedUrl>, DiscoveryError> {
        let failed = |reason: String| DiscoveryError::ScrapeFailed {
            url: landing.url().to_string(),
            reason,
        };
        let response = transport
            .get(landing.url(), self.timeout)
            .map_err(|e| failed(e.to_string()))?;
        if !response.is_success() {
            return Err(failed(format!("HTTP {}", response.status)));
        }
        let html = String::from_utf8_lossy(&response.body);
        Ok(scrape_document(&html, landing))
    }
}
