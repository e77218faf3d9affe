//! The dataset's human-facing page and link normalization against its origin.

/// Landing page reference: the platform origin, the page URL, and the
/// dataset's unique identifier on that platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingPage {
    origin: String,
    url: String,
    identifier: String,
}

impl LandingPage {
    /// A trailing `/` on `origin` is dropped so joins never double it.
    pub fn new(origin: &str, url: &str, identifier: &str) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            url: url.to_string(),
            identifier: identifier.to_string(),
        }
    }

    /// `scheme://host[:port]` of `url`, if it parses as a URL with a host.
    pub fn origin_of(url: &str) -> Option<String> {
        let parsed = url::Url::parse(url).ok()?;
        parsed.host_str()?;
        Some(parsed.origin().ascii_serialization())
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Turns a scraped `href` into an absolute URL.
    ///
    /// - `http…` is returned unchanged
    /// - `/path` is prefixed with the origin
    /// - anything else is prefixed with origin + `/`; it is not resolved
    ///   against the landing page's own path, so `../x` or `?q` stay as-is
    pub fn absolutize(&self, href: &str) -> String {
        if href.starts_with("http") {
            href.to_string()
        } else if href.starts_with('/') {
            format!("{}{}", self.origin, href)
        } else {
            format!("{}/{}", self.origin, href)
        }
    }

    /// Like [`absolutize`](Self::absolutize) but only for hrefs that are
    /// already absolute or rooted. Used for download affordances.
    pub fn absolutize_rooted(&self, href: &str) -> Option<String> {
        if href.starts_with("http") || href.starts_with('/') {
            Some(self.absolutize(href))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> LandingPage {
        LandingPage::new(
            "https://repo.example.org/",
            "https://repo.example.org/items/abc",
            "abc",
        )
    }

    #[test]
    fn origin_trailing_slash_dropped() {
        assert_eq!(page().origin(), "https://repo.example.org");
    }

    #[test]
    fn origin_of_url() {
        assert_eq!(
            LandingPage::origin_of("https://repo.example.org/items/abc?x=1").as_deref(),
            Some("https://repo.example.org")
        );
        assert_eq!(
            LandingPage::origin_of("http://127.0.0.1:8080/p").as_deref(),
            Some("http://127.0.0.1:8080")
        );
        assert_eq!(LandingPage::origin_of("not a url"), None);
    }

    #[test]
    fn absolutize_variants() {
        let p = page();
        assert_eq!(
            p.absolutize("https://cdn.example.org/a.csv"),
            "https://cdn.example.org/a.csv"
        );
        assert_eq!(
            p.absolutize("/foo/Raw_data.csv"),
            "https://repo.example.org/foo/Raw_data.csv"
        );
        assert_eq!(
            p.absolutize("files/a.csv"),
            "https://repo.example.org/files/a.csv"
        );
    }

    #[test]
    fn absolutize_non_rooted_is_not_resolved_against_page_path() {
        assert_eq!(
            page().absolutize("../up.csv"),
            "https://repo.example.org/../up.csv"
        );
    }

    #[test]
    fn absolutize_rooted_skips_bare_relative() {
        let p = page();
        assert_eq!(p.absolutize_rooted("files/a.csv"), None);
        assert_eq!(
            p.absolutize_rooted("/a.csv").as_deref(),
            Some("https://repo.example.org/a.csv")
        );
    }
}
