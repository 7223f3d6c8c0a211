//! Common types shared across tools

use serde::{Deserialize, Serialize};

/// Crawl budget advertised for site-crawl ingestion (45s).
pub const DEFAULT_CRAWL_BUDGET_MS: u64 = 45_000;

/// Page cap advertised for sitemap ingestion.
pub const DEFAULT_SITEMAP_PAGE_CAP: u32 = 500;

/// Knobs for validation and planning.
///
/// # Examples
/// ```
/// use websource::tools::types::SourceOptions;
///
/// let opts = SourceOptions::new()
///     .with_allowed_schemes(&["http", "https"])
///     .with_sitemap_page_cap(100);
/// assert!(opts.allows_scheme("https"));
/// assert!(!opts.allows_scheme("ftp"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// Accepted URL schemes (lowercase). `None` accepts any scheme with a host.
    pub allowed_schemes: Option<Vec<String>>,
    pub crawl_budget_ms: u64,
    pub sitemap_page_cap: u32,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            allowed_schemes: None,
            crawl_budget_ms: DEFAULT_CRAWL_BUDGET_MS,
            sitemap_page_cap: DEFAULT_SITEMAP_PAGE_CAP,
        }
    }
}

impl SourceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allowed_schemes(mut self, schemes: &[&str]) -> Self {
        self.allowed_schemes = Some(schemes.iter().map(|s| s.to_ascii_lowercase()).collect());
        self
    }

    pub fn with_crawl_budget_ms(mut self, ms: u64) -> Self {
        self.crawl_budget_ms = ms;
        self
    }

    pub fn with_sitemap_page_cap(mut self, pages: u32) -> Self {
        self.sitemap_page_cap = pages;
        self
    }

    pub fn allows_scheme(&self, scheme: &str) -> bool {
        match &self.allowed_schemes {
            Some(list) => list.iter().any(|s| s.eq_ignore_ascii_case(scheme)),
            None => true,
        }
    }
}
