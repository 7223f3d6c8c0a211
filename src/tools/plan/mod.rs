//! Plan Tools


pub mod types;

pub use types::*;

use crate::tools::types::SourceOptions;
use crate::types::{Domain, IngestMode, WebSiteConfig};

/// Build the ingestion plan for a validated config.
///
/// Site crawls get the crawl budget; sitemaps get the page cap. Nothing here
/// enforces either one.
///
/// # Examples
/// ```
/// use websource::tools::plan::plan;
/// use websource::tools::types::SourceOptions;
/// use websource::tools::validate::validate;
/// use websource::RawWebSiteConfig;
///
/// let cfg = validate(&RawWebSiteConfig::new().with_source("https://Example.com/")).unwrap();
/// let plan = plan(&cfg, &SourceOptions::default());
/// assert_eq!(plan.domain.0, "example.com");
/// assert_eq!(plan.limits.max_duration_ms, Some(45_000));
/// assert_eq!(plan.limits.max_pages, None);
/// ```
pub fn plan(cfg: &WebSiteConfig, opts: &SourceOptions) -> IngestPlan {
    let url = cfg.governing_url().clone();
    let domain = cfg
        .domain()
        .unwrap_or_else(|| Domain::from_raw(url.host_str().unwrap_or_default()));

    let limits = match cfg.mode() {
        IngestMode::SiteCrawl => IngestLimits {
            max_duration_ms: Some(opts.crawl_budget_ms),
            max_pages: None,
        },
        IngestMode::Sitemap => IngestLimits {
            max_duration_ms: None,
            max_pages: Some(opts.sitemap_page_cap),
        },
    };

    IngestPlan {
        mode: cfg.mode(),
        url,
        domain,
        limits,
    }
}
