//! Validate Tools

mod utils;

use crate::error::ValidationError;
use crate::tools::clean::clean_locator;
use crate::tools::types::SourceOptions;
use crate::types::{IngestMode, Locator, RawWebSiteConfig, WebSiteConfig};

/// Validate a raw web site config with default options.
///
/// Locators are trimmed first; blank ones count as absent. The sitemap is
/// checked before the source: a present sitemap decides the outcome on its
/// own and the source is never looked at.
///
/// # Examples
/// ```
/// use websource::tools::validate::validate;
/// use websource::{IngestMode, RawWebSiteConfig};
///
/// let raw = RawWebSiteConfig::new()
///     .with_sitemap("https://example.com/sitemap.xml")
///     .with_source("not a url");
/// let cfg = validate(&raw).unwrap();
/// assert_eq!(cfg.mode(), IngestMode::Sitemap);
/// assert_eq!(cfg.source(), Some("not a url"));
/// ```
pub fn validate(raw: &RawWebSiteConfig) -> Result<WebSiteConfig, ValidationError> {
    validate_with(raw, &SourceOptions::default())
}

/// Validate a raw web site config.
pub fn validate_with(
    raw: &RawWebSiteConfig,
    opts: &SourceOptions,
) -> Result<WebSiteConfig, ValidationError> {
    let source = clean_locator(raw.source.as_deref());
    let sitemap = clean_locator(raw.sitemap.as_deref());

    let (mode, url) = if let Some(text) = sitemap.as_deref() {
        let url = utils::parse_locator(Locator::Sitemap, text, opts)?;
        (IngestMode::Sitemap, url)
    } else if let Some(text) = source.as_deref() {
        let url = utils::parse_locator(Locator::Source, text, opts)?;
        (IngestMode::SiteCrawl, url)
    } else {
        return Err(ValidationError::EmptyConfig);
    };

    Ok(WebSiteConfig {
        source,
        sitemap,
        mode,
        url,
    })
}

/// Check one locator on its own, outside the sitemap-first ordering.
///
/// Useful for per-field feedback while the user is still typing. Blank input
/// yields `Ok(None)`.
pub fn validate_locator(
    locator: Locator,
    raw: Option<&str>,
    opts: &SourceOptions,
) -> Result<Option<url::Url>, ValidationError> {
    match clean_locator(raw) {
        Some(text) => utils::parse_locator(locator, &text, opts).map(Some),
        None => Ok(None),
    }
}
