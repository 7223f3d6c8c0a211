mod utils;

use utils::*;

use crate::types::RawWebSiteConfig;

/// Clean one raw locator.
///
/// Trims surrounding whitespace (including a stray BOM) and treats what is
/// left over as absent when it is empty.
///
/// # Examples
/// ```
/// use websource::tools::clean::clean_locator;
///
/// assert_eq!(
///     clean_locator(Some("   https://example.com/   ")),
///     Some("https://example.com/".to_string())
/// );
/// assert_eq!(clean_locator(Some(" \t\n")), None);
/// assert_eq!(clean_locator(None), None);
/// ```
pub fn clean_locator(raw: Option<&str>) -> Option<String> {
    let trimmed = trim_locator(raw?);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Clean both locators of a raw config.
pub fn clean_config(raw: &RawWebSiteConfig) -> RawWebSiteConfig {
    RawWebSiteConfig {
        source: clean_locator(raw.source.as_deref()),
        sitemap: clean_locator(raw.sitemap.as_deref()),
    }
}
