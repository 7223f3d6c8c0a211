use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{Domain, IngestMode};

/// Limits the ingestion pipeline is expected to honor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IngestLimits {
    /// Wall-clock budget for discovering pages (site crawl).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_ms: Option<u64>,
    /// Maximum number of pages taken from the sitemap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,
}

/// Plain-data hand-off to the ingestion pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestPlan {
    pub mode: IngestMode,
    pub url: Url,
    pub domain: Domain,
    pub limits: IngestLimits,
}
