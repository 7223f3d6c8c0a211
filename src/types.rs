use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ValidationError, ValidationIssue};

/// One of the two locator inputs of a web site datasource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locator {
    Source,
    Sitemap,
}

impl Locator {
    /// Form path of the field, as the rendering layer registers it.
    pub fn path(self) -> &'static str {
        match self {
            Locator::Source => "config.source",
            Locator::Sitemap => "config.sitemap",
        }
    }
}

/// How ingestion walks the site once the config is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestMode {
    /// Enumerate the pages listed by the sitemap.
    Sitemap,
    /// Discover pages by crawling from the site entry point.
    SiteCrawl,
}

impl IngestMode {
    /// Field that governs this mode.
    pub fn locator(self) -> Locator {
        match self {
            IngestMode::Sitemap => Locator::Sitemap,
            IngestMode::SiteCrawl => Locator::Source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain(pub String);

impl Domain {
    /// Canonicalize host to a stable key: lowercase + IDNA/Punycode
    fn canonicalize(host: &str) -> String {
        let lower = host.to_ascii_lowercase();
        idna::domain_to_ascii(&lower).unwrap_or(lower)
    }

    pub fn from_url(url: &Url) -> Option<Self> {
        url.domain().map(|d| Domain(Self::canonicalize(d)))
    }

    /// Build a Domain from raw user text (CLI, API callers, etc.)
    pub fn from_raw(host: &str) -> Self {
        Domain(Self::canonicalize(host))
    }
}

/// Raw config as submitted by the form, before trimming or checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWebSiteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sitemap: Option<String>,
}

impl RawWebSiteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    pub fn with_sitemap(mut self, sitemap: &str) -> Self {
        self.sitemap = Some(sitemap.to_string());
        self
    }
}

/// A web site config that passed validation.
///
/// Both trimmed locators are kept even when only one of them governs
/// ingestion; `mode` records which one won. Only buildable through
/// [`crate::tools::validate::validate`] (or by deserializing, which runs it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWebSiteConfig")]
pub struct WebSiteConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sitemap: Option<String>,
    pub(crate) mode: IngestMode,
    #[serde(skip_serializing)]
    pub(crate) url: Url,
}

impl WebSiteConfig {
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn sitemap(&self) -> Option<&str> {
        self.sitemap.as_deref()
    }

    pub fn mode(&self) -> IngestMode {
        self.mode
    }

    /// Parsed URL of the locator that governs ingestion.
    pub fn governing_url(&self) -> &Url {
        &self.url
    }

    pub fn domain(&self) -> Option<Domain> {
        Domain::from_url(&self.url)
    }

    /// Back to the raw shape (trimmed values), e.g. for re-submission.
    pub fn to_raw(&self) -> RawWebSiteConfig {
        RawWebSiteConfig {
            source: self.source.clone(),
            sitemap: self.sitemap.clone(),
        }
    }
}

impl TryFrom<RawWebSiteConfig> for WebSiteConfig {
    type Error = ValidationError;

    fn try_from(raw: RawWebSiteConfig) -> std::result::Result<Self, Self::Error> {
        crate::tools::validate::validate(&raw)
    }
}

/// Kinds of datasource a project can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DatasourceType {
    WebPage,
    #[default]
    WebSite,
    Text,
    File,
}

/// Create-or-update payload for a datasource; `C` is the per-type config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertDatasource<C> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub datasource_type: DatasourceType,
    #[serde(default)]
    pub project_id: String,
    pub config: C,
}

impl<C> UpsertDatasource<C> {
    /// Swap the config, keeping the base fields.
    pub fn map_config<D>(self, f: impl FnOnce(C) -> D) -> UpsertDatasource<D> {
        UpsertDatasource {
            id: self.id,
            name: self.name,
            datasource_type: self.datasource_type,
            project_id: self.project_id,
            config: f(self.config),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssue>,
}
impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
            issues: Vec::new(),
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
            issues: Vec::new(),
        }
    }
    pub fn rejected(msg: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self {
            issues,
            ..Self::err(msg)
        }
    }
}
