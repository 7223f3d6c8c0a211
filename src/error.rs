use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Locator;

pub type Result<T> = std::result::Result<T, WebSourceError>;

/// Message shown on both locator inputs when neither one was filled in.
pub const EMPTY_CONFIG_MESSAGE: &str = "You must provide either a web site URL or a sitemap URL";

/// Message attached to a locator that is not an absolute URL.
pub const INVALID_URL_MESSAGE: &str = "Invalid url";

/// One field-scoped problem, ready for a form layer to highlight.
///
/// `path` may name more than one field when a single rule spans several inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: &[&str], message: impl Into<String>) -> Self {
        Self {
            path: path.iter().map(|p| p.to_string()).collect(),
            message: message.into(),
        }
    }
}

/// Why a web site config was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", EMPTY_CONFIG_MESSAGE)]
    EmptyConfig,
    #[error("invalid url in {}: {:?} ({})", .locator.path(), .value, .reason)]
    MalformedUrl {
        locator: Locator,
        value: String,
        reason: String,
    },
}

impl ValidationError {
    /// Field-scoped entries for the form layer. Never empty.
    pub fn issues(&self) -> Vec<ValidationIssue> {
        match self {
            ValidationError::EmptyConfig => vec![ValidationIssue::new(
                &[Locator::Sitemap.path(), Locator::Source.path()],
                EMPTY_CONFIG_MESSAGE,
            )],
            ValidationError::MalformedUrl { locator, .. } => {
                vec![ValidationIssue::new(&[locator.path()], INVALID_URL_MESSAGE)]
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum WebSourceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid datasource: {}", summarize(.0))]
    Rejected(Vec<ValidationIssue>),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

impl WebSourceError {
    /// Field-scoped entries carried by this error (empty for non-validation errors).
    pub fn issues(&self) -> Vec<ValidationIssue> {
        match self {
            WebSourceError::Validation(e) => e.issues(),
            WebSourceError::Rejected(issues) => issues.clone(),
            _ => Vec::new(),
        }
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.path.join(" | "), i.message))
        .collect::<Vec<_>>()
        .join("; ")
}
