use std::time::Instant;

use crate::log::ActivityLogger;
use crate::tools::plan::{plan, IngestPlan};
use crate::tools::types::SourceOptions;
use crate::tools::validate::validate_with;
use crate::{error::*, types::*};

/* ------------ base fields ------------ */

/// Checks the fields every datasource shares (name, type, project).
///
/// Supplied by the host application; the web site rules never look at these.
pub trait BaseValidator: Send + Sync {
    fn validate_base<C>(&self, ds: &UpsertDatasource<C>) -> Vec<ValidationIssue>;
}

/// Default base check: `name` and `projectId` must not be blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredFields;

impl BaseValidator for RequiredFields {
    fn validate_base<C>(&self, ds: &UpsertDatasource<C>) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if ds.name.trim().is_empty() {
            issues.push(ValidationIssue::new(&["name"], "Name is required"));
        }
        if ds.project_id.trim().is_empty() {
            issues.push(ValidationIssue::new(&["projectId"], "Project is required"));
        }
        issues
    }
}

/// Force the datasource type a web site form always submits.
pub fn web_site_defaults<C>(mut ds: UpsertDatasource<C>) -> UpsertDatasource<C> {
    ds.datasource_type = DatasourceType::WebSite;
    ds
}

/* ------------ public facade components ------------ */

pub struct Submitter<B: BaseValidator = RequiredFields> {
    pub base: B,
    pub options: SourceOptions,
    pub logger: Option<ActivityLogger>,
}

impl Default for Submitter<RequiredFields> {
    fn default() -> Self {
        Self {
            base: RequiredFields,
            options: SourceOptions::default(),
            // Logging is best effort; no home dir means no log.
            logger: ActivityLogger::new().ok(),
        }
    }
}

impl<B: BaseValidator> Submitter<B> {
    pub fn new(base: B, options: SourceOptions, logger: Option<ActivityLogger>) -> Self {
        Self {
            base,
            options,
            logger,
        }
    }

    /// Validate a web site datasource create-or-update request.
    ///
    /// Base-field issues and config issues are reported together so the form
    /// can highlight every offending input in one pass.
    pub fn submit(
        &self,
        ds: UpsertDatasource<RawWebSiteConfig>,
    ) -> Result<UpsertDatasource<WebSiteConfig>> {
        let start_time = Instant::now();
        let result = self.check(ds);
        let duration = start_time.elapsed();

        match &result {
            Ok(validated) => {
                let domain = validated.config.domain();
                let details = format!(
                    "{:?} succeeded in {}ms",
                    validated.config.mode(),
                    duration.as_millis()
                );
                self.log_info(domain.as_ref().map(|d| d.0.as_str()), "submit_datasource", &details);
            }
            Err(e) => {
                let details = format!("failed in {}ms: {}", duration.as_millis(), e);
                self.log_error(None, "submit_datasource", &details);
            }
        }

        result
    }

    /// Validate a bare config and build its ingestion plan.
    pub fn plan(&self, raw: &RawWebSiteConfig) -> Result<IngestPlan> {
        let start_time = Instant::now();
        let result = validate_with(raw, &self.options).map(|cfg| plan(&cfg, &self.options));
        let duration = start_time.elapsed();

        match result {
            Ok(p) => {
                let details = format!("{:?} succeeded in {}ms", p.mode, duration.as_millis());
                self.log_info(Some(&p.domain.0), "plan_ingest", &details);
                Ok(p)
            }
            Err(e) => {
                let details = format!("failed in {}ms: {}", duration.as_millis(), e);
                self.log_error(None, "plan_ingest", &details);
                Err(e.into())
            }
        }
    }

    fn check(
        &self,
        ds: UpsertDatasource<RawWebSiteConfig>,
    ) -> Result<UpsertDatasource<WebSiteConfig>> {
        let mut issues = self.base.validate_base(&ds);
        if ds.datasource_type != DatasourceType::WebSite {
            issues.push(ValidationIssue::new(&["type"], "Expected a web_site datasource"));
        }

        match validate_with(&ds.config, &self.options) {
            Ok(cfg) if issues.is_empty() => Ok(ds.map_config(|_| cfg)),
            Ok(_) => Err(WebSourceError::Rejected(issues)),
            Err(e) => {
                issues.extend(e.issues());
                Err(WebSourceError::Rejected(issues))
            }
        }
    }

    // Logging errors never break a submission.
    fn log_info(&self, domain: Option<&str>, event: &str, details: &str) {
        if let Some(logger) = &self.logger {
            let _ = logger.info(domain, event, Some(details));
        }
    }

    fn log_error(&self, domain: Option<&str>, event: &str, details: &str) {
        if let Some(logger) = &self.logger {
            let _ = logger.error(domain, event, Some(details));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(source: Option<&str>, sitemap: Option<&str>) -> UpsertDatasource<RawWebSiteConfig> {
        UpsertDatasource {
            id: None,
            name: "Docs".into(),
            datasource_type: DatasourceType::WebSite,
            project_id: "proj_1".into(),
            config: RawWebSiteConfig {
                source: source.map(str::to_string),
                sitemap: sitemap.map(str::to_string),
            },
        }
    }

    fn quiet() -> Submitter {
        Submitter::new(RequiredFields, SourceOptions::default(), None)
    }

    #[test]
    fn test_submit_ok_keeps_base_fields() {
        let out = quiet()
            .submit(request(Some(" https://example.com/ "), None))
            .unwrap();
        assert_eq!(out.name, "Docs");
        assert_eq!(out.project_id, "proj_1");
        assert_eq!(out.config.source(), Some("https://example.com/"));
        assert_eq!(out.config.mode(), IngestMode::SiteCrawl);
    }

    #[test]
    fn test_submit_merges_issues() {
        let mut req = request(None, None);
        req.name = "  ".into();
        let err = quiet().submit(req).unwrap_err();
        let issues = err.issues();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].path, vec!["name"]);
        assert_eq!(issues[1].path, vec!["config.sitemap", "config.source"]);
    }

    #[test]
    fn test_submit_rejects_base_even_when_config_ok() {
        let mut req = request(Some("https://example.com/"), None);
        req.project_id = String::new();
        let err = quiet().submit(req).unwrap_err();
        assert!(matches!(err, WebSourceError::Rejected(_)));
        assert_eq!(err.issues()[0].path, vec!["projectId"]);
    }

    #[test]
    fn test_submit_rejects_wrong_type() {
        let mut req = request(Some("https://example.com/"), None);
        req.datasource_type = DatasourceType::File;
        let err = quiet().submit(req).unwrap_err();
        assert_eq!(err.issues()[0].path, vec!["type"]);

        let fixed = web_site_defaults(request(Some("https://example.com/"), None));
        assert!(quiet().submit(fixed).is_ok());
    }

    #[test]
    fn test_submit_logs_outcomes() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = ActivityLogger::in_dir(tmp.path()).unwrap();
        let submitter = Submitter::new(RequiredFields, SourceOptions::default(), Some(logger.clone()));

        submitter
            .submit(request(None, Some("https://example.com/sitemap.xml")))
            .unwrap();
        submitter.submit(request(None, Some("ftp:/bad"))).unwrap_err();

        let lines = logger.read_logs(None, false).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("submit_datasource * failed"));
        assert!(lines[1].contains("submit_datasource example.com Sitemap succeeded"));
        assert_eq!(logger.read_logs(None, true).unwrap().len(), 1);
    }

    #[test]
    fn test_plan_uses_options() {
        let submitter = Submitter::new(
            RequiredFields,
            SourceOptions::new().with_sitemap_page_cap(10),
            None,
        );
        let p = submitter
            .plan(&RawWebSiteConfig::new().with_sitemap("https://example.com/sitemap.xml"))
            .unwrap();
        assert_eq!(p.limits.max_pages, Some(10));

        let err = submitter.plan(&RawWebSiteConfig::new()).unwrap_err();
        assert!(matches!(
            err,
            WebSourceError::Validation(ValidationError::EmptyConfig)
        ));
    }

    #[test]
    fn test_plan_logs_outcomes() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = ActivityLogger::in_dir(tmp.path()).unwrap();
        let submitter = Submitter::new(RequiredFields, SourceOptions::default(), Some(logger.clone()));

        submitter
            .plan(&RawWebSiteConfig::new().with_source("https://example.com/"))
            .unwrap();
        submitter.plan(&RawWebSiteConfig::new()).unwrap_err();

        let lines = logger.read_logs(None, false).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("plan_ingest * failed in"));
        assert!(lines[1].contains("plan_ingest example.com SiteCrawl succeeded in"));
        assert_eq!(logger.read_logs(None, true).unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_json_shape() {
        let req: UpsertDatasource<RawWebSiteConfig> = serde_json::from_str(
            r#"{"name":"Docs","type":"web_site","projectId":"p","config":{"source":"https://example.com/"}}"#,
        )
        .unwrap();
        let out = quiet().submit(req).unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["projectId"], "p");
        assert_eq!(json["type"], "web_site");
        assert_eq!(json["config"]["mode"], "site_crawl");
    }
}
