use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};

use crate::api::Submitter;
use crate::log::ActivityLogger;
use crate::tools::types::SourceOptions;
use crate::tools::validate::validate_with;
use crate::{ApiResponse, Domain, RawWebSiteConfig, UpsertDatasource, WebSourceError};

#[derive(Parser)]
#[command(name = "websource", version, about = "Web site datasource config validation (JSON only)")]
pub struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a site URL / sitemap URL pair
    Validate(ConfigArgs),
    /// Validate, then print the ingestion plan
    Plan(PlanArgs),
    /// Validate a full datasource request (JSON from stdin)
    Submit(OptionArgs),
    /// Show the activity log, newest first
    Logs(LogsArgs),
}

#[derive(Args)]
struct ConfigArgs {
    /// Web site URL (crawl entry point). Use `-` to read a config JSON from stdin.
    #[arg(long)]
    source: Option<String>,
    /// Sitemap URL (checked first)
    #[arg(long)]
    sitemap: Option<String>,
    #[command(flatten)]
    opts: OptionArgs,
}

#[derive(Args)]
struct OptionArgs {
    /// Restrict accepted URL schemes (repeatable)
    #[arg(long = "allow-scheme")]
    allow_schemes: Vec<String>,
}

#[derive(Args)]
struct PlanArgs {
    #[command(flatten)]
    config: ConfigArgs,
    #[arg(long)]
    crawl_budget_ms: Option<u64>,
    #[arg(long)]
    sitemap_page_cap: Option<u32>,
}

#[derive(Args)]
struct LogsArgs {
    #[arg(long)]
    domain: Option<String>,
    #[arg(long = "errors")]
    errors_only: bool,
}

impl OptionArgs {
    fn to_options(&self) -> SourceOptions {
        if self.allow_schemes.is_empty() {
            return SourceOptions::default();
        }
        let schemes: Vec<&str> = self.allow_schemes.iter().map(String::as_str).collect();
        SourceOptions::new().with_allowed_schemes(&schemes)
    }
}

impl ConfigArgs {
    fn to_raw(&self) -> anyhow::Result<RawWebSiteConfig> {
        if self.source.as_deref() == Some("-") {
            if self.sitemap.is_some() {
                anyhow::bail!("--sitemap cannot be combined with --source - (put it in the stdin json)");
            }
            let buf = read_stdin()?;
            return serde_json::from_str(&buf).context("invalid config json");
        }
        Ok(RawWebSiteConfig {
            source: self.source.clone(),
            sitemap: self.sitemap.clone(),
        })
    }
}

pub fn run() {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Validate(args) => match args.to_raw() {
            Ok(raw) => finish(validate_with(&raw, &args.opts.to_options()).map_err(WebSourceError::from)),
            Err(e) => fail(format!("{e:#}")),
        },
        Command::Plan(args) => {
            let mut options = args.config.opts.to_options();
            if let Some(ms) = args.crawl_budget_ms {
                options = options.with_crawl_budget_ms(ms);
            }
            if let Some(cap) = args.sitemap_page_cap {
                options = options.with_sitemap_page_cap(cap);
            }
            let submitter = Submitter {
                options,
                ..Submitter::default()
            };
            match args.config.to_raw() {
                Ok(raw) => finish(submitter.plan(&raw)),
                Err(e) => fail(format!("{e:#}")),
            }
        }
        Command::Submit(opts) => {
            let submitter = Submitter {
                options: opts.to_options(),
                ..Submitter::default()
            };
            let parsed = read_stdin().and_then(|buf| {
                serde_json::from_str::<UpsertDatasource<RawWebSiteConfig>>(&buf)
                    .context("invalid datasource json")
            });
            match parsed {
                Ok(ds) => finish(submitter.submit(ds)),
                Err(e) => fail(format!("{e:#}")),
            }
        }
        Command::Logs(args) => {
            let lines = ActivityLogger::new()
                .and_then(|logger| {
                    let domain = args.domain.as_deref().map(Domain::from_raw);
                    logger.read_logs(domain.as_ref().map(|d| d.0.as_str()), args.errors_only)
                });
            finish(lines);
        }
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

fn finish<T: serde::Serialize>(res: crate::Result<T>) {
    match res {
        Ok(v) => print_json(ApiResponse::ok(v)),
        Err(e) => {
            print_json(ApiResponse::<()>::rejected(e.to_string(), e.issues()));
            std::process::exit(1);
        }
    }
}

fn fail(msg: String) {
    print_json(ApiResponse::<()>::err(msg));
    std::process::exit(1);
}

fn print_json<T: serde::Serialize>(val: T) {
    match serde_json::to_string_pretty(&val) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_args(source: Option<&str>, sitemap: Option<&str>) -> ConfigArgs {
        ConfigArgs {
            source: source.map(str::to_string),
            sitemap: sitemap.map(str::to_string),
            opts: OptionArgs {
                allow_schemes: Vec::new(),
            },
        }
    }

    #[test]
    fn test_stdin_source_rejects_sitemap_flag() {
        let err = config_args(Some("-"), Some("https://example.com/sitemap.xml"))
            .to_raw()
            .unwrap_err();
        assert!(err.to_string().contains("--sitemap cannot be combined"));
    }

    #[test]
    fn test_flags_build_raw_config() {
        let raw = config_args(Some("https://example.com/"), Some("https://example.com/sitemap.xml"))
            .to_raw()
            .unwrap();
        assert_eq!(raw.source.as_deref(), Some("https://example.com/"));
        assert_eq!(raw.sitemap.as_deref(), Some("https://example.com/sitemap.xml"));
    }

    #[test]
    fn test_allow_scheme_flags() {
        let mut args = config_args(None, None);
        assert_eq!(args.opts.to_options(), SourceOptions::default());
        args.opts.allow_schemes = vec!["HTTPS".into()];
        let opts = args.opts.to_options();
        assert!(opts.allows_scheme("https"));
        assert!(!opts.allows_scheme("http"));
    }
}
