use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::WebSourceError;

const INFO_MARK: &str = "🟢";
const ERROR_MARK: &str = "🔴";

// Line layout: <date> <time> UTC <mark> <event> <domain> <details...>
const MARK_COLUMN: usize = 3;
const DOMAIN_COLUMN: usize = 5;

fn column(line: &str, idx: usize) -> Option<&str> {
    line.split_whitespace().nth(idx)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub domain: Option<String>,
    pub event: String,
    pub details: Option<String>,
}

/// Append-only activity log, one line per event.
#[derive(Debug, Clone)]
pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    /// Logger at `~/.websource/activity.log`.
    pub fn new() -> crate::Result<Self> {
        let user_dirs = directories::UserDirs::new().ok_or_else(|| {
            WebSourceError::Other("could not determine home directory".into())
        })?;
        Self::in_dir(user_dirs.home_dir().join(".websource"))
    }

    /// Logger writing `activity.log` inside `dir` (created if missing).
    pub fn in_dir(dir: impl AsRef<Path>) -> crate::Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            log_path: dir.join("activity.log"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn log(
        &self,
        level: LogLevel,
        domain: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> crate::Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            domain: domain.map(|d| d.to_string()),
            event: event.to_string(),
            details: details.map(|d| d.to_string()),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        let level_str = match entry.level {
            LogLevel::Info => INFO_MARK,
            LogLevel::Error => ERROR_MARK,
        };

        let domain_str = entry.domain.as_deref().unwrap_or("*");
        let details_str = entry.details.as_deref().unwrap_or("");

        writeln!(
            file,
            "{} {} {} {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            level_str,
            entry.event,
            domain_str,
            details_str
        )?;

        Ok(())
    }

    /// Matching lines, most recent first.
    pub fn read_logs(
        &self,
        domain_filter: Option<&str>,
        errors_only: bool,
    ) -> crate::Result<Vec<String>> {
        if !self.log_path.exists() {
            return Ok(vec![]);
        }

        let file = fs::File::open(&self.log_path)?;
        let reader = BufReader::new(file);
        let mut matching_lines = Vec::new();

        for line in reader.lines() {
            let line = line?;

            if errors_only && column(&line, MARK_COLUMN) != Some(ERROR_MARK) {
                continue;
            }

            if let Some(domain) = domain_filter {
                if column(&line, DOMAIN_COLUMN) != Some(domain) {
                    continue;
                }
            }

            matching_lines.push(line);
        }

        matching_lines.reverse();
        Ok(matching_lines)
    }

    pub fn info(
        &self,
        domain: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> crate::Result<()> {
        self.log(LogLevel::Info, domain, event, details)
    }

    pub fn error(
        &self,
        domain: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> crate::Result<()> {
        self.log(LogLevel::Error, domain, event, details)
    }
}
