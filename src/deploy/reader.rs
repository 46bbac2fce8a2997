//! Last deployment lookup.
//!
//! The most recent commit is read from git. Production deploys often ship
//! without `.git`, so a release file written at deploy time is consulted
//! when git has nothing to say.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::shell::{CommandOptions, CommandRunner};

/// Sentinel for deployment details that could not be read.
pub const NOT_AVAILABLE: &str = "N/A";

/// `git log` format: subject and committer unix timestamp.
const GIT_LOG_FORMAT: &str = "--format=%s|%ct";

/// Where a deployment record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentSource {
    Git,
    ReleaseFile,
    Unavailable,
}

/// Last deployment: when, and the commit message that shipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRecord {
    pub timestamp: Option<DateTime<Utc>>,
    pub message: String,
    pub source: DeploymentSource,
}

impl DeploymentRecord {
    /// The record used when no source produced anything.
    pub fn unavailable() -> Self {
        Self {
            timestamp: None,
            message: NOT_AVAILABLE.to_string(),
            source: DeploymentSource::Unavailable,
        }
    }
}

/// Reads the last deployment from git, falling back to a release file.
pub struct DeploymentReader<'a> {
    runner: &'a dyn CommandRunner,
    project_root: &'a Path,
    release_info_path: PathBuf,
    timeout: Duration,
}

impl<'a> DeploymentReader<'a> {
    /// `release_info_path` is resolved against `project_root` when relative.
    pub fn new(
        runner: &'a dyn CommandRunner,
        project_root: &'a Path,
        release_info_path: &Path,
        timeout: Duration,
    ) -> Self {
        Self {
            runner,
            project_root,
            release_info_path: project_root.join(release_info_path),
            timeout,
        }
    }

    /// Resolved path of the fallback release file.
    pub fn release_info_path(&self) -> &Path {
        &self.release_info_path
    }

    /// Read the last deployment. Never fails.
    pub fn read(&self) -> DeploymentRecord {
        self.from_git()
            .or_else(|| self.from_release_file())
            .unwrap_or_else(DeploymentRecord::unavailable)
    }

    fn from_git(&self) -> Option<DeploymentRecord> {
        let args: Vec<String> = ["log", GIT_LOG_FORMAT, "-1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let options = CommandOptions {
            cwd: Some(self.project_root.to_path_buf()),
            timeout: Some(self.timeout),
            ..Default::default()
        };

        let result = match self.runner.run("git", &args, &options) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!("git unavailable: {}", e);
                return None;
            }
        };

        if !result.success {
            tracing::debug!("git log failed: {}", result.stderr.trim());
            return None;
        }

        let (message, timestamp) = parse_git_line(&result.stdout)?;
        Some(DeploymentRecord {
            timestamp: Some(timestamp),
            message,
            source: DeploymentSource::Git,
        })
    }

    fn from_release_file(&self) -> Option<DeploymentRecord> {
        let content = match fs::read_to_string(&self.release_info_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(
                    "No release file at {}: {}",
                    self.release_info_path.display(),
                    e
                );
                return None;
            }
        };

        let (message, timestamp) = parse_release_line(&content)?;
        Some(DeploymentRecord {
            timestamp,
            message,
            source: DeploymentSource::ReleaseFile,
        })
    }
}

/// Parse `subject|unix_timestamp` as printed by `git log`.
///
/// The subject may itself contain `|`; the timestamp is after the last one.
pub fn parse_git_line(output: &str) -> Option<(String, DateTime<Utc>)> {
    let (message, timestamp) = output.trim().rsplit_once('|')?;
    let timestamp = parse_unix_timestamp(timestamp)?;
    Some((message.to_string(), timestamp))
}

/// Parse a release file line: `message|unix_timestamp|extra`.
///
/// Only the message is required. Returns `None` for an empty file.
pub fn parse_release_line(content: &str) -> Option<(String, Option<DateTime<Utc>>)> {
    let line = content.trim();
    if line.is_empty() {
        return None;
    }

    let mut fields = line.splitn(3, '|');
    let message = fields.next().unwrap_or_default().to_string();
    let timestamp = fields.next().and_then(parse_unix_timestamp);

    Some((message, timestamp))
}

fn parse_unix_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let secs: i64 = raw.trim().parse().ok()?;
    DateTime::from_timestamp(secs, 0)
}
