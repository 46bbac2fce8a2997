//! Status aggregation.
//!
//! Calls each source in a fixed order and turns the results into
//! [`StatEntry`] values: one per tracked package, then the last deployment,
//! then the security audit. Sources absorb their own failures, so a report
//! always has one entry per enabled source.

use chrono::{DateTime, Utc};
use std::path::Path;

use crate::audit::{AuditResult, AuditRunner};
use crate::config::{PulseConfig, TrackedPackage};
use crate::deploy::{format_relative_time, DeploymentReader, DeploymentRecord, NOT_AVAILABLE};
use crate::shell::CommandRunner;
use crate::versions::{JsonFetcher, VersionClient, VersionPair};

use super::entry::{StatColor, StatEntry};

/// Label of the deployment entry.
pub const DEPLOYMENT_LABEL: &str = "Last Deployment";

const DEPLOYMENT_ICON: &str = "heroicon-o-clock";
const SHIELD_ICON: &str = "heroicon-o-shield-check";
const WARNING_ICON: &str = "heroicon-o-exclamation-triangle";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Builds the status report from configured sources.
pub struct StatusAggregator<'a> {
    config: &'a PulseConfig,
    fetcher: &'a dyn JsonFetcher,
    runner: &'a dyn CommandRunner,
    project_root: &'a Path,
}

impl<'a> StatusAggregator<'a> {
    pub fn new(
        config: &'a PulseConfig,
        fetcher: &'a dyn JsonFetcher,
        runner: &'a dyn CommandRunner,
        project_root: &'a Path,
    ) -> Self {
        Self {
            config,
            fetcher,
            runner,
            project_root,
        }
    }

    /// Collect the report, with relative times measured from now.
    pub fn collect(&self) -> Vec<StatEntry> {
        self.collect_at(Utc::now())
    }

    /// Collect the report, with relative times measured from `now`.
    pub fn collect_at(&self, now: DateTime<Utc>) -> Vec<StatEntry> {
        let mut entries = Vec::with_capacity(self.config.packages.len() + 2);

        let client = VersionClient::new(
            self.fetcher,
            self.runner,
            &self.config.sources,
            self.project_root,
            self.config.timeouts.command(),
        );
        for package in &self.config.packages {
            let pair = client.version_pair(package);
            tracing::debug!(
                "{}: current={} latest={:?}",
                package.name,
                pair.current,
                pair.latest
            );
            entries.push(package_entry(package, &pair));
        }

        if self.config.show_deployment_info {
            let record = DeploymentReader::new(
                self.runner,
                self.project_root,
                &self.config.release_info_path,
                self.config.timeouts.command(),
            )
            .read();
            entries.push(deployment_entry(&record, now));
        }

        if self.config.show_audit_info {
            let result = AuditRunner::new(
                self.runner,
                self.project_root,
                &self.config.sources.audit_command,
                self.config.timeouts.command(),
            )
            .run();
            entries.push(audit_entry(&self.config.security_audit_label, &result));
        }

        entries
    }
}

/// Entry for one tracked package.
pub fn package_entry(package: &TrackedPackage, pair: &VersionPair) -> StatEntry {
    let entry = StatEntry::new(&package.display_name, &pair.current, &package.icon);

    match pair.latest.as_deref() {
        Some(latest) if pair.is_outdated() => entry
            .with_color(StatColor::Danger)
            .with_description(format!("{} available", latest)),
        _ => entry,
    }
}

/// Entry for the last deployment.
pub fn deployment_entry(record: &DeploymentRecord, now: DateTime<Utc>) -> StatEntry {
    let (value, title) = match record.timestamp {
        Some(timestamp) => (
            format_relative_time(timestamp, now),
            timestamp.format(TIMESTAMP_FORMAT).to_string(),
        ),
        None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
    };

    StatEntry::new(DEPLOYMENT_LABEL, value, DEPLOYMENT_ICON)
        .with_description(&record.message)
        .with_attribute("title", title)
}

/// Entry for the security audit.
pub fn audit_entry(label: &str, result: &AuditResult) -> StatEntry {
    match result {
        AuditResult::Secure => StatEntry::new(label, "Secure", SHIELD_ICON)
            .with_color(StatColor::Success),
        AuditResult::Vulnerable(count) => {
            StatEntry::new(label, format!("{} vulnerabilities", count), SHIELD_ICON)
                .with_color(StatColor::Danger)
        }
        AuditResult::CheckFailed(reason) => {
            StatEntry::new(label, format!("Check failed: {}", reason), WARNING_ICON)
                .with_color(StatColor::Warning)
        }
        AuditResult::Unknown => {
            StatEntry::new(label, "Parse error", WARNING_ICON).with_color(StatColor::Warning)
        }
    }
}
