//! Configuration schema definitions for stackpulse.
//!
//! This module contains all the struct definitions that map to
//! the YAML configuration file format.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for `.stackpulse/config.yml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PulseConfig {
    /// Heading shown above the report
    pub heading: String,

    /// How often `watch` refreshes, e.g. "60s", "5m". "off" disables polling.
    pub polling_interval: Option<String>,

    /// Packages whose versions are reported, in display order
    pub packages: Vec<TrackedPackage>,

    /// Show the last deployment entry
    pub show_deployment_info: bool,

    /// Show the security audit entry
    pub show_audit_info: bool,

    /// Fallback deployment file (relative to project root)
    pub release_info_path: PathBuf,

    /// Label for the security audit entry
    pub security_audit_label: String,

    /// Where versions and audit results come from
    pub sources: SourceSettings,

    /// Time budgets for network calls and subprocesses
    pub timeouts: Timeouts,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            heading: "System Information".to_string(),
            polling_interval: Some("60s".to_string()),
            packages: default_packages(),
            show_deployment_info: true,
            show_audit_info: true,
            release_info_path: PathBuf::from(".release-info"),
            security_audit_label: "Composer Security Audit".to_string(),
            sources: SourceSettings::default(),
            timeouts: Timeouts::default(),
        }
    }
}

impl PulseConfig {
    /// Resolved polling interval, `None` when polling is disabled.
    pub fn polling_interval(&self) -> std::result::Result<Option<Duration>, String> {
        match &self.polling_interval {
            None => Ok(None),
            Some(raw) => parse_interval(raw),
        }
    }
}

/// A package whose version is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrackedPackage {
    /// Registry name (e.g. "laravel/framework") or runtime name
    pub name: String,

    /// Label shown for the entry
    #[serde(alias = "displayName")]
    pub display_name: String,

    /// Icon reference passed through to the renderer
    #[serde(default = "default_package_icon")]
    pub icon: String,

    /// Where the version comes from
    #[serde(rename = "type")]
    pub kind: PackageKind,
}

impl TrackedPackage {
    /// Create a tracked package.
    pub fn new(name: &str, display_name: &str, icon: &str, kind: PackageKind) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            icon: icon.to_string(),
            kind,
        }
    }
}

/// Version source for a tracked package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum PackageKind {
    /// Installed version from `composer.lock`, latest from the package registry
    #[serde(rename = "packagist", alias = "registry")]
    Registry,

    /// Running interpreter version, latest from the runtime release index
    #[serde(rename = "php", alias = "runtime")]
    Runtime,
}

/// Endpoints and external tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SourceSettings {
    /// Base URL of the package registry
    pub registry_url: String,

    /// URL of the runtime release index
    pub runtime_releases_url: String,

    /// Interpreter binary used to read the running runtime version
    pub runtime_binary: String,

    /// Audit tool invocation; must emit JSON
    pub audit_command: Vec<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            registry_url: "https://packagist.org".to_string(),
            runtime_releases_url: "https://www.php.net/releases/active.php".to_string(),
            runtime_binary: "php".to_string(),
            audit_command: vec![
                "composer".to_string(),
                "audit".to_string(),
                "--format=json".to_string(),
            ],
        }
    }
}

/// Time budgets in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Timeouts {
    /// Per HTTP request
    pub http_secs: u64,

    /// Per subprocess (git, audit tool, runtime binary)
    pub command_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            http_secs: 10,
            command_secs: 30,
        }
    }
}

impl Timeouts {
    pub fn http(&self) -> Duration {
        Duration::from_secs(self.http_secs)
    }

    pub fn command(&self) -> Duration {
        Duration::from_secs(self.command_secs)
    }
}

fn default_packages() -> Vec<TrackedPackage> {
    vec![
        TrackedPackage::new(
            "laravel/framework",
            "Laravel Version",
            "heroicon-o-cpu-chip",
            PackageKind::Registry,
        ),
        TrackedPackage::new(
            "php",
            "PHP Version",
            "heroicon-o-code-bracket",
            PackageKind::Runtime,
        ),
        TrackedPackage::new(
            "filament/filament",
            "Filament Version",
            "heroicon-o-squares-2x2",
            PackageKind::Registry,
        ),
    ]
}

fn default_package_icon() -> String {
    "heroicon-o-cube".to_string()
}

/// Parse an interval such as `"60s"`, `"5m"`, `"1h"` or a bare number of
/// seconds. `"off"` yields `None`.
pub fn parse_interval(raw: &str) -> std::result::Result<Option<Duration>, String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("off") || trimmed.eq_ignore_ascii_case("never") {
        return Ok(None);
    }

    let (number, multiplier) = match trimmed.char_indices().last() {
        Some((idx, 's')) => (&trimmed[..idx], 1),
        Some((idx, 'm')) => (&trimmed[..idx], 60),
        Some((idx, 'h')) => (&trimmed[..idx], 3600),
        _ => (trimmed, 1),
    };

    let value: u64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid interval '{}'", raw))?;

    if value == 0 {
        return Err(format!("interval '{}' must be greater than zero", raw));
    }

    let secs = value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("interval '{}' is too large", raw))?;
    Ok(Some(Duration::from_secs(secs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_track_three_packages() {
        let config = PulseConfig::default();
        let names: Vec<_> = config.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["laravel/framework", "php", "filament/filament"]);
        assert_eq!(config.packages[1].kind, PackageKind::Runtime);
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: PulseConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, PulseConfig::default());
    }

    #[test]
    fn parses_package_type_tags() {
        let yaml = r#"
packages:
  - name: symfony/console
    display_name: Console
    icon: heroicon-o-command-line
    type: packagist
  - name: php
    displayName: PHP
    type: runtime
"#;
        let config: PulseConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.packages.len(), 2);
        assert_eq!(config.packages[0].kind, PackageKind::Registry);
        assert_eq!(config.packages[1].kind, PackageKind::Runtime);
        assert_eq!(config.packages[1].display_name, "PHP");
        assert_eq!(config.packages[1].icon, "heroicon-o-cube");
    }

    #[test]
    fn rejects_unknown_package_type() {
        let yaml = "packages:\n  - name: x\n    display_name: X\n    type: npm\n";
        let result: Result<PulseConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn partial_sources_keep_other_defaults() {
        let yaml = "sources:\n  runtime_binary: /usr/bin/php8.3\n";
        let config: PulseConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sources.runtime_binary, "/usr/bin/php8.3");
        assert_eq!(config.sources.registry_url, "https://packagist.org");
    }

    #[test]
    fn parse_interval_units() {
        assert_eq!(parse_interval("60s").unwrap(), Some(Duration::from_secs(60)));
        assert_eq!(parse_interval("5m").unwrap(), Some(Duration::from_secs(300)));
        assert_eq!(parse_interval("1h").unwrap(), Some(Duration::from_secs(3600)));
        assert_eq!(parse_interval("90").unwrap(), Some(Duration::from_secs(90)));
        assert_eq!(parse_interval("off").unwrap(), None);
    }

    #[test]
    fn parse_interval_rejects_garbage() {
        assert!(parse_interval("soon").is_err());
        assert!(parse_interval("0s").is_err());
        assert!(parse_interval("").is_err());
    }

    #[test]
    fn parse_interval_rejects_overflowing_hours() {
        let err = parse_interval("9999999999999999h").unwrap_err();
        assert!(err.contains("too large"));
        assert_eq!(
            parse_interval("18446744073709551615s").unwrap(),
            Some(Duration::from_secs(u64::MAX))
        );
    }

    #[test]
    fn null_polling_interval_disables_polling() {
        let config: PulseConfig = serde_yaml::from_str("polling_interval: null").unwrap();
        assert_eq!(config.polling_interval().unwrap(), None);
    }

    #[test]
    fn timeouts_convert_to_durations() {
        let timeouts = Timeouts::default();
        assert_eq!(timeouts.http(), Duration::from_secs(10));
        assert_eq!(timeouts.command(), Duration::from_secs(30));
    }
}
