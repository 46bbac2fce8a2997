//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - Packages must have a name and a display name
//! - Package names must be unique per source kind
//! - The polling interval must parse
//! - The audit command must name a program
//! - Timeouts must be non-zero

use crate::config::schema::PulseConfig;
use crate::error::{PulseError, Result};
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Package name if error is package-specific
    pub package: Option<String>,
}

impl ValidationError {
    fn new(rule: &str, message: String, package: Option<&str>) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            package: package.map(String::from),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &PulseConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_packages(config));
    errors.extend(validate_settings(config));

    errors
}

fn validate_packages(config: &PulseConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, package) in config.packages.iter().enumerate() {
        if package.name.trim().is_empty() {
            errors.push(ValidationError::new(
                "missing-name",
                format!("Package #{} has an empty name", index + 1),
                None,
            ));
            continue;
        }

        if package.display_name.trim().is_empty() {
            errors.push(ValidationError::new(
                "missing-display-name",
                format!("Package '{}' has an empty display_name", package.name),
                Some(&package.name),
            ));
        }

        if !seen.insert((package.kind, package.name.as_str())) {
            errors.push(ValidationError::new(
                "duplicate-package",
                format!("Package '{}' is listed more than once", package.name),
                Some(&package.name),
            ));
        }
    }

    errors
}

fn validate_settings(config: &PulseConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Err(message) = config.polling_interval() {
        errors.push(ValidationError::new(
            "invalid-polling-interval",
            format!("polling_interval: {}", message),
            None,
        ));
    }

    let audit_program = config.sources.audit_command.first();
    if config.show_audit_info && audit_program.is_none_or(|p| p.trim().is_empty()) {
        errors.push(ValidationError::new(
            "empty-audit-command",
            "sources.audit_command must name a program".to_string(),
            None,
        ));
    }

    if config.timeouts.http_secs == 0 {
        errors.push(ValidationError::new(
            "zero-timeout",
            "timeouts.http_secs must be greater than zero".to_string(),
            None,
        ));
    }

    if config.timeouts.command_secs == 0 {
        errors.push(ValidationError::new(
            "zero-timeout",
            "timeouts.command_secs must be greater than zero".to_string(),
            None,
        ));
    }

    errors
}

/// Validate a configuration, returning a single error that lists every
/// problem found.
pub fn validate(config: &PulseConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(PulseError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{PackageKind, TrackedPackage};

    fn rules(config: &PulseConfig) -> Vec<String> {
        validate_config(config).into_iter().map(|e| e.rule).collect()
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&PulseConfig::default()).is_ok());
    }

    #[test]
    fn rejects_empty_package_name() {
        let mut config = PulseConfig::default();
        config.packages.push(TrackedPackage::new("", "Blank", "x", PackageKind::Registry));
        assert_eq!(rules(&config), vec!["missing-name"]);
    }

    #[test]
    fn rejects_empty_display_name() {
        let mut config = PulseConfig::default();
        config.packages.push(TrackedPackage::new(
            "symfony/console",
            " ",
            "x",
            PackageKind::Registry,
        ));
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].package.as_deref(), Some("symfony/console"));
    }

    #[test]
    fn rejects_duplicate_package() {
        let mut config = PulseConfig::default();
        let first = config.packages[0].clone();
        config.packages.push(first);
        assert_eq!(rules(&config), vec!["duplicate-package"]);
    }

    #[test]
    fn same_name_with_different_kind_is_allowed() {
        let mut config = PulseConfig::default();
        config.packages.push(TrackedPackage::new(
            "php",
            "PHP polyfill",
            "x",
            PackageKind::Registry,
        ));
        assert!(rules(&config).is_empty());
    }

    #[test]
    fn rejects_bad_polling_interval() {
        let config = PulseConfig {
            polling_interval: Some("whenever".to_string()),
            ..Default::default()
        };
        assert_eq!(rules(&config), vec!["invalid-polling-interval"]);
    }

    #[test]
    fn rejects_polling_interval_that_overflows() {
        let config = PulseConfig {
            polling_interval: Some("9999999999999999h".to_string()),
            ..Default::default()
        };
        assert_eq!(rules(&config), vec!["invalid-polling-interval"]);
    }

    #[test]
    fn empty_audit_command_only_matters_when_audit_shown() {
        let mut config = PulseConfig::default();
        config.sources.audit_command.clear();
        assert_eq!(rules(&config), vec!["empty-audit-command"]);

        config.show_audit_info = false;
        assert!(rules(&config).is_empty());
    }

    #[test]
    fn collects_every_error() {
        let mut config = PulseConfig::default();
        config.timeouts.http_secs = 0;
        config.timeouts.command_secs = 0;
        config.polling_interval = Some("x".to_string());

        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("http_secs"));
        assert!(err.contains("command_secs"));
        assert!(err.contains("polling_interval"));
    }
}
