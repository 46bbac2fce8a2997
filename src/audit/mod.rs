//! Dependency security audit.
//!
//! Runs the audit tool (by default `composer audit --format=json`) and
//! reduces whatever it prints to an [`AuditResult`].
//!
//! # Classification
//!
//! Audit tools are inconsistent about output: warnings can precede the
//! JSON on stdout, and trivial projects may get plain text instead of JSON.
//! Results are therefore classified in priority order:
//!
//! 1. JSON with an `advisories` key: vulnerable if non-empty, else secure
//! 2. Non-zero exit: check failed, with stderr as the reason
//! 3. A known "nothing found" phrase on stdout: secure
//! 4. Anything else: unknown

use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PulseError, Result};
use crate::shell::{CommandOptions, CommandResult, CommandRunner};

/// Plain-text outputs that mean the audit found nothing.
const SECURE_PHRASES: &[&str] = &[
    "No packages",
    "No security vulnerability advisories found",
];

/// Outcome of one audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum AuditResult {
    /// No advisories.
    Secure,
    /// Number of packages with advisories.
    Vulnerable(usize),
    /// The audit could not be run or reported an error.
    CheckFailed(String),
    /// The audit ran but its output was not understood.
    Unknown,
}

/// Runs the configured audit command in an isolated tool home.
pub struct AuditRunner<'a> {
    runner: &'a dyn CommandRunner,
    project_root: &'a Path,
    command: &'a [String],
    timeout: Duration,
    scratch_dir: PathBuf,
}

impl<'a> AuditRunner<'a> {
    /// Create a runner using the system temp directory as tool home.
    pub fn new(
        runner: &'a dyn CommandRunner,
        project_root: &'a Path,
        command: &'a [String],
        timeout: Duration,
    ) -> Self {
        Self {
            runner,
            project_root,
            command,
            timeout,
            scratch_dir: std::env::temp_dir(),
        }
    }

    /// Use `dir` instead of the system temp directory as tool home.
    pub fn with_scratch_dir(mut self, dir: PathBuf) -> Self {
        self.scratch_dir = dir;
        self
    }

    /// Run the audit. Never fails; errors become [`AuditResult::CheckFailed`].
    pub fn run(&self) -> AuditResult {
        match self.invoke() {
            Ok(result) => classify(&result),
            Err(e) => {
                tracing::warn!("Security audit could not run: {}", e);
                AuditResult::CheckFailed(e.to_string())
            }
        }
    }

    fn invoke(&self) -> Result<CommandResult> {
        let (program, args) =
            self.command
                .split_first()
                .ok_or_else(|| PulseError::EmptyCommand {
                    purpose: "audit".to_string(),
                })?;

        // The tool's cache and config must be writable even when the
        // process user has no usable home directory.
        let tool_home = self.scratch_dir.join("composer");
        fs::create_dir_all(&tool_home)?;

        let mut options = CommandOptions {
            cwd: Some(self.project_root.to_path_buf()),
            timeout: Some(self.timeout),
            ..Default::default()
        };
        options.env.insert(
            "COMPOSER_HOME".to_string(),
            tool_home.to_string_lossy().into_owned(),
        );
        options.env.insert(
            "HOME".to_string(),
            self.scratch_dir.to_string_lossy().into_owned(),
        );

        self.runner.run(program, args, &options)
    }
}

/// Classify a finished audit run.
pub fn classify(result: &CommandResult) -> AuditResult {
    let stdout = result.stdout.trim();

    if let Some(count) = advisory_count(stdout) {
        return if count > 0 {
            AuditResult::Vulnerable(count)
        } else {
            AuditResult::Secure
        };
    }

    if !result.success {
        let stderr = result.stderr.trim();
        let reason = if stderr.is_empty() {
            "Unknown error"
        } else {
            stderr
        };
        return AuditResult::CheckFailed(reason.to_string());
    }

    if SECURE_PHRASES.iter().any(|phrase| stdout.contains(phrase)) {
        return AuditResult::Secure;
    }

    tracing::debug!("Unrecognized audit output: {}", stdout);
    AuditResult::Unknown
}

/// Number of entries under `advisories`, if stdout carries audit JSON.
///
/// Leading non-JSON lines (deprecation notices and the like) are skipped.
fn advisory_count(stdout: &str) -> Option<usize> {
    let document = parse_json(stdout).or_else(|| {
        let start = stdout.find('{')?;
        parse_json(&stdout[start..])
    })?;

    match document.get("advisories")? {
        Value::Null => None,
        Value::Object(map) => Some(map.len()),
        Value::Array(items) => Some(items.len()),
        _ => Some(0),
    }
}

fn parse_json(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}
