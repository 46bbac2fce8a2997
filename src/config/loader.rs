//! Configuration file discovery and loading.
//!
//! This module handles finding and loading configuration files from
//! the project directory in the correct priority order.

use crate::config::merger::merge_configs;
use crate::config::schema::PulseConfig;
use crate::error::{PulseError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".stackpulse";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. Project config (`.stackpulse/config.yml`)
/// 2. Local overrides (`.stackpulse/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .stackpulse/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .stackpulse/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_config_path(project_root)),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    /// Check if any config file exists.
    pub fn is_empty(&self) -> bool {
        self.project.is_none() && self.project_local.is_none()
    }
}

/// Location of the project config file, whether or not it exists.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.yml")
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file and parse it into PulseConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PulseConfig> {
    let content = read_config(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into PulseConfig.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PulseConfig> {
    if content.trim().is_empty() {
        return Ok(PulseConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| PulseError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as raw YAML Value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read_config(path)?;

    serde_yaml::from_str(&content).map_err(|e| PulseError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PulseError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PulseError::Io(e)
        }
    })
}

/// Load and merge the project config files.
///
/// With no config files present the built-in defaults are returned, so a
/// bare project still gets a report.
pub fn load_merged_config(project_root: &Path) -> Result<PulseConfig> {
    let paths = ConfigPaths::discover(project_root);

    if paths.is_empty() {
        tracing::debug!("No config in {}, using defaults", project_root.display());
        return Ok(PulseConfig::default());
    }

    let mut configs = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading config {}", path.display());
        configs.push(load_config_value(path)?);
    }

    let merged = merge_configs(&configs);

    serde_yaml::from_value(merged).map_err(|e| PulseError::ConfigParseError {
        path: project_config_path(project_root),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges the project config files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<PulseConfig> {
    if let Some(override_path) = config_override {
        load_config_file(override_path)
    } else {
        load_merged_config(project_root)
    }
}
