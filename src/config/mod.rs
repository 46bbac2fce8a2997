//! Configuration loading, parsing, and validation for stackpulse.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use stackpulse::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".stackpulse");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "heading: Production").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.heading, "Production");
//! ```
//!
//! # Configuration File Locations
//!
//! 1. Project config (`.stackpulse/config.yml`)
//! 2. Local overrides (`.stackpulse/config.local.yml`)
//!
//! Without either file the built-in defaults apply.

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    load_config, load_config_file, load_merged_config, parse_config, project_config_path,
    ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{
    parse_interval, PackageKind, PulseConfig, SourceSettings, Timeouts, TrackedPackage,
};
pub use validator::{validate, validate_config, ValidationError};
