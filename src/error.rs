//! Error types for stackpulse operations.
//!
//! This module defines [`PulseError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Data sources (registry, git, audit) absorb their own failures and
//!   degrade to sentinel values; their errors never reach the report
//! - `PulseError` covers what can legitimately stop a command: bad
//!   configuration, I/O, and command plumbing
//! - Use `anyhow::Error` (via `PulseError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stackpulse operations.
#[derive(Debug, Error)]
pub enum PulseError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// External command could not be started.
    #[error("Failed to start '{program}': {message}")]
    CommandSpawn { program: String, message: String },

    /// A command line was configured with no program in it.
    #[error("No {purpose} command configured")]
    EmptyCommand { purpose: String },

    /// External command exceeded its time budget and was killed.
    #[error("Command '{program}' timed out after {secs}s")]
    CommandTimeout { program: String, secs: u64 },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for stackpulse operations.
pub type Result<T> = std::result::Result<T, PulseError>;
