//! Stackpulse - Application stack status at a glance.
//!
//! Stackpulse reports the health of a PHP application's stack: installed
//! versus latest versions of tracked packages and the runtime, the last
//! deployment, and the result of a dependency security audit.
//!
//! # Modules
//!
//! - [`audit`] - Dependency security audit
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`deploy`] - Last deployment lookup
//! - [`error`] - Error types and result aliases
//! - [`shell`] - External command execution
//! - [`stats`] - Status report assembly
//! - [`ui`] - Report rendering, spinners, and terminal output
//! - [`versions`] - Current and latest version lookup
//!
//! # Example
//!
//! ```
//! use stackpulse::config::PulseConfig;
//! use stackpulse::shell::ScriptedRunner;
//! use stackpulse::stats::StatusAggregator;
//! use stackpulse::versions::StaticFetcher;
//!
//! let config = PulseConfig {
//!     packages: Vec::new(),
//!     show_audit_info: false,
//!     ..Default::default()
//! };
//! let fetcher = StaticFetcher::new();
//! let runner = ScriptedRunner::new();
//! let root = std::env::temp_dir();
//!
//! let entries = StatusAggregator::new(&config, &fetcher, &runner, &root).collect();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].label, "Last Deployment");
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod error;
pub mod shell;
pub mod stats;
pub mod ui;
pub mod versions;

pub use error::{PulseError, Result};
