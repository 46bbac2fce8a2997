//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`stackpulse show`, `stackpulse watch`)
//! - Shared configuration loading and report collection
//! - Consistent global flag handling

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod init;
pub mod show;
pub mod watch;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
