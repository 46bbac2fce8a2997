//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Stackpulse - Version and deployment health report for PHP application stacks.
#[derive(Debug, Parser)]
#[command(name = "stackpulse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .stackpulse/config.yml)
    #[arg(short, long, global = true, env = "STACKPULSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the status report once (default if no command specified)
    Show(ShowArgs),

    /// Redraw the status report on an interval
    Watch(WatchArgs),

    /// Write a default configuration file
    Init(InitArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `watch` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct WatchArgs {
    /// Refresh interval such as 30s or 5m (overrides polling_interval)
    #[arg(short, long)]
    pub interval: Option<String>,

    /// Stop after this many refreshes
    #[arg(short = 'n', long)]
    pub iterations: Option<u32>,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Print the JSON Schema of the configuration file instead
    #[arg(long)]
    pub schema: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
