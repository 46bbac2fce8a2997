//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, ShowArgs};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, config_override: Option<PathBuf>) -> Self {
        Self {
            project_root,
            config_override,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.config_override.as_deref();

        match &cli.command {
            Some(Commands::Show(args)) => {
                let cmd = super::show::ShowCommand::new(&self.project_root, config, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Watch(args)) => {
                let cmd = super::watch::WatchCommand::new(&self.project_root, config, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Init(args)) => {
                let cmd = super::init::InitCommand::new(&self.project_root, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Config(args)) => {
                let cmd =
                    super::config::ConfigCommand::new(&self.project_root, config, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd =
                    super::show::ShowCommand::new(&self.project_root, config, ShowArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
