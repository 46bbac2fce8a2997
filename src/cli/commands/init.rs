//! Init command implementation.
//!
//! The `stackpulse init` command writes `.stackpulse/config.yml` with the
//! built-in defaults spelled out, ready for editing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::{project_config_path, PulseConfig};
use crate::error::{PulseError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const CONFIG_PREAMBLE: &str = "\
# stackpulse configuration
# Local overrides go in .stackpulse/config.local.yml
";

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    fn config_path(&self) -> PathBuf {
        project_config_path(&self.project_root)
    }
}

/// The default configuration as YAML.
pub fn default_config_yaml() -> Result<String> {
    let body = serde_yaml::to_string(&PulseConfig::default())
        .map_err(|e| PulseError::Other(e.into()))?;
    Ok(format!("{}{}", CONFIG_PREAMBLE, body))
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = self.config_path();

        if path.exists() && !self.args.force {
            ui.warning("Configuration already exists. Use --force to overwrite.");
            return Ok(CommandResult::failure(1));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, default_config_yaml()?)?;

        ui.success(&format!("Created {}", path.display()));
        Ok(CommandResult::success())
    }
}
