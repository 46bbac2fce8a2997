//! Config command implementation.
//!
//! The `stackpulse config` command shows resolved configuration, or the
//! JSON Schema of the configuration file with `--schema`.

use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::{load_config, ConfigPaths, PulseConfig};
use crate::error::{PulseError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::show::config_failure;

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: ConfigArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }
}

/// JSON Schema of the configuration file.
pub fn config_schema() -> Result<String> {
    let schema = schemars::schema_for!(PulseConfig);
    serde_json::to_string_pretty(&schema).map_err(|e| PulseError::Other(e.into()))
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.schema {
            ui.message(&config_schema()?);
            return Ok(CommandResult::success());
        }

        let config = match load_config(&self.project_root, self.config_override.as_deref()) {
            Ok(c) => c,
            Err(e) => return config_failure(ui, e),
        };

        // Show config file path(s)
        let sources: Vec<PathBuf> = match &self.config_override {
            Some(path) => vec![path.clone()],
            None => ConfigPaths::discover(&self.project_root)
                .all_existing()
                .into_iter()
                .cloned()
                .collect(),
        };
        if sources.is_empty() {
            ui.message("# built-in defaults");
        }
        for path in &sources {
            ui.message(&format!("# {}", path.display()));
        }

        let yaml = serde_yaml::to_string(&config).map_err(|e| PulseError::Other(e.into()))?;
        ui.message(&yaml);

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".stackpulse");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
        temp
    }

    #[test]
    fn shows_defaults_without_files() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("# built-in defaults"));
        assert!(ui.has_message("heading: System Information"));
    }

    #[test]
    fn shows_config_path_and_merged_values() {
        let temp = setup_project("heading: Staging\n");
        fs::write(
            temp.path().join(".stackpulse/config.local.yml"),
            "show_audit_info: false\n",
        )
        .unwrap();
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("config.yml"));
        assert!(ui.has_message("config.local.yml"));
        assert!(ui.has_message("heading: Staging"));
        assert!(ui.has_message("show_audit_info: false"));
    }

    #[test]
    fn unparsable_config_exits_with_two() {
        let temp = setup_project("packages: [unclosed\n");
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("Failed to parse config"));
    }

    #[test]
    fn prints_schema() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs { schema: true });
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let schema: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(schema["title"], "PulseConfig");
        assert!(schema["properties"]["packages"].is_object());
    }
}
