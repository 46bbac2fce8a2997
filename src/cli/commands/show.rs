//! Show command implementation.
//!
//! The `stackpulse show` command collects the status report once and
//! prints it as a table, or as JSON with `--json`.

use chrono::Utc;
use std::path::{Path, PathBuf};

use crate::cli::args::ShowArgs;
use crate::config::{load_config, validate, PulseConfig};
use crate::error::{PulseError, Result};
use crate::shell::{CommandRunner, SystemRunner};
use crate::stats::StatusAggregator;
use crate::ui::{StatusReport, UserInterface};
use crate::versions::{HttpFetcher, JsonFetcher};

use super::dispatcher::{Command, CommandResult};

/// The show command implementation.
pub struct ShowCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: ShowArgs,
}

impl ShowCommand {
    /// Create a new show command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: ShowArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config =
            match load_valid_config(&self.project_root, self.config_override.as_deref()) {
                Ok(config) => config,
                Err(e) => return config_failure(ui, e),
            };

        let fetcher = HttpFetcher::with_timeout(config.timeouts.http())?;
        let runner = SystemRunner;

        let report = collect_report(&config, &fetcher, &runner, &self.project_root, ui);
        emit_report(ui, &report, self.args.json)?;

        Ok(CommandResult::success())
    }
}

/// Load configuration and reject it if invalid.
pub(crate) fn load_valid_config(
    project_root: &Path,
    config_override: Option<&Path>,
) -> Result<PulseConfig> {
    let config = load_config(project_root, config_override)?;
    validate(&config)?;
    Ok(config)
}

/// Report configuration problems to the user as exit code 2.
pub(crate) fn config_failure(ui: &mut dyn UserInterface, error: PulseError) -> Result<CommandResult> {
    match error {
        PulseError::ConfigNotFound { .. }
        | PulseError::ConfigParseError { .. }
        | PulseError::ConfigValidationError { .. } => {
            ui.error(&error.to_string());
            Ok(CommandResult::failure(2))
        }
        other => Err(other),
    }
}

/// Collect one report behind a spinner.
pub fn collect_report(
    config: &PulseConfig,
    fetcher: &dyn JsonFetcher,
    runner: &dyn CommandRunner,
    project_root: &Path,
    ui: &mut dyn UserInterface,
) -> StatusReport {
    let mut spinner = ui.start_spinner("Collecting system information...");
    let generated_at = Utc::now();
    let entries =
        StatusAggregator::new(config, fetcher, runner, project_root).collect_at(generated_at);
    spinner.finish();

    tracing::debug!("Collected {} entries", entries.len());
    StatusReport::new(&config.heading, generated_at, entries)
}

/// Print a report as a table or JSON.
pub fn emit_report(ui: &mut dyn UserInterface, report: &StatusReport, json: bool) -> Result<()> {
    if json {
        let json = report.to_json().map_err(|e| PulseError::Other(e.into()))?;
        ui.message(&json);
    } else {
        ui.report(report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PackageKind, TrackedPackage};
    use crate::shell::ScriptedRunner;
    use crate::ui::MockUI;
    use crate::versions::StaticFetcher;
    use std::fs;
    use tempfile::TempDir;

    const QUIET_CONFIG: &str = r#"
heading: Quiet
packages: []
show_deployment_info: false
show_audit_info: false
"#;

    fn setup_project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".stackpulse");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
        temp
    }

    #[test]
    fn show_renders_report() {
        let temp = setup_project(QUIET_CONFIG);
        let cmd = ShowCommand::new(temp.path(), None, ShowArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.reports().len(), 1);
        assert_eq!(ui.reports()[0].heading, "Quiet");
        assert!(ui.reports()[0].entries.is_empty());
    }

    #[test]
    fn show_json_prints_document() {
        let temp = setup_project(QUIET_CONFIG);
        let cmd = ShowCommand::new(temp.path(), None, ShowArgs { json: true });
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let json: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(json["heading"], "Quiet");
        assert_eq!(json["entries"], serde_json::json!([]));
        assert!(ui.reports().is_empty());
    }

    #[test]
    fn invalid_config_exits_with_two() {
        let temp = setup_project("packages:\n  - name: ''\n    display_name: Nameless\n    type: packagist\n");
        let cmd = ShowCommand::new(temp.path(), None, ShowArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("Invalid configuration"));
    }

    #[test]
    fn missing_override_exits_with_two() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let cmd = ShowCommand::new(temp.path(), Some(&missing), ShowArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("nope.yml"));
    }

    #[test]
    fn collect_report_uses_heading_and_spinner() {
        let temp = TempDir::new().unwrap();
        let config = PulseConfig {
            heading: "Production".to_string(),
            packages: vec![TrackedPackage::new(
                "php",
                "PHP",
                "heroicon-o-server",
                PackageKind::Runtime,
            )],
            show_deployment_info: false,
            show_audit_info: false,
            ..Default::default()
        };
        let fetcher = StaticFetcher::new();
        let runner = ScriptedRunner::new().succeed("php", "8.3.1");
        let mut ui = MockUI::new();

        let report = collect_report(&config, &fetcher, &runner, temp.path(), &mut ui);

        assert_eq!(report.heading, "Production");
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].value, "8.3.1");
        assert_eq!(ui.spinners().len(), 1);
    }
}
