//! Watch command implementation.
//!
//! The `stackpulse watch` command redraws the status report every
//! polling interval until interrupted or until `--iterations` refreshes.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::cli::args::WatchArgs;
use crate::config::{parse_interval, PulseConfig};
use crate::error::Result;
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;
use crate::versions::{HttpFetcher, JsonFetcher};

use super::dispatcher::{Command, CommandResult};
use super::show::{collect_report, config_failure, emit_report, load_valid_config};

/// The watch command implementation.
pub struct WatchCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: WatchArgs,
}

impl WatchCommand {
    /// Create a new watch command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: WatchArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// Refresh interval: `--interval` if given, else the configured one.
    pub fn interval(&self, config: &PulseConfig) -> std::result::Result<Duration, String> {
        let interval = match &self.args.interval {
            Some(raw) => parse_interval(raw)?,
            None => config.polling_interval()?,
        };
        interval.ok_or_else(|| "Polling is disabled; pass --interval to watch anyway".to_string())
    }

    /// Collect and redraw until the iteration limit, sleeping `interval`
    /// between refreshes.
    pub fn watch_with(
        &self,
        config: &PulseConfig,
        fetcher: &dyn JsonFetcher,
        runner: &dyn CommandRunner,
        interval: Duration,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let mut completed: u32 = 0;

        loop {
            if let Some(limit) = self.args.iterations {
                if completed >= limit {
                    break;
                }
            }
            if completed > 0 {
                thread::sleep(interval);
            }

            let report = collect_report(config, fetcher, runner, &self.project_root, ui);
            ui.clear();
            emit_report(ui, &report, false)?;
            ui.message(&format!(
                "Updated {}, refreshing every {}s (Ctrl+C to stop)",
                report.generated_at.format("%H:%M:%S UTC"),
                interval.as_secs()
            ));

            completed += 1;
        }

        Ok(())
    }
}

impl Command for WatchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config =
            match load_valid_config(&self.project_root, self.config_override.as_deref()) {
                Ok(config) => config,
                Err(e) => return config_failure(ui, e),
            };

        let interval = match self.interval(&config) {
            Ok(interval) => interval,
            Err(message) => {
                ui.error(&message);
                return Ok(CommandResult::failure(2));
            }
        };
        tracing::debug!("Watching with a {:?} interval", interval);

        let fetcher = HttpFetcher::with_timeout(config.timeouts.http())?;
        let runner = SystemRunner;
        self.watch_with(&config, &fetcher, &runner, interval, ui)?;

        Ok(CommandResult::success())
    }
}
