//! Scripted command runner for testing.
//!
//! `ScriptedRunner` implements [`CommandRunner`] by returning canned
//! responses keyed on program name, and records every invocation for
//! later assertion.
//!
//! # Example
//!
//! ```
//! use stackpulse::shell::{CommandOptions, CommandRunner, ScriptedRunner};
//!
//! let runner = ScriptedRunner::new().succeed("git", "Fix bug|1700000000\n");
//!
//! let result = runner.run("git", &[], &CommandOptions::default()).unwrap();
//! assert_eq!(result.stdout, "Fix bug|1700000000\n");
//! assert_eq!(runner.calls().len(), 1);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{PulseError, Result};

use super::command::{CommandOptions, CommandResult, CommandRunner};

/// Canned outcome for one program.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// The program ran and produced this result.
    Output(CommandResult),
    /// The program could not be started.
    SpawnError(String),
    /// The program hit its timeout.
    Timeout,
}

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub options: CommandOptions,
}

/// Command runner that replays scripted responses.
///
/// Programs with no scripted response fail to spawn, the same as a binary
/// missing from PATH.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, ScriptedResponse>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    /// Create a runner with no scripted programs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for `program`.
    pub fn respond(mut self, program: &str, response: ScriptedResponse) -> Self {
        self.responses.insert(program.to_string(), response);
        self
    }

    /// Script a successful run with the given stdout.
    pub fn succeed(self, program: &str, stdout: &str) -> Self {
        self.respond(
            program,
            ScriptedResponse::Output(CommandResult::success(
                stdout.to_string(),
                String::new(),
                Duration::ZERO,
            )),
        )
    }

    /// Script a failed run with the given exit code, stdout and stderr.
    pub fn fail(self, program: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        self.respond(
            program,
            ScriptedResponse::Output(CommandResult::failure(
                Some(code),
                stdout.to_string(),
                stderr.to_string(),
                Duration::ZERO,
            )),
        )
    }

    /// All invocations so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Invocations of a single program.
    pub fn calls_to(&self, program: &str) -> Vec<RecordedCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.program == program)
            .cloned()
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult> {
        self.calls.borrow_mut().push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
            options: options.clone(),
        });

        match self.responses.get(program) {
            Some(ScriptedResponse::Output(result)) => Ok(result.clone()),
            Some(ScriptedResponse::SpawnError(message)) => Err(PulseError::CommandSpawn {
                program: program.to_string(),
                message: message.clone(),
            }),
            Some(ScriptedResponse::Timeout) => Err(PulseError::CommandTimeout {
                program: program.to_string(),
                secs: options.timeout.map(|t| t.as_secs()).unwrap_or_default(),
            }),
            None => Err(PulseError::CommandSpawn {
                program: program.to_string(),
                message: "not found".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscripted_program_fails_to_spawn() {
        let runner = ScriptedRunner::new();
        let err = runner.run("git", &[], &CommandOptions::default()).unwrap_err();
        assert!(matches!(err, PulseError::CommandSpawn { .. }));
    }

    #[test]
    fn fail_scripts_exit_code_and_streams() {
        let runner = ScriptedRunner::new().fail("composer", 2, "", "boom");
        let result = runner
            .run("composer", &[], &CommandOptions::default())
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(2));
        assert_eq!(result.stderr, "boom");
    }

    #[test]
    fn timeout_reports_configured_budget() {
        let runner = ScriptedRunner::new().respond("git", ScriptedResponse::Timeout);
        let options = CommandOptions {
            timeout: Some(Duration::from_secs(7)),
            ..Default::default()
        };
        let err = runner.run("git", &[], &options).unwrap_err();
        assert!(matches!(err, PulseError::CommandTimeout { secs: 7, .. }));
    }

    #[test]
    fn records_calls_in_order() {
        let runner = ScriptedRunner::new().succeed("git", "").succeed("php", "8.3.1");
        let _ = runner.run("git", &["log".to_string()], &CommandOptions::default());
        let _ = runner.run("php", &[], &CommandOptions::default());

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].program, "git");
        assert_eq!(calls[0].args, vec!["log".to_string()]);
        assert_eq!(runner.calls_to("php").len(), 1);
    }
}
