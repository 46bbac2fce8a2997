//! External command execution.
//!
//! Commands are run directly (no shell) with captured stdout/stderr and an
//! optional wall-clock limit. The [`CommandRunner`] trait is the seam the
//! deployment reader, audit runner and runtime version lookup go through.

use crate::error::{PulseError, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How often a running child is polled while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Wall-clock limit (None = wait forever).
    pub timeout: Option<Duration>,
}

/// Capability to run an external program and capture its output.
pub trait CommandRunner {
    /// Run `program` with `args`.
    ///
    /// A non-zero exit is reported through [`CommandResult::success`], not as
    /// an error. Errors mean the program could not be run to completion:
    /// it failed to start or hit the timeout.
    fn run(&self, program: &str, args: &[String], options: &CommandOptions)
        -> Result<CommandResult>;
}

/// [`CommandRunner`] backed by `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult> {
        execute(program, args, options)
    }
}

/// Execute a program, capturing output and enforcing the timeout.
pub fn execute(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Running {} {:?}", program, args);

    let mut child = cmd.spawn().map_err(|e| PulseError::CommandSpawn {
        program: program.to_string(),
        message: e.to_string(),
    })?;

    // Drain both pipes on their own threads so a chatty child can't block
    // on a full pipe while we wait on it.
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_handle = thread::spawn(move || read_pipe(stdout));
    let stderr_handle = thread::spawn(move || read_pipe(stderr));

    let status = match options.timeout {
        None => child.wait()?,
        Some(limit) => loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if start.elapsed() >= limit {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!("{} exceeded {:?}, killed", program, limit);
                return Err(PulseError::CommandTimeout {
                    program: program.to_string(),
                    secs: limit.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        },
    };

    let stdout_output = stdout_handle.join().unwrap_or_default();
    let stderr_output = stderr_handle.join().unwrap_or_default();
    let duration = start.elapsed();

    if status.success() {
        Ok(CommandResult::success(stdout_output, stderr_output, duration))
    } else {
        Ok(CommandResult::failure(
            status.code(),
            stdout_output,
            stderr_output,
            duration,
        ))
    }
}

fn read_pipe<R: Read>(pipe: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}
