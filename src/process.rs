// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! External process invocation seam used by both audit engines.
//!
//! Every external tool (package manager, `sudo`) is reached through the
//! [`CommandRunner`] trait so the engines can be exercised against a test
//! double without touching the host.

use std::io::Read;
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, ChildStderr, ChildStdout, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;
use thiserror::Error;
use wait_timeout::ChildExt;

/// Default timeout for external invocations. Full-system verification runs
/// (`debsums -s -a`, `rpm -Va`) legitimately take minutes on large hosts.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(600);

/// Result type for command invocations.
pub type CommandResult<T> = std::result::Result<T, CommandError>;

/// Errors that can occur while invoking an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command not found: {command}")]
    NotFound { command: String },
    #[error("failed to start command: {command}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("command failed: {command}")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("command timed out after {timeout:?}: {command}")]
    Timeout { command: String, timeout: Duration },
}

/// A fully specified external invocation: program, argument vector and any
/// extra environment entries.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            env: Vec::new(),
        }
    }

    /// Add an environment entry for the invocation.
    #[must_use]
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// The command line as a single string, used for log lines and as the
    /// lookup key of the test double.
    #[must_use]
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Captured result of a completed invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn succeeded(stdout: &str, stderr: &str) -> Self {
        Self {
            success: true,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[must_use]
    pub fn failed(stdout: &str, stderr: &str) -> Self {
        Self {
            success: false,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }
}

/// Seam for invoking external tools.
pub trait CommandRunner {
    /// Probe whether an executable is present on the search path.
    fn probe(&self, program: &str) -> bool;

    /// Launch a command, await completion and capture both output streams.
    ///
    /// # Errors
    /// Returns an error if the command cannot be started, cannot be awaited
    /// or exceeds the runner's timeout. A non-zero exit is not an error; it
    /// is reported through [`CommandOutput::success`].
    fn run(&self, spec: &CommandSpec) -> CommandResult<CommandOutput>;
}

/// [`CommandRunner`] backed by real subprocesses with a bounded timeout per
/// invocation.
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

impl CommandRunner for SystemRunner {
    fn probe(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn run(&self, spec: &CommandSpec) -> CommandResult<CommandOutput> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &spec.env {
            command.env(key, value);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    return Err(CommandError::NotFound {
                        command: spec.display(),
                    });
                }
                return Err(CommandError::SpawnFailed {
                    command: spec.display(),
                    source: e,
                });
            }
        };

        // Drain both pipes on their own threads so the child never blocks on
        // a full pipe buffer while we wait for it.
        let stdout_reader = drain_stdout(child.stdout.take());
        let stderr_reader = drain_stderr(child.stderr.take());

        let status = wait_with_timeout(&mut child, self.timeout, spec)?;

        Ok(CommandOutput {
            success: status.success(),
            stdout: join_reader(stdout_reader),
            stderr: join_reader(stderr_reader),
        })
    }
}

fn drain_stdout(pipe: Option<ChildStdout>) -> Option<JoinHandle<String>> {
    pipe.map(|mut stream| {
        std::thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = stream.read_to_end(&mut buffer);
            String::from_utf8_lossy(&buffer).into_owned()
        })
    })
}

fn drain_stderr(pipe: Option<ChildStderr>) -> Option<JoinHandle<String>> {
    pipe.map(|mut stream| {
        std::thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = stream.read_to_end(&mut buffer);
            String::from_utf8_lossy(&buffer).into_owned()
        })
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Wait for a child process to complete with a timeout.
///
/// Uses platform wait APIs rather than polling. If the timeout is reached,
/// the process is killed.
///
/// # Returns
/// - `Ok(ExitStatus)` if the process completed within the timeout
/// - `Err(CommandError::Timeout)` if the process timed out
/// - `Err(CommandError::WaitFailed)` if there was an error waiting for it
fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
    spec: &CommandSpec,
) -> CommandResult<ExitStatus> {
    if let Some(status) = child
        .wait_timeout(timeout)
        .map_err(|e| CommandError::WaitFailed {
            command: spec.display(),
            source: e,
        })?
    {
        // Distinguish normal completion from termination by a signal.
        if status.code().is_some() {
            Ok(status)
        } else if let Some(signal) = status.signal() {
            Err(CommandError::WaitFailed {
                command: spec.display(),
                source: std::io::Error::other(format!("Process terminated by signal: {signal}")),
            })
        } else {
            Err(CommandError::WaitFailed {
                command: spec.display(),
                source: std::io::Error::other("Unknown process termination"),
            })
        }
    } else {
        // Timeout has been reached - kill the process
        let _ = child.kill();
        let _ = child.wait();
        Err(CommandError::Timeout {
            command: spec.display(),
            timeout,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_stdout() {
        let runner = SystemRunner::default();
        let output = runner
            .run(&CommandSpec::new("echo", &["hello"]))
            .expect("echo should run");
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.stderr.is_empty());
    }

    #[test]
    fn test_run_captures_stderr_and_exit_status() {
        let runner = SystemRunner::default();
        let output = runner
            .run(&CommandSpec::new("sh", &["-c", "echo oops >&2; exit 3"]))
            .expect("sh should run");
        assert!(!output.success);
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[test]
    fn test_run_passes_environment() {
        let runner = SystemRunner::default();
        let spec = CommandSpec::new("sh", &["-c", "echo $AUDIT_PROBE"]).env("AUDIT_PROBE", "on");
        let output = runner.run(&spec).expect("sh should run");
        assert_eq!(output.stdout.trim(), "on");
    }

    #[test]
    fn test_run_missing_program() {
        let runner = SystemRunner::default();
        let result = runner.run(&CommandSpec::new("definitely-not-a-real-binary", &[]));
        assert!(matches!(result, Err(CommandError::NotFound { .. })));
    }

    #[test]
    fn test_run_enforces_timeout() {
        let runner = SystemRunner::new(Duration::from_millis(100));
        let result = runner.run(&CommandSpec::new("sleep", &["5"]));
        assert!(matches!(result, Err(CommandError::Timeout { .. })));
    }

    #[test]
    fn test_probe_finds_shell() {
        let runner = SystemRunner::default();
        assert!(runner.probe("sh"));
        assert!(!runner.probe("definitely-not-a-real-binary"));
    }

    #[test]
    fn test_command_spec_display() {
        assert_eq!(CommandSpec::new("rpm", &["-Va"]).display(), "rpm -Va");
        assert_eq!(CommandSpec::new("dnf", &[]).display(), "dnf");
    }
}
