//! Process execution utilities
//!
//! Provides a unified interface for running external commands with:
//! - Output capture
//! - Directory context
//! - Background spawning with output redirected to a log file
//! - Cancellable waits on foreground children

use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::time::Duration;

/// Result of a command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Exit code of the command
    pub exit_code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandResult {
    /// Create from std::process::Output
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: exit_code_of(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Get combined output (stdout + stderr)
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }

    /// Turn a non-zero exit into an error
    pub fn into_success(self, program: &str) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::command_failed(program, self.exit_code, &self.stderr))
        }
    }
}

/// Map an exit status to a shell-style exit code.
///
/// Children killed by a signal map to `128 + signal`.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}

fn display_name(program: &OsStr) -> String {
    program.to_string_lossy().into_owned()
}

/// Run a command and capture output
pub fn run_command<P, A>(program: P, args: &[A]) -> Result<CommandResult>
where
    P: AsRef<OsStr>,
    A: AsRef<OsStr>,
{
    let program = program.as_ref();
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| Error::process(format!("Failed to execute {}: {}", display_name(program), e)))?;

    Ok(CommandResult::from_output(output))
}

/// Spawn a command in the background with stdout and stderr appended to `log_path`.
///
/// The log file is created (or truncated) before the child starts.
pub fn spawn_logged<P, A>(program: P, args: &[A], log_path: &Path) -> Result<Child>
where
    P: AsRef<OsStr>,
    A: AsRef<OsStr>,
{
    let program = program.as_ref();
    let log = File::create(log_path).map_err(|e| {
        Error::from(e).with_context(format!("Creating log file {}", log_path.display()))
    })?;
    let log_err = log.try_clone()?;

    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(log_err))
        .spawn()
        .map_err(|e| Error::process(format!("Failed to spawn {}: {}", display_name(program), e)))
}

/// Spawn a command in a directory with inherited stdio
pub fn spawn_inherited<P, A>(program: P, args: &[A], dir: &Path) -> Result<Child>
where
    P: AsRef<OsStr>,
    A: AsRef<OsStr>,
{
    let program = program.as_ref();
    Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| Error::process(format!("Failed to execute {}: {}", display_name(program), e)))
}

/// Wait for a child to exit, polling every `poll` and observing `cancel`.
///
/// On cancellation the child is killed and reaped, and an interrupted error
/// is returned.
pub fn wait_cancellable(child: &mut Child, cancel: &CancelToken, poll: Duration) -> Result<ExitStatus> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if cancel.wait_timeout(poll) {
            tracing::debug!(pid = child.id(), "killing child after cancellation");
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::interrupted());
        }
    }
}

/// Return the last `count` lines of a text file.
///
/// A missing or unreadable file yields no lines.
pub fn tail_lines(path: &Path, count: usize) -> Vec<String> {
    let Ok(file) = File::open(path) else {
        return Vec::new();
    };
    let mut lines: Vec<String> = BufReader::new(file)
        .lines()
        .map_while(std::result::Result::ok)
        .collect();
    let skip = lines.len().saturating_sub(count);
    lines.drain(..skip);
    lines
}
