//! process
//!
//! Subprocess execution with explicit results.
//!
//! # Design
//!
//! External tools (`docker compose`, `git clone`) are invoked through the
//! [`ProcessRunner`] trait. A run produces a [`ProcessOutput`] carrying the
//! exit code and any captured output; the caller decides whether a non-zero
//! code is fatal (compose) or advisory (clone). Only a failure to start the
//! program at all is an `Err`.
//!
//! # Modules
//!
//! - [`mock`]: Recording runner for deterministic tests
//!
//! # Example
//!
//! ```no_run
//! use sysml_v2::process::{ProcessRunner, ProcessSpec, SystemRunner};
//!
//! let runner = SystemRunner;
//! let output = runner
//!     .run(&ProcessSpec::new("git").arg("--version").captured())
//!     .unwrap();
//! println!("exit {}: {}", output.code, output.stdout);
//! ```

pub mod mock;

use std::fmt;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Exit code reported when a process was terminated by a signal.
pub const SIGNALLED_EXIT_CODE: i32 = 128;

/// Errors from starting a subprocess.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program could not be started (not installed, not executable).
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

/// A subprocess invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    /// Program name or path
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Capture stdout/stderr instead of streaming to the terminal
    pub capture: bool,
}

impl ProcessSpec {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            capture: false,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Capture output instead of inheriting the terminal.
    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }
}

impl fmt::Display for ProcessSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Outcome of a completed subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code (`SIGNALLED_EXIT_CODE` when killed by a signal)
    pub code: i32,
    /// Captured stdout (empty when not capturing)
    pub stdout: String,
    /// Captured stderr (empty when not capturing)
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs subprocesses.
pub trait ProcessRunner {
    /// Run the process to completion.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::Spawn` only if the process could not be started.
    fn run(&self, spec: &ProcessSpec) -> Result<ProcessOutput, ProcessError>;
}

/// Runs real subprocesses via `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, spec: &ProcessSpec) -> Result<ProcessOutput, ProcessError> {
        tracing::debug!(command = %spec, "running subprocess");

        let mut command = Command::new(&spec.program);
        command.args(&spec.args);

        let spawn_err = |source| ProcessError::Spawn {
            program: spec.program.clone(),
            source,
        };

        let output = if spec.capture {
            let out = command
                .stdin(Stdio::null())
                .output()
                .map_err(spawn_err)?;
            ProcessOutput {
                code: out.status.code().unwrap_or(SIGNALLED_EXIT_CODE),
                stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            }
        } else {
            let status = command.status().map_err(spawn_err)?;
            ProcessOutput {
                code: status.code().unwrap_or(SIGNALLED_EXIT_CODE),
                ..Default::default()
            }
        };

        tracing::debug!(code = output.code, "subprocess exited");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_args() {
        let spec = ProcessSpec::new("docker")
            .arg("compose")
            .args(["-f", "docker-compose.yml", "up"])
            .captured();

        assert_eq!(spec.program, "docker");
        assert_eq!(spec.args, vec!["compose", "-f", "docker-compose.yml", "up"]);
        assert!(spec.capture);
        assert_eq!(spec.to_string(), "docker compose -f docker-compose.yml up");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let result = SystemRunner.run(&ProcessSpec::new("sysml-no-such-program-xyz").captured());
        assert!(matches!(result, Err(ProcessError::Spawn { .. })));
    }

    #[test]
    fn success_means_zero() {
        assert!(ProcessOutput::default().success());
        assert!(!ProcessOutput {
            code: 2,
            ..Default::default()
        }
        .success());
    }
}
