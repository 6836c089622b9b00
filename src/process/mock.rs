//! process::mock
//!
//! Mock process runner for deterministic testing.
//!
//! # Design
//!
//! The mock runner never starts a process. It records every invocation and
//! answers with a scripted exit code, chosen per program or falling back to
//! a default. A program can also be marked as missing to exercise the spawn
//! error path.
//!
//! # Example
//!
//! ```
//! use sysml_v2::process::mock::MockRunner;
//! use sysml_v2::process::{ProcessRunner, ProcessSpec};
//!
//! let runner = MockRunner::new().with_exit_code("git", 128);
//! let output = runner.run(&ProcessSpec::new("git").arg("clone")).unwrap();
//!
//! assert_eq!(output.code, 128);
//! assert_eq!(runner.calls()[0].args, vec!["clone"]);
//! ```

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};

use super::{ProcessError, ProcessOutput, ProcessRunner, ProcessSpec};

/// Recording process runner.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    inner: Arc<Mutex<MockRunnerInner>>,
}

#[derive(Debug, Default)]
struct MockRunnerInner {
    /// Exit code per program name.
    exit_codes: HashMap<String, i32>,
    /// Exit code for programs without an explicit entry.
    default_code: i32,
    /// Programs that fail to spawn.
    missing: HashSet<String>,
    /// Recorded invocations, in order.
    calls: Vec<ProcessSpec>,
}

impl MockRunner {
    /// Create a runner where every program exits 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the exit code for `program`.
    pub fn with_exit_code(self, program: &str, code: i32) -> Self {
        self.lock().exit_codes.insert(program.to_string(), code);
        self
    }

    /// Script the exit code for programs without an explicit entry.
    pub fn with_default_code(self, code: i32) -> Self {
        self.lock().default_code = code;
        self
    }

    /// Make `program` fail to spawn.
    pub fn with_missing(self, program: &str) -> Self {
        self.lock().missing.insert(program.to_string());
        self
    }

    /// All recorded invocations.
    pub fn calls(&self) -> Vec<ProcessSpec> {
        self.lock().calls.clone()
    }

    /// Recorded invocations of `program`.
    pub fn calls_to(&self, program: &str) -> Vec<ProcessSpec> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.program == program)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockRunnerInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, spec: &ProcessSpec) -> Result<ProcessOutput, ProcessError> {
        let mut inner = self.lock();
        inner.calls.push(spec.clone());

        if inner.missing.contains(&spec.program) {
            return Err(ProcessError::Spawn {
                program: spec.program.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "program not found"),
            });
        }

        let code = inner
            .exit_codes
            .get(&spec.program)
            .copied()
            .unwrap_or(inner.default_code);

        Ok(ProcessOutput {
            code,
            ..Default::default()
        })
    }
}
