//! Blocking subprocess execution.
//!
//! The orchestrator talks to CMake only through [`CommandRunner`], so a
//! fake runner can stand in for the real tool in tests.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::invocation::Invocation;

/// How a finished subprocess exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// Exit code, or `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl ExitOutcome {
    /// A successful exit.
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    /// An exit with the given code.
    pub fn with_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Returns true for exit code 0.
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ExitOutcome {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Runs tool commands, blocking until each exits.
pub trait CommandRunner {
    /// Runs `<program> --version` and returns its standard output.
    fn query_version(&mut self, program: &Path) -> std::io::Result<String>;

    /// Runs an invocation and returns how it exited.
    fn run(&mut self, invocation: &Invocation) -> std::io::Result<ExitOutcome>;
}

/// Runs commands as real child processes.
///
/// Standard output and error are inherited so the tool's own diagnostics
/// reach the user directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn query_version(&mut self, program: &Path) -> std::io::Result<String> {
        let output = Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()?;
        if !output.status.success() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("'{} --version' exited with {}", program.display(), output.status),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run(&mut self, invocation: &Invocation) -> std::io::Result<ExitOutcome> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .envs(&invocation.env)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        Ok(status.into())
    }
}
