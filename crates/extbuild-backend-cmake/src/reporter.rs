//! Progress hooks for the orchestrator.
//!
//! The backend never prints. Front ends implement [`BuildReporter`] to show
//! progress; every method defaults to doing nothing.

use std::path::Path;
use std::time::Duration;

use crate::invocation::{Invocation, Step};
use crate::tool::ToolInfo;

pub trait BuildReporter {
    /// CMake answered the version query.
    fn tool_detected(&mut self, _tool: &ToolInfo) {}

    /// A cross-compilation toolchain file is in use for `extension`.
    fn toolchain_in_use(&mut self, _extension: &str, _toolchain: &str) {}

    /// The build directory for `extension` is ready.
    fn build_dir_ready(&mut self, _extension: &str, _dir: &Path) {}

    /// A step is about to run.
    fn step_started(&mut self, _extension: &str, _invocation: &Invocation) {}

    /// A step exited successfully.
    fn step_finished(&mut self, _extension: &str, _step: Step, _elapsed: Duration) {}
}

/// Reporter that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl BuildReporter for NullReporter {}
