//! Error types for the CMake backend.

use extbuild_spec::{BackendError, ToolVersion};
use std::path::PathBuf;
use thiserror::Error;

use crate::invocation::Step;

/// Result type for CMake backend operations.
pub type CmakeResult<T> = Result<T, CmakeError>;

/// Errors that can occur while building extensions with CMake.
#[derive(Debug, Error)]
pub enum CmakeError {
    /// CMake could not be located or invoked.
    #[error("CMake must be installed to build the following extensions: {}", .extensions.join(", "))]
    ToolNotFound {
        extensions: Vec<String>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// CMake is older than the platform requires.
    #[error("CMake >= {required} is required on {platform} (found {found})")]
    VersionTooLow {
        found: ToolVersion,
        required: ToolVersion,
        platform: String,
    },

    /// The `--version` output did not contain a version number.
    #[error("could not determine CMake version from output: {output}")]
    UnparseableVersion { output: String },

    /// No interpreter was found to pass to the build.
    #[error("interpreter not found. Pass --python or set EXTBUILD_PYTHON, or put python3 on PATH")]
    InterpreterNotFound,

    /// Extension source directory does not exist.
    #[error("source directory for extension '{extension}' does not exist: {path}")]
    SourceDirMissing { extension: String, path: PathBuf },

    /// Extension source directory has no CMakeLists.txt.
    #[error("extension '{extension}' has no build descriptor at {path}")]
    BuildDescriptorMissing { extension: String, path: PathBuf },

    /// The temporary build directory could not be created.
    #[error("failed to create build directory {path}: {source}")]
    CreateBuildDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The working directory could not be read to anchor relative paths.
    #[error("failed to resolve the current directory: {source}")]
    CurrentDir {
        #[source]
        source: std::io::Error,
    },

    /// CMake could not be spawned for a step.
    #[error("failed to spawn CMake {step} step for extension '{extension}': {source}")]
    SpawnFailed {
        extension: String,
        step: Step,
        #[source]
        source: std::io::Error,
    },

    /// The configure step exited with non-zero status.
    #[error("CMake configure step failed for extension '{extension}' ({})", describe_code(.code))]
    ConfigureFailed { extension: String, code: Option<i32> },

    /// The build step exited with non-zero status.
    #[error("CMake build step failed for extension '{extension}' ({})", describe_code(.code))]
    BuildFailed { extension: String, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl CmakeError {
    /// Creates a tool-not-found error naming every affected extension.
    pub fn tool_not_found(
        extensions: impl IntoIterator<Item = impl Into<String>>,
        source: Option<std::io::Error>,
    ) -> Self {
        Self::ToolNotFound {
            extensions: extensions.into_iter().map(Into::into).collect(),
            source,
        }
    }

    /// Creates the failure error for a step.
    pub fn step_failed(step: Step, extension: impl Into<String>, code: Option<i32>) -> Self {
        let extension = extension.into();
        match step {
            Step::Configure => Self::ConfigureFailed { extension, code },
            Step::Build => Self::BuildFailed { extension, code },
        }
    }
}

impl BackendError for CmakeError {
    fn code(&self) -> &'static str {
        match self {
            CmakeError::ToolNotFound { .. } => "CMAKE_001",
            CmakeError::VersionTooLow { .. } => "CMAKE_002",
            CmakeError::UnparseableVersion { .. } => "CMAKE_003",
            CmakeError::InterpreterNotFound => "CMAKE_004",
            CmakeError::SourceDirMissing { .. } => "CMAKE_005",
            CmakeError::BuildDescriptorMissing { .. } => "CMAKE_006",
            CmakeError::CreateBuildDir { .. } => "CMAKE_007",
            CmakeError::SpawnFailed { .. } => "CMAKE_008",
            CmakeError::ConfigureFailed { .. } => "CMAKE_009",
            CmakeError::BuildFailed { .. } => "CMAKE_010",
            CmakeError::CurrentDir { .. } => "CMAKE_011",
        }
    }

    fn category(&self) -> &'static str {
        "cmake"
    }
}
