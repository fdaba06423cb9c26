//! JSON output types for machine-readable CLI output.
//!
//! Used by the `--json` flag on `build` and `plan`.

use extbuild_backend_cmake::{BuildSummary, CmakeError, ExtensionPlan};
use extbuild_spec::{BackendError, ManifestError, ToolVersion};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Error codes for CLI operations.
///
/// CLI_XXX for CLI-level errors. Manifest validation codes (E001...) and
/// backend codes (CMAKE_001...) are passed through unchanged.
pub mod error_codes {
    /// Manifest file could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Manifest JSON parse error
    pub const JSON_PARSE: &str = "CLI_002";
    /// Working directory could not be resolved
    pub const IO: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001", "CMAKE_009")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Error category (e.g., "cmake")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            category: None,
            path: None,
        }
    }

    /// Sets the JSON path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the category for this error.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Converts a manifest error into one or more JSON errors.
pub fn manifest_error_to_json(err: &ManifestError) -> Vec<JsonError> {
    match err {
        ManifestError::Read { .. } => vec![JsonError::new(error_codes::FILE_READ, err.to_string())],
        ManifestError::JsonParse(_) => {
            vec![JsonError::new(error_codes::JSON_PARSE, err.to_string())]
        }
        ManifestError::ValidationFailed(errors) => errors
            .iter()
            .map(|e| {
                let json = JsonError::new(e.code.code(), &e.message);
                match e.path {
                    Some(ref path) => json.with_path(path),
                    None => json,
                }
            })
            .collect(),
        ManifestError::Io(_) => vec![JsonError::new(error_codes::IO, err.to_string())],
    }
}

/// Converts a backend error into a JSON error.
pub fn cmake_error_to_json(err: &CmakeError) -> JsonError {
    JsonError::new(err.code(), err.message()).with_category(err.category())
}

/// JSON output for the `plan` command.
#[derive(Debug, Clone, Serialize)]
pub struct PlanOutput {
    /// Whether planning succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Platform tag (e.g., "linux-x86_64")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Build type ("debug" or "release")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_type: Option<String>,
    /// Per-extension invocations
    pub extensions: Vec<ExtensionPlan>,
}

impl PlanOutput {
    /// Creates a successful plan output.
    pub fn success(platform: String, build_type: String, extensions: Vec<ExtensionPlan>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            platform: Some(platform),
            build_type: Some(build_type),
            extensions,
        }
    }

    /// Creates a failed plan output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            platform: None,
            build_type: None,
            extensions: Vec::new(),
        }
    }
}

/// One built extension in `build --json` output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuiltExtension {
    /// Module name
    pub name: String,
    /// Directory the compiled module was placed in
    pub output_dir: String,
    /// Temporary build directory
    pub build_dir: String,
    /// Cross-compilation toolchain file in use (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolchain: Option<String>,
    /// Configure step duration in milliseconds
    pub configure_ms: u64,
    /// Build step duration in milliseconds
    pub build_ms: u64,
}

/// JSON output for the `build` command.
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutput {
    /// Whether every extension built
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// CMake executable used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmake: Option<String>,
    /// CMake version, when it could be parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmake_version: Option<ToolVersion>,
    /// Built extensions, in build order
    pub extensions: Vec<BuiltExtension>,
}

impl BuildOutput {
    /// Creates a successful build output from a summary.
    pub fn success(summary: &BuildSummary) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            cmake: Some(summary.tool.path.display().to_string()),
            cmake_version: summary.tool.version.clone(),
            extensions: summary
                .extensions
                .iter()
                .map(|ext| BuiltExtension {
                    name: ext.name.clone(),
                    output_dir: ext.output_dir.display().to_string(),
                    build_dir: ext.build_dir.display().to_string(),
                    toolchain: ext.toolchain.clone(),
                    configure_ms: duration_ms(ext.configure_time),
                    build_ms: duration_ms(ext.build_time),
                })
                .collect(),
        }
    }

    /// Creates a failed build output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            cmake: None,
            cmake_version: None,
            extensions: Vec::new(),
        }
    }
}

/// Milliseconds, saturating at `u64::MAX`.
fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
