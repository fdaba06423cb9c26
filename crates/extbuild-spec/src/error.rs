//! Error types for manifest loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for manifest validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Package name is empty
    EmptyPackageName,
    /// E002: Package version is empty
    EmptyPackageVersion,
    /// E003: No extensions declared
    NoExtensions,
    /// E004: Two extensions share a module name
    DuplicateExtensionName,
    /// E005: Extension name is not a dotted identifier path
    InvalidModuleName,
    /// E006: Extension define overrides an orchestrator-owned cache entry
    ReservedDefine,
    /// E007: Extension define key is not a valid cache variable name
    InvalidDefineKey,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::EmptyPackageName => "E001",
            ErrorCode::EmptyPackageVersion => "E002",
            ErrorCode::NoExtensions => "E003",
            ErrorCode::DuplicateExtensionName => "E004",
            ErrorCode::InvalidModuleName => "E005",
            ErrorCode::ReservedDefine => "E006",
            ErrorCode::InvalidDefineKey => "E007",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "extensions\[0\].name").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Top-level error type for manifest operations.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Manifest validation failed with one or more errors.
    #[error("manifest validation failed with {} error(s): {}", .0.len(), join_errors(.0))]
    ValidationFailed(Vec<ValidationError>),

    /// The working directory could not be resolved for a relative path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Common trait for backend errors.
///
/// Backends implement this so the CLI can report a stable code and
/// category next to the message, both in colored output and in `--json`
/// output.
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "CMAKE_001". Codes are stable.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::EmptyPackageName.to_string(), "E001");
        assert_eq!(ErrorCode::ReservedDefine.to_string(), "E006");
    }

    #[test]
    fn test_validation_error_display_with_path() {
        let err = ValidationError::with_path(
            ErrorCode::InvalidModuleName,
            "bad name",
            "extensions[1].name",
        );
        assert_eq!(err.to_string(), "E005: bad name (at extensions[1].name)");

        let err = ValidationError::new(ErrorCode::NoExtensions, "nothing to build");
        assert_eq!(err.to_string(), "E003: nothing to build");
    }

    #[test]
    fn test_validation_failed_lists_every_error() {
        let err = ManifestError::ValidationFailed(vec![
            ValidationError::new(ErrorCode::EmptyPackageName, "name is empty"),
            ValidationError::new(ErrorCode::EmptyPackageVersion, "version is empty"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("2 error(s)"));
        assert!(msg.contains("name is empty"));
        assert!(msg.contains("version is empty"));
    }
}
