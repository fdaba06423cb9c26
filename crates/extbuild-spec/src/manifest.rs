//! Package manifest (`extbuild.json`).
//!
//! The manifest carries the package metadata a packaging front end needs
//! and the list of extensions to build. Source directories are resolved
//! against the directory holding the manifest when it is loaded.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{ErrorCode, ManifestError, ValidationError};
use crate::extension::{is_identifier, is_valid_module_name, ExtensionDescriptor};

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "extbuild.json";

/// Cache entries the orchestrator derives itself. Extensions may not set them.
pub const RESERVED_DEFINES: &[&str] = &[
    "PYTHON_EXECUTABLE",
    "CMAKE_BUILD_TYPE",
    "CMAKE_TOOLCHAIN_FILE",
    "CMAKE_LIBRARY_OUTPUT_DIRECTORY",
];

/// Package metadata plus the extensions to build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Distribution name.
    pub name: String,
    /// Package version; compiled into each module as `VERSION_INFO`.
    pub version: String,
    /// One-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    /// Project URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// License identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Search keywords.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Whether the package may run from a zip archive.
    #[serde(default)]
    pub zip_safe: bool,
    /// Extensions built by this package.
    pub extensions: Vec<ExtensionDescriptor>,
}

impl PackageManifest {
    /// Parses a manifest from JSON without resolving paths or validating.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the manifest to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads, resolves and validates a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest = Self::from_json(&content)?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => std::path::PathBuf::from("."),
        };
        let base = if dir.is_absolute() {
            dir
        } else {
            std::env::current_dir()?.join(dir)
        };
        manifest.resolve_paths(&base);

        let errors = manifest.validate();
        if !errors.is_empty() {
            return Err(ManifestError::ValidationFailed(errors));
        }
        Ok(manifest)
    }

    /// Makes every extension's source directory absolute relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for ext in &mut self.extensions {
            ext.resolve_against(base);
        }
    }

    /// Names of all extensions, in declaration order.
    pub fn extension_names(&self) -> Vec<String> {
        self.extensions.iter().map(|e| e.name.clone()).collect()
    }

    /// Checks the manifest and returns every problem found.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::with_path(
                ErrorCode::EmptyPackageName,
                "package name must not be empty",
                "name",
            ));
        }
        if self.version.trim().is_empty() {
            errors.push(ValidationError::with_path(
                ErrorCode::EmptyPackageVersion,
                "package version must not be empty",
                "version",
            ));
        }
        if self.extensions.is_empty() {
            errors.push(ValidationError::with_path(
                ErrorCode::NoExtensions,
                "at least one extension must be declared",
                "extensions",
            ));
        }

        let mut seen = HashSet::new();
        for (i, ext) in self.extensions.iter().enumerate() {
            if !is_valid_module_name(&ext.name) {
                errors.push(ValidationError::with_path(
                    ErrorCode::InvalidModuleName,
                    format!("'{}' is not a dotted module name", ext.name),
                    format!("extensions[{}].name", i),
                ));
            }
            if !seen.insert(ext.name.as_str()) {
                errors.push(ValidationError::with_path(
                    ErrorCode::DuplicateExtensionName,
                    format!("extension '{}' is declared more than once", ext.name),
                    format!("extensions[{}].name", i),
                ));
            }
            for key in ext.defines.keys() {
                let path = format!("extensions[{}].defines.{}", i, key);
                if is_reserved_define(key) {
                    errors.push(ValidationError::with_path(
                        ErrorCode::ReservedDefine,
                        format!("'{}' is set by extbuild and cannot be overridden", key),
                        path,
                    ));
                } else if !is_identifier(key) {
                    errors.push(ValidationError::with_path(
                        ErrorCode::InvalidDefineKey,
                        format!("'{}' is not a valid cache variable name", key),
                        path,
                    ));
                }
            }
        }

        errors
    }
}

/// Returns true for cache entries derived by the orchestrator, including
/// per-configuration output directory overrides.
pub fn is_reserved_define(key: &str) -> bool {
    RESERVED_DEFINES.iter().any(|r| key == *r)
        || key.starts_with("CMAKE_LIBRARY_OUTPUT_DIRECTORY_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = r#"{
        "name": "pangolin",
        "version": "0.0.1",
        "description": "Python binding for lightweight 3D visualization library Pangolin.",
        "url": "https://github.com/uoip/pangolin",
        "license": "MIT",
        "keywords": ["Pangolin", "binding", "OpenGL", "3D", "visualization", "Point Cloud"],
        "extensions": [{"name": "pangolin", "sourcedir": "."}]
    }"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = PackageManifest::from_json(MANIFEST).unwrap();
        assert_eq!(manifest.name, "pangolin");
        assert_eq!(manifest.version, "0.0.1");
        assert_eq!(manifest.license.as_deref(), Some("MIT"));
        assert_eq!(manifest.keywords.len(), 6);
        assert!(!manifest.zip_safe);
        assert_eq!(manifest.extension_names(), vec!["pangolin".to_string()]);
        assert!(manifest.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let manifest = PackageManifest::from_json(
            r#"{"name": "", "version": " ", "extensions": []}"#,
        )
        .unwrap();
        let codes: Vec<ErrorCode> = manifest.validate().iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::EmptyPackageName,
                ErrorCode::EmptyPackageVersion,
                ErrorCode::NoExtensions,
            ]
        );
    }

    #[test]
    fn test_validate_extension_errors() {
        let manifest = PackageManifest::from_json(
            r#"{
                "name": "pkg",
                "version": "1.0",
                "extensions": [
                    {"name": "core", "defines": {"CMAKE_BUILD_TYPE": "Debug"}},
                    {"name": "core", "defines": {"CMAKE_LIBRARY_OUTPUT_DIRECTORY_RELEASE": "x"}},
                    {"name": "bad-name", "defines": {"NOT VALID": "1", "WITH_GL": "ON"}}
                ]
            }"#,
        )
        .unwrap();
        let codes: Vec<ErrorCode> = manifest.validate().iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::ReservedDefine,
                ErrorCode::DuplicateExtensionName,
                ErrorCode::ReservedDefine,
                ErrorCode::InvalidModuleName,
                ErrorCode::InvalidDefineKey,
            ]
        );
    }

    #[test]
    fn test_reserved_defines() {
        assert!(is_reserved_define("PYTHON_EXECUTABLE"));
        assert!(is_reserved_define("CMAKE_LIBRARY_OUTPUT_DIRECTORY"));
        assert!(is_reserved_define("CMAKE_LIBRARY_OUTPUT_DIRECTORY_DEBUG"));
        assert!(!is_reserved_define("BUILD_EXAMPLES"));
    }

    #[test]
    fn test_round_trip_keeps_sourcedir_key() {
        let manifest = PackageManifest::from_json(MANIFEST).unwrap();
        let json = manifest.to_json_pretty().unwrap();
        assert!(json.contains("\"sourcedir\""));
        assert!(!json.contains("\"description\": null"));
    }
}
