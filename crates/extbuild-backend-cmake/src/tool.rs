//! Locating CMake and checking that it can build on this platform.

use extbuild_spec::{Platform, ToolVersion};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{CmakeError, CmakeResult};
use crate::runner::CommandRunner;

/// Environment variable overriding the CMake executable.
pub const CMAKE_PATH_VAR: &str = "EXTBUILD_CMAKE";

/// Finds the CMake executable.
///
/// Order: explicit path, `EXTBUILD_CMAKE`, then `cmake` on `PATH`.
/// Candidates that do not exist are skipped.
pub fn find_cmake(explicit: Option<&Path>) -> Option<PathBuf> {
    find_cmake_with(explicit, std::env::var_os(CMAKE_PATH_VAR).map(PathBuf::from))
}

fn find_cmake_with(explicit: Option<&Path>, from_env: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = from_env {
        if path.exists() {
            return Some(path);
        }
    }

    let names = if cfg!(windows) {
        vec!["cmake.exe", "cmake"]
    } else {
        vec!["cmake"]
    };
    names.into_iter().find_map(|name| which::which(name).ok())
}

/// A CMake executable that answered a version query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolInfo {
    /// Path that was queried.
    pub path: PathBuf,
    /// Parsed version, if the output contained one.
    pub version: Option<ToolVersion>,
}

/// Queries the tool's version and enforces the platform minimum.
///
/// An invocation failure is reported once, naming every extension that
/// cannot be built. On the multi-configuration family the version must parse
/// and be at least [`ToolVersion::min_multi_config`]; elsewhere it is parsed
/// best-effort.
pub fn check_tool<R: CommandRunner + ?Sized>(
    runner: &mut R,
    program: &Path,
    platform: &Platform,
    extensions: &[String],
) -> CmakeResult<ToolInfo> {
    let output = runner
        .query_version(program)
        .map_err(|e| CmakeError::tool_not_found(extensions.iter().cloned(), Some(e)))?;

    let version = ToolVersion::parse_tool_output(&output);

    if platform.is_multi_config() {
        let found = version.clone().ok_or_else(|| CmakeError::UnparseableVersion {
            output: output.trim().to_string(),
        })?;
        let required = ToolVersion::min_multi_config();
        if found < required {
            return Err(CmakeError::VersionTooLow {
                found,
                required,
                platform: platform.os.as_str().to_string(),
            });
        }
    }

    Ok(ToolInfo {
        path: program.to_path_buf(),
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::Invocation;
    use crate::runner::ExitOutcome;
    use extbuild_spec::HostOs;

    struct VersionOnly(std::io::Result<String>);

    impl CommandRunner for VersionOnly {
        fn query_version(&mut self, _program: &Path) -> std::io::Result<String> {
            match &self.0 {
                Ok(s) => Ok(s.clone()),
                Err(e) => Err(std::io::Error::new(e.kind(), e.to_string())),
            }
        }

        fn run(&mut self, _invocation: &Invocation) -> std::io::Result<ExitOutcome> {
            panic!("check_tool must not run build steps");
        }
    }

    fn windows() -> Platform {
        Platform::new(HostOs::Windows, 64, "x86_64")
    }

    fn linux() -> Platform {
        Platform::new(HostOs::Linux, 64, "x86_64")
    }

    fn names() -> Vec<String> {
        vec!["pangolin".to_string(), "viewer".to_string()]
    }

    #[test]
    fn test_not_found_names_all_extensions() {
        let mut runner = VersionOnly(Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        )));
        let err = check_tool(&mut runner, Path::new("cmake"), &linux(), &names()).unwrap_err();
        match err {
            CmakeError::ToolNotFound { extensions, .. } => assert_eq!(extensions, names()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_old_version_rejected_on_multi_config() {
        let mut runner = VersionOnly(Ok("cmake version 3.0.2\n".to_string()));
        let err = check_tool(&mut runner, Path::new("cmake"), &windows(), &names()).unwrap_err();
        assert!(matches!(err, CmakeError::VersionTooLow { .. }));
    }

    #[test]
    fn test_old_version_accepted_on_single_config() {
        let mut runner = VersionOnly(Ok("cmake version 2.8.12\n".to_string()));
        let info = check_tool(&mut runner, Path::new("cmake"), &linux(), &names()).unwrap();
        assert_eq!(info.version, Some("2.8.12".parse().unwrap()));
    }

    #[test]
    fn test_minimum_version_accepted() {
        let mut runner = VersionOnly(Ok("cmake version 3.1.0\n".to_string()));
        assert!(check_tool(&mut runner, Path::new("cmake"), &windows(), &names()).is_ok());
    }

    #[test]
    fn test_unparseable_version_on_multi_config() {
        let mut runner = VersionOnly(Ok("something unexpected\n".to_string()));
        let err = check_tool(&mut runner, Path::new("cmake"), &windows(), &names()).unwrap_err();
        assert!(matches!(err, CmakeError::UnparseableVersion { .. }));

        let info = check_tool(&mut runner, Path::new("cmake"), &linux(), &names()).unwrap();
        assert_eq!(info.version, None);
    }

    #[test]
    fn test_find_cmake_prefers_existing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("cmake-custom");
        std::fs::write(&fake, "").unwrap();
        assert_eq!(find_cmake_with(Some(&fake), None), Some(fake.clone()));

        let missing = dir.path().join("missing");
        assert_eq!(find_cmake_with(Some(&missing), Some(fake.clone())), Some(fake));
    }
}
