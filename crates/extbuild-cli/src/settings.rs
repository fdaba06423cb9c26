//! Build settings shared by the `build`, `plan` and `clean` commands.

use anyhow::{Context, Result};
use extbuild_backend_cmake::{OrchestratorConfig, DEFAULT_JOBS};
use extbuild_spec::{BuildType, PackageManifest, MANIFEST_FILE};
use std::path::PathBuf;

/// Flag values, before defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub manifest: PathBuf,
    pub debug: bool,
    pub build_temp: Option<PathBuf>,
    pub build_lib: Option<PathBuf>,
    pub jobs: u32,
    pub cmake: Option<PathBuf>,
    pub python: Option<PathBuf>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(MANIFEST_FILE),
            debug: false,
            build_temp: None,
            build_lib: None,
            jobs: DEFAULT_JOBS,
            cmake: None,
            python: None,
        }
    }
}

impl BuildSettings {
    pub fn build_type(&self) -> BuildType {
        BuildType::from_debug_flag(self.debug)
    }

    /// Loads and validates the manifest named by `--manifest`.
    pub fn load_manifest(&self) -> Result<PackageManifest> {
        PackageManifest::load(&self.manifest)
            .with_context(|| format!("Failed to load manifest: {}", self.manifest.display()))
    }

    /// Builds the orchestrator configuration.
    ///
    /// Unset directories keep the platform-tagged defaults under `build/`.
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        let mut config = OrchestratorConfig::default()
            .build_type(self.build_type())
            .jobs(self.jobs);
        if let Some(ref dir) = self.build_temp {
            config = config.build_temp(dir);
        }
        if let Some(ref dir) = self.build_lib {
            config = config.build_lib(dir);
        }
        if let Some(ref path) = self.cmake {
            config = config.cmake_path(path);
        }
        if let Some(ref path) = self.python {
            config = config.interpreter(path);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = BuildSettings::default();
        assert_eq!(settings.manifest, PathBuf::from("extbuild.json"));
        assert_eq!(settings.build_type(), BuildType::Release);

        let config = settings.orchestrator_config();
        assert_eq!(config.jobs, 2);
        assert_eq!(config.cmake_path, None);
        assert!(config
            .build_temp
            .to_string_lossy()
            .contains(&format!("temp.{}", config.platform.tag())));
    }

    #[test]
    fn test_overrides_reach_config() {
        let settings = BuildSettings {
            debug: true,
            build_temp: Some(PathBuf::from("out/tmp")),
            build_lib: Some(PathBuf::from("out/lib")),
            jobs: 8,
            cmake: Some(PathBuf::from("/opt/cmake")),
            python: Some(PathBuf::from("/usr/bin/python3")),
            ..BuildSettings::default()
        };

        let config = settings.orchestrator_config();
        assert_eq!(config.build_type, BuildType::Debug);
        assert_eq!(config.build_temp, PathBuf::from("out/tmp"));
        assert_eq!(config.build_lib, PathBuf::from("out/lib"));
        assert_eq!(config.jobs, 8);
        assert_eq!(config.cmake_path, Some(PathBuf::from("/opt/cmake")));
        assert_eq!(config.interpreter, Some(PathBuf::from("/usr/bin/python3")));
    }

    #[test]
    fn test_load_manifest_reports_path() {
        let settings = BuildSettings {
            manifest: PathBuf::from("/nonexistent/extbuild.json"),
            ..BuildSettings::default()
        };
        let err = settings.load_manifest().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/extbuild.json"));
    }
}
