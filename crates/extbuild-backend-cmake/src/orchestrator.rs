//! CMake build orchestrator.
//!
//! Checks the tool once, then runs the configure and build steps for each
//! extension in order. Any failure aborts the whole run: there is no retry
//! and no cleanup of partial artifacts.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use extbuild_spec::{
    absolutize, BuildType, EnvSnapshot, ExtensionDescriptor, PackageManifest, Platform,
};
use serde::Serialize;

use crate::args::{derive_args, ArgPlan, DerivationContext, DEFAULT_JOBS};
use crate::error::{CmakeError, CmakeResult};
use crate::interpreter::find_interpreter;
use crate::invocation::{Invocation, Step};
use crate::reporter::BuildReporter;
use crate::runner::{CommandRunner, SystemRunner};
use crate::tool::{check_tool, find_cmake, ToolInfo};

/// Configuration for the CMake orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Path to the CMake executable.
    pub cmake_path: Option<PathBuf>,
    /// Path to the interpreter passed as `PYTHON_EXECUTABLE`.
    pub interpreter: Option<PathBuf>,
    /// Root for per-extension temporary build directories.
    pub build_temp: PathBuf,
    /// Root compiled modules are placed under.
    pub build_lib: PathBuf,
    /// Requested build type.
    pub build_type: BuildType,
    /// Parallel jobs for single-configuration builds.
    pub jobs: u32,
    /// Host platform.
    pub platform: Platform,
    /// Environment snapshot.
    pub env: EnvSnapshot,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        let platform = Platform::host();
        let tag = platform.tag();
        Self {
            cmake_path: None,
            interpreter: None,
            build_temp: PathBuf::from("build").join(format!("temp.{}", tag)),
            build_lib: PathBuf::from("build").join(format!("lib.{}", tag)),
            build_type: BuildType::default(),
            jobs: DEFAULT_JOBS,
            platform,
            env: EnvSnapshot::capture(),
        }
    }
}

impl OrchestratorConfig {
    /// Sets the CMake executable path.
    pub fn cmake_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cmake_path = Some(path.into());
        self
    }

    /// Sets the interpreter path.
    pub fn interpreter(mut self, path: impl Into<PathBuf>) -> Self {
        self.interpreter = Some(path.into());
        self
    }

    /// Sets the temporary build root.
    pub fn build_temp(mut self, path: impl Into<PathBuf>) -> Self {
        self.build_temp = path.into();
        self
    }

    /// Sets the output root for compiled modules.
    pub fn build_lib(mut self, path: impl Into<PathBuf>) -> Self {
        self.build_lib = path.into();
        self
    }

    /// Sets the build type.
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Sets the parallel job count (at least 1).
    pub fn jobs(mut self, jobs: u32) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Overrides the host platform.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Replaces the environment snapshot.
    pub fn env(mut self, env: EnvSnapshot) -> Self {
        self.env = env;
        self
    }

    /// Temporary build directory for one extension.
    pub fn build_dir_for(&self, ext: &ExtensionDescriptor) -> PathBuf {
        self.build_temp.join(&ext.name)
    }

    /// CMake runs inside the per-extension build directory, so the output
    /// root and interpreter are anchored at the current directory first.
    fn derivation_context(
        &self,
        interpreter: &Path,
        package_version: &str,
    ) -> CmakeResult<DerivationContext> {
        let cwd = std::env::current_dir().map_err(|source| CmakeError::CurrentDir { source })?;
        Ok(DerivationContext {
            platform: self.platform.clone(),
            env: self.env.clone(),
            build_type: self.build_type,
            interpreter: absolutize(interpreter, &cwd),
            package_version: package_version.to_string(),
            build_lib: absolutize(&self.build_lib, &cwd),
            jobs: self.jobs,
        })
    }
}

/// Everything that would run for one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionPlan {
    /// Module name.
    pub name: String,
    /// Temporary build directory.
    pub build_dir: PathBuf,
    /// Derived arguments.
    pub args: ArgPlan,
    /// Configure step.
    pub configure: Invocation,
    /// Build step.
    pub build: Invocation,
}

/// Outcome of building one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionOutcome {
    /// Module name.
    pub name: String,
    /// Directory the compiled module was placed in.
    pub output_dir: PathBuf,
    /// Temporary build directory.
    pub build_dir: PathBuf,
    /// Cross-compilation toolchain file in use, if any.
    pub toolchain: Option<String>,
    /// Time spent in the configure step.
    pub configure_time: Duration,
    /// Time spent in the build step.
    pub build_time: Duration,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// The CMake executable used.
    pub tool: ToolInfo,
    /// Interpreter passed to the build.
    pub interpreter: PathBuf,
    /// Per-extension outcomes, in build order.
    pub extensions: Vec<ExtensionOutcome>,
}

/// The CMake orchestrator.
pub struct Orchestrator<R: CommandRunner = SystemRunner> {
    config: OrchestratorConfig,
    runner: R,
}

impl Orchestrator<SystemRunner> {
    /// Creates a new orchestrator with default configuration.
    pub fn new() -> Self {
        Self::with_config(OrchestratorConfig::default())
    }

    /// Creates a new orchestrator with the given configuration.
    pub fn with_config(config: OrchestratorConfig) -> Self {
        Self {
            config,
            runner: SystemRunner::new(),
        }
    }
}

impl Default for Orchestrator<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> Orchestrator<R> {
    /// Creates an orchestrator that runs commands through `runner`.
    pub fn with_runner(config: OrchestratorConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Returns the command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Consumes the orchestrator and returns the command runner.
    pub fn into_runner(self) -> R {
        self.runner
    }

    fn resolve_interpreter(&self) -> CmakeResult<PathBuf> {
        find_interpreter(self.config.interpreter.as_deref()).ok_or(CmakeError::InterpreterNotFound)
    }

    /// Derives every invocation without running anything.
    ///
    /// CMake does not have to be installed; `cmake` is shown when it cannot
    /// be found.
    pub fn plan(
        &self,
        extensions: &[ExtensionDescriptor],
        package_version: &str,
    ) -> CmakeResult<Vec<ExtensionPlan>> {
        let program = find_cmake(self.config.cmake_path.as_deref())
            .unwrap_or_else(|| PathBuf::from("cmake"));
        let interpreter = self.resolve_interpreter()?;
        let ctx = self.config.derivation_context(&interpreter, package_version)?;

        Ok(extensions
            .iter()
            .map(|ext| self.plan_extension(&program, ext, &ctx))
            .collect())
    }

    fn plan_extension(
        &self,
        program: &Path,
        ext: &ExtensionDescriptor,
        ctx: &DerivationContext,
    ) -> ExtensionPlan {
        let build_dir = self.config.build_dir_for(ext);
        let args = derive_args(ext, ctx);
        let configure = Invocation::configure(program, &ext.source_dir, &args, &build_dir);
        let build = Invocation::build(program, &args, &build_dir);
        ExtensionPlan {
            name: ext.name.clone(),
            build_dir,
            args,
            configure,
            build,
        }
    }

    /// Builds every extension of a manifest, passing its version through.
    pub fn build_manifest(
        &mut self,
        manifest: &PackageManifest,
        reporter: &mut dyn BuildReporter,
    ) -> CmakeResult<BuildSummary> {
        self.build(&manifest.extensions, &manifest.version, reporter)
    }

    /// Checks the tool, then configures and builds each extension in order.
    pub fn build(
        &mut self,
        extensions: &[ExtensionDescriptor],
        package_version: &str,
        reporter: &mut dyn BuildReporter,
    ) -> CmakeResult<BuildSummary> {
        let names: Vec<String> = extensions.iter().map(|e| e.name.clone()).collect();

        let program = find_cmake(self.config.cmake_path.as_deref())
            .ok_or_else(|| CmakeError::tool_not_found(names.iter().cloned(), None))?;
        let tool = check_tool(&mut self.runner, &program, &self.config.platform, &names)?;
        reporter.tool_detected(&tool);

        let interpreter = self.resolve_interpreter()?;
        let ctx = self
            .config
            .derivation_context(&interpreter, package_version)?;

        let mut outcomes = Vec::with_capacity(extensions.len());
        for ext in extensions {
            outcomes.push(self.build_extension(&program, ext, &ctx, reporter)?);
        }

        Ok(BuildSummary {
            tool,
            interpreter: ctx.interpreter,
            extensions: outcomes,
        })
    }

    fn build_extension(
        &mut self,
        program: &Path,
        ext: &ExtensionDescriptor,
        ctx: &DerivationContext,
        reporter: &mut dyn BuildReporter,
    ) -> CmakeResult<ExtensionOutcome> {
        check_source_tree(ext)?;

        let plan = self.plan_extension(program, ext, ctx);
        std::fs::create_dir_all(&plan.build_dir).map_err(|source| CmakeError::CreateBuildDir {
            path: plan.build_dir.clone(),
            source,
        })?;
        reporter.build_dir_ready(&ext.name, &plan.build_dir);

        if let Some(ref toolchain) = plan.args.toolchain {
            reporter.toolchain_in_use(&ext.name, toolchain);
        }

        let configure_time = self.run_step(&ext.name, &plan.configure, reporter)?;
        let build_time = self.run_step(&ext.name, &plan.build, reporter)?;

        Ok(ExtensionOutcome {
            name: plan.name,
            output_dir: plan.args.output_dir,
            build_dir: plan.build_dir,
            toolchain: plan.args.toolchain,
            configure_time,
            build_time,
        })
    }

    fn run_step(
        &mut self,
        extension: &str,
        invocation: &Invocation,
        reporter: &mut dyn BuildReporter,
    ) -> CmakeResult<Duration> {
        reporter.step_started(extension, invocation);
        let start = Instant::now();
        let outcome = self
            .runner
            .run(invocation)
            .map_err(|source| CmakeError::SpawnFailed {
                extension: extension.to_string(),
                step: invocation.step,
                source,
            })?;
        if !outcome.is_success() {
            return Err(CmakeError::step_failed(
                invocation.step,
                extension,
                outcome.code,
            ));
        }
        let elapsed = start.elapsed();
        reporter.step_finished(extension, invocation.step, elapsed);
        Ok(elapsed)
    }
}

/// Verifies that the extension's source tree exists and has a build descriptor.
pub fn check_source_tree(ext: &ExtensionDescriptor) -> CmakeResult<()> {
    if !ext.source_dir.is_dir() {
        return Err(CmakeError::SourceDirMissing {
            extension: ext.name.clone(),
            path: ext.source_dir.clone(),
        });
    }
    let descriptor = ext.build_descriptor();
    if !descriptor.is_file() {
        return Err(CmakeError::BuildDescriptorMissing {
            extension: ext.name.clone(),
            path: descriptor,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use extbuild_spec::HostOs;

    #[test]
    fn test_config_builder() {
        let config = OrchestratorConfig::default()
            .cmake_path("/opt/cmake/bin/cmake")
            .interpreter("/usr/bin/python3")
            .build_temp("out/tmp")
            .build_lib("out/lib")
            .build_type(BuildType::Debug)
            .jobs(0)
            .platform(Platform::new(HostOs::Windows, 64, "x86_64"))
            .env(EnvSnapshot::default());

        assert_eq!(config.cmake_path, Some(PathBuf::from("/opt/cmake/bin/cmake")));
        assert_eq!(config.interpreter, Some(PathBuf::from("/usr/bin/python3")));
        assert_eq!(config.build_temp, PathBuf::from("out/tmp"));
        assert_eq!(config.build_lib, PathBuf::from("out/lib"));
        assert_eq!(config.build_type, BuildType::Debug);
        assert_eq!(config.jobs, 1);
        assert!(config.platform.is_multi_config());
    }

    #[test]
    fn test_default_dirs_are_tagged_by_platform() {
        let config = OrchestratorConfig::default();
        let tag = Platform::host().tag();
        assert!(config.build_temp.ends_with(format!("temp.{}", tag)));
        assert!(config.build_lib.ends_with(format!("lib.{}", tag)));
    }

    #[test]
    fn test_build_dir_is_per_extension() {
        let config = OrchestratorConfig::default().build_temp("tmp");
        let ext = ExtensionDescriptor::with_base("pkg.core", ".", Path::new("/src"));
        assert_eq!(config.build_dir_for(&ext), PathBuf::from("tmp").join("pkg.core"));
    }

    #[test]
    fn test_derivation_context_anchors_relative_paths() {
        let config = OrchestratorConfig::default()
            .build_lib("build/lib.test")
            .env(EnvSnapshot::default());
        let ctx = config
            .derivation_context(Path::new("venv/bin/python"), "0.0.1")
            .unwrap();

        let cwd = std::env::current_dir().unwrap();
        assert!(ctx.build_lib.is_absolute());
        assert_eq!(ctx.build_lib, cwd.join("build").join("lib.test"));
        assert_eq!(ctx.interpreter, cwd.join("venv").join("bin").join("python"));
    }

    #[test]
    fn test_derivation_context_keeps_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("lib");
        let python = dir.path().join("python3");
        let config = OrchestratorConfig::default().build_lib(&lib);
        let ctx = config.derivation_context(&python, "1.0").unwrap();
        assert_eq!(ctx.build_lib, lib);
        assert_eq!(ctx.interpreter, python);
    }

    #[test]
    fn test_check_source_tree() {
        let dir = tempfile::tempdir().unwrap();
        let ext = ExtensionDescriptor::with_base("pangolin", dir.path(), Path::new("/"));
        assert!(matches!(
            check_source_tree(&ext),
            Err(CmakeError::BuildDescriptorMissing { .. })
        ));

        std::fs::write(dir.path().join("CMakeLists.txt"), "project(pangolin)\n").unwrap();
        assert!(check_source_tree(&ext).is_ok());

        let missing = ExtensionDescriptor::with_base("gone", dir.path().join("gone"), Path::new("/"));
        assert!(matches!(
            check_source_tree(&missing),
            Err(CmakeError::SourceDirMissing { .. })
        ));
    }
}
