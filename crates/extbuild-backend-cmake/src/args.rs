//! Platform-conditional argument derivation.
//!
//! [`derive_args`] is a pure function of an extension descriptor and a
//! [`DerivationContext`]. Everything it depends on (environment, host
//! platform, build type, interpreter, package version) is passed in, so it
//! can be exercised for every platform family from any host.

use extbuild_spec::{BuildType, EnvSnapshot, ExtensionDescriptor, Platform, CXXFLAGS_VAR};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default parallel job count for single-configuration builds.
pub const DEFAULT_JOBS: u32 = 2;

/// Parallel-build flag passed through to MSBuild.
const MULTI_CONFIG_PARALLEL_FLAG: &str = "/m";

/// Inputs that shape the derived arguments.
#[derive(Debug, Clone)]
pub struct DerivationContext {
    /// Host platform.
    pub platform: Platform,
    /// Environment captured for this run.
    pub env: EnvSnapshot,
    /// Requested build type.
    pub build_type: BuildType,
    /// Interpreter the module is built against.
    pub interpreter: PathBuf,
    /// Package version compiled in as `VERSION_INFO`.
    pub package_version: String,
    /// Root directory compiled modules are placed under.
    pub build_lib: PathBuf,
    /// Parallel jobs for single-configuration builds.
    pub jobs: u32,
}

impl DerivationContext {
    /// Creates a context for the host platform with a release build.
    pub fn new(
        interpreter: impl Into<PathBuf>,
        package_version: impl Into<String>,
        build_lib: impl Into<PathBuf>,
    ) -> Self {
        Self {
            platform: Platform::host(),
            env: EnvSnapshot::default(),
            build_type: BuildType::default(),
            interpreter: interpreter.into(),
            package_version: package_version.into(),
            build_lib: build_lib.into(),
            jobs: DEFAULT_JOBS,
        }
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn env(mut self, env: EnvSnapshot) -> Self {
        self.env = env;
        self
    }

    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    pub fn jobs(mut self, jobs: u32) -> Self {
        self.jobs = jobs.max(1);
        self
    }
}

/// Derived arguments for one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgPlan {
    /// Build type the plan was derived for.
    pub build_type: BuildType,
    /// Directory the compiled module lands in.
    pub output_dir: PathBuf,
    /// Arguments after the source directory on the configure step.
    pub configure: Vec<String>,
    /// Arguments after `--build .` on the build step.
    pub build: Vec<String>,
    /// Environment overrides for the configure step.
    pub env: BTreeMap<String, String>,
    /// Toolchain file in use, if any.
    pub toolchain: Option<String>,
}

/// Derives configure and build arguments for `ext`.
pub fn derive_args(ext: &ExtensionDescriptor, ctx: &DerivationContext) -> ArgPlan {
    let output_dir = ext.output_dir(&ctx.build_lib);
    let outdir = output_dir.display().to_string();
    let cfg = ctx.build_type.as_cmake_str();

    let mut configure = vec![
        define("CMAKE_LIBRARY_OUTPUT_DIRECTORY", &outdir),
        define("PYTHON_EXECUTABLE", &ctx.interpreter.display().to_string()),
    ];

    // One flat -D argument, never a nested list.
    let toolchain = ctx.env.toolchain_file.clone();
    if let Some(ref file) = toolchain {
        configure.push(define("CMAKE_TOOLCHAIN_FILE", file));
    }

    let mut build = vec!["--config".to_string(), cfg.to_string()];

    if ctx.platform.is_multi_config() {
        configure.push(define(
            &format!(
                "CMAKE_LIBRARY_OUTPUT_DIRECTORY_{}",
                ctx.build_type.as_upper_str()
            ),
            &outdir,
        ));
        if ctx.platform.is_64bit() {
            configure.push("-A".to_string());
            configure.push("x64".to_string());
        }
        build.push("--".to_string());
        build.push(MULTI_CONFIG_PARALLEL_FLAG.to_string());
    } else {
        configure.push(define("CMAKE_BUILD_TYPE", cfg));
        build.push("--".to_string());
        build.push(format!("-j{}", ctx.jobs.max(1)));
    }

    for (key, value) in &ext.defines {
        configure.push(define(key, value));
    }

    let mut env = BTreeMap::new();
    env.insert(
        CXXFLAGS_VAR.to_string(),
        version_cxxflags(ctx.env.cxxflags.as_deref(), &ctx.package_version),
    );

    ArgPlan {
        build_type: ctx.build_type,
        output_dir,
        configure,
        build,
        env,
        toolchain,
    }
}

/// Appends the `VERSION_INFO` definition to existing compiler flags.
///
/// The quotes are backslash-escaped so the definition survives the build
/// tool's own shell expansion and reaches the compiler as a string literal.
pub fn version_cxxflags(existing: Option<&str>, version: &str) -> String {
    let definition = format!("-DVERSION_INFO=\\\"{}\\\"", version);
    match existing.map(str::trim) {
        Some(flags) if !flags.is_empty() => format!("{} {}", flags, definition),
        _ => definition,
    }
}

fn define(key: &str, value: &str) -> String {
    format!("-D{}={}", key, value)
}
