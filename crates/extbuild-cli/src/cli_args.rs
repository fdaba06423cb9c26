//! CLI argument definitions for the extbuild command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Args, Parser, Subcommand};
use extbuild_backend_cmake::DEFAULT_JOBS;
use extbuild_cli::settings::BuildSettings;
use std::path::PathBuf;

/// extbuild - Build CMake-based Python extension modules
#[derive(Parser)]
#[command(name = "extbuild")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Configure and build every extension in the manifest
    Build {
        #[command(flatten)]
        options: BuildOptions,

        /// Print each command line and build directory
        #[arg(short, long)]
        verbose: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the commands a build would run, without running them
    Plan {
        #[command(flatten)]
        options: BuildOptions,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check CMake, the interpreter and the environment
    Doctor {
        /// Path to the CMake executable (default: EXTBUILD_CMAKE, then PATH)
        #[arg(long)]
        cmake: Option<PathBuf>,

        /// Path to the interpreter (default: EXTBUILD_PYTHON, then PATH)
        #[arg(long)]
        python: Option<PathBuf>,
    },

    /// Remove the temporary build directory
    Clean {
        /// Temporary build root (default: build/temp.<platform>)
        #[arg(long)]
        build_temp: Option<PathBuf>,

        /// Module output root (default: build/lib.<platform>)
        #[arg(long)]
        build_lib: Option<PathBuf>,

        /// Also remove the module output root
        #[arg(long)]
        all: bool,
    },
}

/// Options shared by `build` and `plan`.
#[derive(Args, Debug, Clone)]
pub(crate) struct BuildOptions {
    /// Path to the package manifest
    #[arg(short, long, default_value = "extbuild.json")]
    pub manifest: PathBuf,

    /// Build the Debug configuration instead of Release
    #[arg(long)]
    pub debug: bool,

    /// Temporary build root (default: build/temp.<platform>)
    #[arg(long)]
    pub build_temp: Option<PathBuf>,

    /// Module output root (default: build/lib.<platform>)
    #[arg(long)]
    pub build_lib: Option<PathBuf>,

    /// Parallel jobs for single-configuration builds
    #[arg(short, long, default_value_t = DEFAULT_JOBS)]
    pub jobs: u32,

    /// Path to the CMake executable (default: EXTBUILD_CMAKE, then PATH)
    #[arg(long)]
    pub cmake: Option<PathBuf>,

    /// Path to the interpreter (default: EXTBUILD_PYTHON, then PATH)
    #[arg(long)]
    pub python: Option<PathBuf>,
}

impl From<BuildOptions> for BuildSettings {
    fn from(options: BuildOptions) -> Self {
        Self {
            manifest: options.manifest,
            debug: options.debug,
            build_temp: options.build_temp,
            build_lib: options.build_lib,
            jobs: options.jobs,
            cmake: options.cmake,
            python: options.python,
        }
    }
}
