//! extbuild CMake Backend
//!
//! Builds native extension modules by running CMake as a subprocess.
//!
//! # Overview
//!
//! For every run the orchestrator:
//!
//! 1. locates CMake and queries `cmake --version`, failing once for all
//!    extensions when the tool is missing, and enforcing CMake >= 3.1.0 on
//!    the multi-configuration family (Windows);
//! 2. for each extension, creates `<build_temp>/<name>`, runs
//!    `cmake <source_dir> <configure args>` and then
//!    `cmake --build . --config <Cfg> -- <parallel flag>` in that directory.
//!
//! Argument derivation is a pure function ([`args::derive_args`]) of the
//! descriptor and a [`DerivationContext`], so every platform family can be
//! checked from any host.
//!
//! | Family | Configure extras | Build trailer |
//! |--------|------------------|---------------|
//! | multi-config (Windows) | `-DCMAKE_LIBRARY_OUTPUT_DIRECTORY_<CFG>=<dir>`, `-A x64` on 64-bit | `-- /m` |
//! | single-config | `-DCMAKE_BUILD_TYPE=<Cfg>` | `-- -j<jobs>` |
//!
//! # Example
//!
//! ```ignore
//! use extbuild_backend_cmake::{NullReporter, Orchestrator, OrchestratorConfig};
//! use extbuild_spec::PackageManifest;
//! use std::path::Path;
//!
//! let manifest = PackageManifest::load(Path::new("extbuild.json"))?;
//! let mut orchestrator = Orchestrator::with_config(OrchestratorConfig::default());
//! let summary = orchestrator.build_manifest(&manifest, &mut NullReporter)?;
//! for ext in &summary.extensions {
//!     println!("{} -> {}", ext.name, ext.output_dir.display());
//! }
//! ```
//!
//! # Crate Structure
//!
//! - [`orchestrator`] - run sequencing and configuration
//! - [`args`] - configure/build argument derivation
//! - [`invocation`] - command lines and steps
//! - [`runner`] - blocking subprocess execution
//! - [`tool`] - CMake lookup and version check
//! - [`interpreter`] - interpreter lookup
//! - [`reporter`] - progress hooks
//! - [`error`] - error types

pub mod args;
pub mod error;
pub mod interpreter;
pub mod invocation;
pub mod orchestrator;
pub mod reporter;
pub mod runner;
pub mod tool;

pub use args::{derive_args, version_cxxflags, ArgPlan, DerivationContext, DEFAULT_JOBS};
pub use error::{CmakeError, CmakeResult};
pub use interpreter::{find_interpreter, INTERPRETER_PATH_VAR};
pub use invocation::{Invocation, Step};
pub use orchestrator::{
    check_source_tree, BuildSummary, ExtensionOutcome, ExtensionPlan, Orchestrator,
    OrchestratorConfig,
};
pub use reporter::{BuildReporter, NullReporter};
pub use runner::{CommandRunner, ExitOutcome, SystemRunner};
pub use tool::{check_tool, find_cmake, ToolInfo, CMAKE_PATH_VAR};
