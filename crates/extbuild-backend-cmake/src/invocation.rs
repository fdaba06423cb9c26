//! A single CMake command line, ready to run or print.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::args::ArgPlan;

/// The two CMake phases run for every extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Generate build files from the project description.
    Configure,
    /// Compile and link with the generated build files.
    Build,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Configure => "configure",
            Step::Build => "build",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A program, its arguments, working directory and environment overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Which phase this invocation runs.
    pub step: Step,
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Working directory.
    pub cwd: PathBuf,
    /// Variables set on top of the inherited environment.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl Invocation {
    /// `cmake <source_dir> <configure args>` with the plan's environment.
    pub fn configure(program: &Path, source_dir: &Path, plan: &ArgPlan, cwd: &Path) -> Self {
        let mut args = Vec::with_capacity(plan.configure.len() + 1);
        args.push(source_dir.display().to_string());
        args.extend(plan.configure.iter().cloned());
        Self {
            step: Step::Configure,
            program: program.to_path_buf(),
            args,
            cwd: cwd.to_path_buf(),
            env: plan.env.clone(),
        }
    }

    /// `cmake --build . <build args>`.
    pub fn build(program: &Path, plan: &ArgPlan, cwd: &Path) -> Self {
        let mut args = vec!["--build".to_string(), ".".to_string()];
        args.extend(plan.build.iter().cloned());
        Self {
            step: Step::Build,
            program: program.to_path_buf(),
            args,
            cwd: cwd.to_path_buf(),
            env: BTreeMap::new(),
        }
    }

    /// Renders the command line for display, quoting arguments with spaces.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .map(|part| quote(&part))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn quote(part: &str) -> String {
    if part.is_empty() || part.contains(char::is_whitespace) {
        format!("\"{}\"", part.replace('"', "\\\""))
    } else {
        part.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extbuild_spec::BuildType;

    fn plan() -> ArgPlan {
        ArgPlan {
            build_type: BuildType::Release,
            output_dir: PathBuf::from("/out"),
            configure: vec!["-DA=1".to_string()],
            build: vec!["--config".to_string(), "Release".to_string()],
            env: BTreeMap::from([("CXXFLAGS".to_string(), "-O2".to_string())]),
            toolchain: None,
        }
    }

    #[test]
    fn test_configure_puts_source_dir_first() {
        let inv = Invocation::configure(
            Path::new("cmake"),
            Path::new("/src/pangolin"),
            &plan(),
            Path::new("/tmp/b"),
        );
        assert_eq!(inv.step, Step::Configure);
        assert_eq!(inv.args, vec!["/src/pangolin".to_string(), "-DA=1".to_string()]);
        assert_eq!(inv.env.get("CXXFLAGS").map(String::as_str), Some("-O2"));
    }

    #[test]
    fn test_build_runs_in_place() {
        let inv = Invocation::build(Path::new("cmake"), &plan(), Path::new("/tmp/b"));
        assert_eq!(inv.args[..2], ["--build".to_string(), ".".to_string()]);
        assert!(inv.env.is_empty());
        assert_eq!(inv.command_line(), "cmake --build . --config Release");
    }

    #[test]
    fn test_command_line_quotes_spaces() {
        let mut inv = Invocation::build(Path::new("cmake"), &plan(), Path::new("/tmp/b"));
        inv.args.push("-DPYTHON_EXECUTABLE=C:/Program Files/Python/python.exe".to_string());
        assert!(inv
            .command_line()
            .ends_with("\"-DPYTHON_EXECUTABLE=C:/Program Files/Python/python.exe\""));
    }
}
