//! Doctor command implementation
//!
//! Checks the build tool, interpreter and environment.

use anyhow::Result;
use colored::Colorize;
use extbuild_backend_cmake::{find_cmake, find_interpreter, CommandRunner, SystemRunner};
use extbuild_spec::{EnvSnapshot, Platform, PlatformFamily, ToolVersion};
use std::path::Path;
use std::process::ExitCode;

/// Run the doctor command
///
/// Checks:
/// - CMake installation and version
/// - Interpreter lookup
/// - Cross-compilation toolchain variable
/// - Platform family
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if CMake or the interpreter is
/// missing or CMake is too old for this platform
pub fn run(cmake: Option<&Path>, python: Option<&Path>) -> Result<ExitCode> {
    println!("{}", "extbuild Doctor".cyan().bold());
    println!("{}", "===============".cyan());
    println!();

    let platform = Platform::host();
    let mut all_ok = true;

    println!("{}", "Versions:".bold());
    println!(
        "  {} extbuild-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("{}", "Platform:".bold());
    println!(
        "  {} {} ({})",
        "->".green(),
        platform.tag(),
        describe_family(platform.family())
    );
    println!();

    println!("{}", "Dependencies:".bold());
    match find_cmake(cmake) {
        Some(path) => match SystemRunner::new().query_version(&path) {
            Ok(output) => {
                let version = ToolVersion::parse_tool_output(&output);
                match version_status(version.as_ref(), &platform) {
                    VersionStatus::Ok => println!(
                        "  {} CMake {} ({})",
                        "ok".green(),
                        display_version(version.as_ref()),
                        path.display()
                    ),
                    VersionStatus::TooOld => {
                        println!(
                            "  {} CMake {} is older than {} ({})",
                            "!!".red(),
                            display_version(version.as_ref()),
                            ToolVersion::min_multi_config(),
                            path.display()
                        );
                        all_ok = false;
                    }
                    VersionStatus::Unknown => {
                        println!(
                            "  {} CMake version could not be determined ({})",
                            "!!".red(),
                            path.display()
                        );
                        all_ok = false;
                    }
                }
            }
            Err(e) => {
                println!("  {} CMake check failed: {}", "!!".red(), e);
                all_ok = false;
            }
        },
        None => {
            println!("  {} CMake not found", "!!".red());
            println!(
                "     {}",
                "CMake is required to build extensions. Set EXTBUILD_CMAKE or add cmake to PATH."
                    .dimmed()
            );
            all_ok = false;
        }
    }

    match find_interpreter(python) {
        Some(path) => println!("  {} Interpreter ({})", "ok".green(), path.display()),
        None => {
            println!("  {} Interpreter not found", "!!".red());
            println!(
                "     {}",
                "Set EXTBUILD_PYTHON or add python3 to PATH.".dimmed()
            );
            all_ok = false;
        }
    }
    println!();

    println!("{}", "Environment:".bold());
    let env = EnvSnapshot::capture();
    match env.toolchain_file {
        Some(ref toolchain) => println!("  {} USING TOOLCHAIN: {}", "!!".yellow(), toolchain),
        None => println!("  {} CMAKE_TOOLCHAIN_FILE not set", "->".green()),
    }
    match env.cxxflags {
        Some(ref flags) => println!("  {} CXXFLAGS={}", "->".green(), flags),
        None => println!("  {} CXXFLAGS not set", "->".green()),
    }
    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VersionStatus {
    Ok,
    TooOld,
    Unknown,
}

/// Only the multi-configuration family enforces a minimum.
fn version_status(version: Option<&ToolVersion>, platform: &Platform) -> VersionStatus {
    if !platform.is_multi_config() {
        return VersionStatus::Ok;
    }
    match version {
        Some(v) if *v >= ToolVersion::min_multi_config() => VersionStatus::Ok,
        Some(_) => VersionStatus::TooOld,
        None => VersionStatus::Unknown,
    }
}

fn display_version(version: Option<&ToolVersion>) -> String {
    version
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn describe_family(family: PlatformFamily) -> &'static str {
    match family {
        PlatformFamily::MultiConfig => "multi-configuration, build type chosen at build time",
        PlatformFamily::SingleConfig => "single-configuration, build type chosen at configure time",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extbuild_spec::HostOs;

    fn windows() -> Platform {
        Platform::new(HostOs::Windows, 64, "x86_64")
    }

    fn linux() -> Platform {
        Platform::new(HostOs::Linux, 64, "x86_64")
    }

    #[test]
    fn test_version_status_multi_config() {
        let old = ToolVersion::new(vec![3, 0, 2]);
        let min = ToolVersion::new(vec![3, 1]);
        let new = ToolVersion::new(vec![3, 28, 1]);
        assert_eq!(version_status(Some(&old), &windows()), VersionStatus::TooOld);
        assert_eq!(version_status(Some(&min), &windows()), VersionStatus::Ok);
        assert_eq!(version_status(Some(&new), &windows()), VersionStatus::Ok);
        assert_eq!(version_status(None, &windows()), VersionStatus::Unknown);
    }

    #[test]
    fn test_version_status_single_config_is_informational() {
        let old = ToolVersion::new(vec![2, 8, 12]);
        assert_eq!(version_status(Some(&old), &linux()), VersionStatus::Ok);
        assert_eq!(version_status(None, &linux()), VersionStatus::Ok);
    }

    #[test]
    fn test_display_version() {
        let v = ToolVersion::parse_tool_output("cmake version 3.27.4\n");
        assert_eq!(display_version(v.as_ref()), "3.27.4");
        assert_eq!(display_version(None), "unknown");
    }

    #[test]
    fn test_describe_family() {
        assert!(describe_family(windows().family()).starts_with("multi"));
        assert!(describe_family(linux().family()).starts_with("single"));
    }
}
