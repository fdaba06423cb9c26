//! Clean command implementation
//!
//! Removes build directories.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::settings::BuildSettings;

/// Run the clean command
///
/// Removes the temporary build root, and with `all` the module output root
/// as well. Missing directories are skipped.
pub fn run(settings: &BuildSettings, all: bool) -> Result<ExitCode> {
    let config = settings.orchestrator_config();
    let mut targets = vec![config.build_temp.as_path()];
    if all {
        targets.push(config.build_lib.as_path());
    }

    let removed = remove_dirs(&targets)?;
    for dir in &targets {
        if removed.iter().any(|r| r == dir) {
            println!("  {} removed {}", "ok".green(), dir.display());
        } else {
            println!("  {} {} (not present)", "->".dimmed(), dir.display());
        }
    }

    println!(
        "\n{} Removed {} director{}",
        "SUCCESS".green().bold(),
        removed.len(),
        if removed.len() == 1 { "y" } else { "ies" }
    );
    Ok(ExitCode::SUCCESS)
}

/// Removes each existing directory and returns the ones removed.
fn remove_dirs(dirs: &[&Path]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for dir in dirs {
        if !dir.exists() {
            continue;
        }
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to remove {}", dir.display()))?;
        removed.push(dir.to_path_buf());
    }
    Ok(removed)
}
