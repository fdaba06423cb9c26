//! Build command implementation
//!
//! Configures and builds every extension in the manifest.

use anyhow::Result;
use colored::Colorize;
use extbuild_backend_cmake::{NullReporter, Orchestrator};
use extbuild_spec::PackageManifest;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{cmake_error_to_json, manifest_error_to_json, BuildOutput};
use super::reporting::{self, ConsoleReporter};
use crate::settings::BuildSettings;

/// Run the build command
///
/// # Returns
/// Exit code: 0 if every extension built. Any failure is returned as an
/// error in human mode, or reported in the JSON document with exit code 1.
pub fn run(settings: &BuildSettings, verbose: bool, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(settings)
    } else {
        run_human(settings, verbose)
    }
}

fn run_human(settings: &BuildSettings, verbose: bool) -> Result<ExitCode> {
    let start = Instant::now();

    println!(
        "{} {}",
        "Building:".cyan().bold(),
        settings.manifest.display()
    );

    let manifest = settings.load_manifest()?;
    println!(
        "{} {} {} ({})",
        "Package:".dimmed(),
        manifest.name,
        manifest.version,
        settings.build_type()
    );

    let mut orchestrator = Orchestrator::with_config(settings.orchestrator_config());
    let mut reporter = ConsoleReporter::new(verbose);
    let summary = orchestrator.build_manifest(&manifest, &mut reporter)?;

    println!();
    for ext in &summary.extensions {
        println!(
            "  {} {} -> {}",
            "ok".green(),
            ext.name,
            ext.output_dir.display()
        );
    }
    println!(
        "\n{} Built {} extension(s) ({})",
        "SUCCESS".green().bold(),
        summary.extensions.len(),
        reporting::format_duration(start.elapsed())
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(settings: &BuildSettings) -> Result<ExitCode> {
    let manifest = match PackageManifest::load(&settings.manifest) {
        Ok(m) => m,
        Err(e) => {
            reporting::print_json(&BuildOutput::failure(manifest_error_to_json(&e)))?;
            return Ok(ExitCode::from(1));
        }
    };

    let mut orchestrator = Orchestrator::with_config(settings.orchestrator_config());
    match orchestrator.build_manifest(&manifest, &mut NullReporter) {
        Ok(summary) => {
            reporting::print_json(&BuildOutput::success(&summary))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            reporting::print_json(&BuildOutput::failure(vec![cmake_error_to_json(&e)]))?;
            Ok(ExitCode::from(1))
        }
    }
}
