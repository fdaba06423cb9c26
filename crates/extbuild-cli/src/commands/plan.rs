//! Plan command implementation
//!
//! Prints the configure and build commands for each extension without
//! running anything.

use anyhow::Result;
use colored::Colorize;
use extbuild_backend_cmake::{ExtensionPlan, Orchestrator};
use extbuild_spec::PackageManifest;
use std::process::ExitCode;

use super::json_output::{cmake_error_to_json, manifest_error_to_json, PlanOutput};
use super::reporting;
use crate::settings::BuildSettings;

/// Run the plan command
///
/// # Returns
/// Exit code: 0 if every extension could be planned, 1 otherwise
pub fn run(settings: &BuildSettings, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(settings)
    } else {
        run_human(settings)
    }
}

fn run_human(settings: &BuildSettings) -> Result<ExitCode> {
    let manifest = settings.load_manifest()?;
    let config = settings.orchestrator_config();

    println!(
        "{} {} {}",
        "Plan:".cyan().bold(),
        manifest.name,
        manifest.version
    );
    println!(
        "{} {} ({:?}), {}",
        "Platform:".dimmed(),
        config.platform.tag(),
        config.platform.family(),
        config.build_type
    );

    let orchestrator = Orchestrator::with_config(config);
    let plans = orchestrator.plan(&manifest.extensions, &manifest.version)?;
    for plan in &plans {
        print_plan(plan);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_plan(plan: &ExtensionPlan) {
    println!();
    println!("{} {}", "Extension:".bold(), plan.name);
    println!("  {} {}", "build dir:".dimmed(), plan.build_dir.display());
    println!("  {} {}", "output:".dimmed(), plan.args.output_dir.display());
    if let Some(ref toolchain) = plan.args.toolchain {
        println!("  {} USING TOOLCHAIN: {}", "!!".yellow(), toolchain);
    }
    for (key, value) in &plan.configure.env {
        println!("  {} {}={}", "env:".dimmed(), key, value);
    }
    println!("  {} {}", "->".green(), plan.configure.command_line());
    println!("  {} {}", "->".green(), plan.build.command_line());
}

fn run_json(settings: &BuildSettings) -> Result<ExitCode> {
    let manifest = match PackageManifest::load(&settings.manifest) {
        Ok(m) => m,
        Err(e) => {
            reporting::print_json(&PlanOutput::failure(manifest_error_to_json(&e)))?;
            return Ok(ExitCode::from(1));
        }
    };

    let config = settings.orchestrator_config();
    let platform = config.platform.tag();
    let build_type = config.build_type.as_str().to_string();
    let orchestrator = Orchestrator::with_config(config);

    match orchestrator.plan(&manifest.extensions, &manifest.version) {
        Ok(plans) => {
            reporting::print_json(&PlanOutput::success(platform, build_type, plans))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            reporting::print_json(&PlanOutput::failure(vec![cmake_error_to_json(&e)]))?;
            Ok(ExitCode::from(1))
        }
    }
}
