//! extbuild CLI - Command-line interface for building native extensions
//!
//! This binary configures and builds the CMake-based extension modules
//! listed in a package manifest.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands};
use extbuild_cli::commands;
use extbuild_cli::settings::BuildSettings;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            options,
            verbose,
            json,
        } => commands::build::run(&BuildSettings::from(options), verbose, json),
        Commands::Plan { options, json } => {
            commands::plan::run(&BuildSettings::from(options), json)
        }
        Commands::Doctor { cmake, python } => {
            commands::doctor::run(cmake.as_deref(), python.as_deref())
        }
        Commands::Clean {
            build_temp,
            build_lib,
            all,
        } => {
            let settings = BuildSettings {
                build_temp,
                build_lib,
                ..BuildSettings::default()
            };
            commands::clean::run(&settings, all)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
