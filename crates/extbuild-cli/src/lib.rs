//! extbuild CLI library.
//!
//! Command implementations and the settings that turn command-line flags
//! into an orchestrator configuration.

pub mod commands;
pub mod settings;
