//! CLI command implementations

pub mod build;
pub mod clean;
pub mod doctor;
pub mod json_output;
pub mod plan;

mod reporting;
