use colored::Colorize;
use extbuild_backend_cmake::{BuildReporter, Invocation, Step, ToolInfo};
use std::path::Path;
use std::time::Duration;

/// Prints orchestrator progress as colored console lines.
#[derive(Debug, Default)]
pub(crate) struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub(crate) fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl BuildReporter for ConsoleReporter {
    fn tool_detected(&mut self, tool: &ToolInfo) {
        let version = tool
            .version
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "unknown version".to_string());
        println!(
            "{} {} ({})",
            "CMake:".dimmed(),
            tool.path.display(),
            version
        );
    }

    fn toolchain_in_use(&mut self, _extension: &str, toolchain: &str) {
        println!("  {} USING TOOLCHAIN: {}", "!!".yellow(), toolchain);
    }

    fn build_dir_ready(&mut self, extension: &str, dir: &Path) {
        println!();
        println!("{} {}", "Extension:".cyan().bold(), extension);
        if self.verbose {
            println!("  {} build dir {}", "->".green(), dir.display());
        }
    }

    fn step_started(&mut self, _extension: &str, invocation: &Invocation) {
        println!("  {} {}", "->".green(), invocation.step);
        if self.verbose {
            println!("     {}", invocation.command_line().dimmed());
        }
    }

    fn step_finished(&mut self, _extension: &str, step: Step, elapsed: Duration) {
        println!(
            "  {} {} ({})",
            "ok".green(),
            step,
            format_duration(elapsed).dimmed()
        );
    }
}

pub(crate) fn format_duration(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.1}s", elapsed.as_secs_f64())
    }
}

/// Prints a value as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(62)), "62.0s");
    }
}
