//! Locating the host interpreter the extension is built against.

use std::path::{Path, PathBuf};

/// Environment variable overriding the interpreter.
pub const INTERPRETER_PATH_VAR: &str = "EXTBUILD_PYTHON";

/// Finds the interpreter passed to the build as `PYTHON_EXECUTABLE`.
///
/// Order: explicit path, `EXTBUILD_PYTHON`, then `python3` and `python`
/// on `PATH`. Candidates that do not exist are skipped.
pub fn find_interpreter(explicit: Option<&Path>) -> Option<PathBuf> {
    find_interpreter_with(
        explicit,
        std::env::var_os(INTERPRETER_PATH_VAR).map(PathBuf::from),
    )
}

fn find_interpreter_with(explicit: Option<&Path>, from_env: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit.filter(|p| p.exists()) {
        return Some(path.to_path_buf());
    }
    if let Some(path) = from_env.filter(|p| p.exists()) {
        return Some(path);
    }
    ["python3", "python"]
        .into_iter()
        .find_map(|name| which::which(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("python-explicit");
        let from_env = dir.path().join("python-env");
        std::fs::write(&explicit, "").unwrap();
        std::fs::write(&from_env, "").unwrap();

        assert_eq!(
            find_interpreter_with(Some(&explicit), Some(from_env.clone())),
            Some(explicit)
        );
    }

    #[test]
    fn test_env_used_when_explicit_missing() {
        let dir = tempfile::tempdir().unwrap();
        let from_env = dir.path().join("python-env");
        std::fs::write(&from_env, "").unwrap();

        assert_eq!(
            find_interpreter_with(Some(&dir.path().join("nope")), Some(from_env.clone())),
            Some(from_env)
        );
    }
}
