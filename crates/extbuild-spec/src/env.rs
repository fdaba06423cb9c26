//! Snapshot of the environment variables the build reads.

use serde::{Deserialize, Serialize};

/// Compiler-flags variable read and appended to.
pub const CXXFLAGS_VAR: &str = "CXXFLAGS";
/// Cross-compilation toolchain file variable.
pub const TOOLCHAIN_FILE_VAR: &str = "CMAKE_TOOLCHAIN_FILE";

/// Environment inputs captured once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvSnapshot {
    /// Existing compiler flags, if any.
    pub cxxflags: Option<String>,
    /// Toolchain file path, if any.
    pub toolchain_file: Option<String>,
}

impl EnvSnapshot {
    /// Reads the snapshot from the process environment.
    pub fn capture() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a snapshot from an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            cxxflags: lookup(CXXFLAGS_VAR),
            toolchain_file: lookup(TOOLCHAIN_FILE_VAR),
        }
    }

    /// Builds a snapshot from key/value pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let pairs: Vec<(&str, &str)> = pairs.into_iter().collect();
        Self::from_lookup(|key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
    }

    /// Sets the toolchain file.
    pub fn with_toolchain_file(mut self, path: impl Into<String>) -> Self {
        self.toolchain_file = Some(path.into());
        self
    }

    /// Sets the existing compiler flags.
    pub fn with_cxxflags(mut self, flags: impl Into<String>) -> Self {
        self.cxxflags = Some(flags.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() {
        let env = EnvSnapshot::from_pairs([
            ("CMAKE_TOOLCHAIN_FILE", "/opt/tc/arm.cmake"),
            ("UNRELATED", "x"),
        ]);
        assert_eq!(env.toolchain_file.as_deref(), Some("/opt/tc/arm.cmake"));
        assert_eq!(env.cxxflags, None);
    }

    #[test]
    fn test_builders() {
        let env = EnvSnapshot::default()
            .with_cxxflags("-O2")
            .with_toolchain_file("tc.cmake");
        assert_eq!(env.cxxflags.as_deref(), Some("-O2"));
        assert_eq!(env.toolchain_file.as_deref(), Some("tc.cmake"));
    }
}
