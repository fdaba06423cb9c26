//! Requested build type (debug or release).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Build type passed to the configure or build step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    /// Unoptimized build with debug info.
    Debug,
    /// Optimized build.
    #[default]
    Release,
}

impl BuildType {
    /// Picks the build type from a debug flag, as packaging front ends expose it.
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug {
            BuildType::Debug
        } else {
            BuildType::Release
        }
    }

    /// Returns the configuration name CMake expects (`Debug`, `Release`).
    pub fn as_cmake_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }

    /// Returns the uppercased configuration name used in per-config variables.
    pub fn as_upper_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "DEBUG",
            BuildType::Release => "RELEASE",
        }
    }

    /// Returns the lowercase identifier used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "debug",
            BuildType::Release => "release",
        }
    }
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown build type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown build type '{0}' (expected 'debug' or 'release')")]
pub struct ParseBuildTypeError(pub String);

impl FromStr for BuildType {
    type Err = ParseBuildTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            _ => Err(ParseBuildTypeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_release() {
        assert_eq!(BuildType::default(), BuildType::Release);
    }

    #[test]
    fn test_upper_str_matches_uppercased_cmake_str() {
        for bt in [BuildType::Debug, BuildType::Release] {
            assert_eq!(bt.as_upper_str(), bt.as_cmake_str().to_uppercase());
        }
        assert_eq!(BuildType::Debug.as_upper_str(), "DEBUG");
        assert_eq!(BuildType::Release.as_upper_str(), "RELEASE");
    }

    #[test]
    fn test_parse() {
        assert_eq!("debug".parse::<BuildType>().unwrap(), BuildType::Debug);
        assert_eq!("Release".parse::<BuildType>().unwrap(), BuildType::Release);
        assert!("relwithdebinfo".parse::<BuildType>().is_err());
    }

    #[test]
    fn test_from_debug_flag() {
        assert_eq!(BuildType::from_debug_flag(true), BuildType::Debug);
        assert_eq!(BuildType::from_debug_flag(false), BuildType::Release);
    }
}
