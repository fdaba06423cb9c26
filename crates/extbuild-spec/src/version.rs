//! Loose dotted tool versions, as printed by `cmake --version`.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::OnceLock;

/// Minimum tool version on the multi-configuration platform family.
pub const MIN_MULTI_CONFIG_VERSION: [u64; 3] = [3, 1, 0];

static VERSION_RE: OnceLock<Regex> = OnceLock::new();

fn version_regex() -> &'static Regex {
    VERSION_RE.get_or_init(|| Regex::new(r"version\s*([\d.]+)").expect("invalid regex pattern"))
}

/// A dotted numeric version. Missing trailing components compare as zero,
/// so `3.1` equals `3.1.0`.
#[derive(Debug, Clone, Eq)]
pub struct ToolVersion {
    parts: Vec<u64>,
}

impl ToolVersion {
    /// Creates a version from numeric components.
    pub fn new(parts: impl Into<Vec<u64>>) -> Self {
        Self {
            parts: parts.into(),
        }
    }

    /// The minimum version required on the multi-configuration family.
    pub fn min_multi_config() -> Self {
        Self::new(MIN_MULTI_CONFIG_VERSION)
    }

    /// Returns the numeric components.
    pub fn components(&self) -> &[u64] {
        &self.parts
    }

    /// Extracts the version from tool output such as
    /// `"cmake version 3.28.1\n\nCMake suite maintained..."`.
    pub fn parse_tool_output(output: &str) -> Option<Self> {
        let caps = version_regex().captures(output)?;
        caps.get(1)?.as_str().parse().ok()
    }
}

impl PartialEq for ToolVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for ToolVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ToolVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.components();
        let b = other.components();
        let len = a.len().max(b.len());
        for i in 0..len {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            match x.cmp(&y) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

/// Error returned for text that is not a dotted numeric version.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version '{0}'")]
pub struct ParseVersionError(pub String);

impl FromStr for ToolVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "3.28." from a sentence-final period is still a version.
        let trimmed = s.trim().trim_end_matches('.');
        if trimmed.is_empty() {
            return Err(ParseVersionError(s.to_string()));
        }
        let parts = trimmed
            .split('.')
            .map(|p| p.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseVersionError(s.to_string()))?;
        Ok(ToolVersion::new(parts))
    }
}

impl std::fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self
            .components()
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(".");
        f.write_str(&text)
    }
}

impl Serialize for ToolVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
