//! Host platform descriptor.
//!
//! The descriptor is a plain value so argument derivation can be exercised
//! for every platform family from any host.

use serde::{Deserialize, Serialize};

/// Operating system of the build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    Windows,
    Macos,
    Linux,
    Other,
}

impl HostOs {
    /// Detects the OS this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            HostOs::Windows
        } else if cfg!(target_os = "macos") {
            HostOs::Macos
        } else if cfg!(target_os = "linux") {
            HostOs::Linux
        } else {
            HostOs::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HostOs::Windows => "windows",
            HostOs::Macos => "macos",
            HostOs::Linux => "linux",
            HostOs::Other => "other",
        }
    }
}

/// How the build tool selects a build type on this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformFamily {
    /// Generators hold every configuration; the type is picked at build time.
    MultiConfig,
    /// The build type is fixed at configure time.
    SingleConfig,
}

/// Everything about the host that argument derivation depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Host operating system.
    pub os: HostOs,
    /// Pointer width in bits (32 or 64).
    pub pointer_width: u32,
    /// Architecture name (e.g. "x86_64", "aarch64").
    pub arch: String,
}

impl Platform {
    /// Creates a platform descriptor.
    pub fn new(os: HostOs, pointer_width: u32, arch: impl Into<String>) -> Self {
        Self {
            os,
            pointer_width,
            arch: arch.into(),
        }
    }

    /// Describes the host this binary runs on.
    pub fn host() -> Self {
        Self {
            os: HostOs::current(),
            pointer_width: usize::BITS,
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// Returns the platform family. Windows is the multi-configuration family.
    pub fn family(&self) -> PlatformFamily {
        match self.os {
            HostOs::Windows => PlatformFamily::MultiConfig,
            _ => PlatformFamily::SingleConfig,
        }
    }

    /// Returns true for the multi-configuration family.
    pub fn is_multi_config(&self) -> bool {
        self.family() == PlatformFamily::MultiConfig
    }

    /// Returns true when the host is 64-bit.
    pub fn is_64bit(&self) -> bool {
        self.pointer_width > 32
    }

    /// Short tag used to name build directories (e.g. "linux-x86_64").
    pub fn tag(&self) -> String {
        format!("{}-{}", self.os.as_str(), self.arch)
    }
}
