//! Extension descriptors.
//!
//! An extension descriptor names the module a build produces and the
//! directory holding the CMake project that produces it. It carries no
//! sources of its own; compilation is delegated to the build tool.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File the build tool needs in a source tree.
pub const BUILD_DESCRIPTOR_FILE: &str = "CMakeLists.txt";

/// A named reference to an external source tree producing one loadable module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionDescriptor {
    /// Dotted module name (e.g. "pangolin" or "pkg.native.core").
    pub name: String,
    /// Root of the external CMake project.
    #[serde(rename = "sourcedir", alias = "source_dir", default = "default_source_dir")]
    pub source_dir: PathBuf,
    /// Extra cache entries passed to the configure step.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defines: BTreeMap<String, String>,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(".")
}

impl ExtensionDescriptor {
    /// Creates a descriptor, resolving a relative source directory against
    /// the current working directory.
    pub fn new(name: impl Into<String>, source_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::with_base(name, source_dir, &cwd))
    }

    /// Creates a descriptor, resolving a relative source directory against `base`.
    pub fn with_base(name: impl Into<String>, source_dir: impl AsRef<Path>, base: &Path) -> Self {
        Self {
            name: name.into(),
            source_dir: absolutize(source_dir.as_ref(), base),
            defines: BTreeMap::new(),
        }
    }

    /// Adds an extra cache entry for the configure step.
    pub fn define(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defines.insert(key.into(), value.into());
        self
    }

    /// Re-anchors a relative source directory at `base`.
    pub fn resolve_against(&mut self, base: &Path) {
        self.source_dir = absolutize(&self.source_dir, base);
    }

    /// Splits the dotted module name into its segments.
    pub fn name_segments(&self) -> impl Iterator<Item = &str> {
        self.name.split('.')
    }

    /// Directory the compiled module must land in: the parent of the
    /// module's full path under `build_lib`.
    ///
    /// `pkg.native.core` lands in `<build_lib>/pkg/native`; a top-level
    /// module lands in `<build_lib>` itself.
    pub fn output_dir(&self, build_lib: &Path) -> PathBuf {
        let segments: Vec<&str> = self.name_segments().collect();
        let mut dir = build_lib.to_path_buf();
        if let Some((_, packages)) = segments.split_last() {
            for package in packages {
                dir.push(package);
            }
        }
        dir
    }

    /// Path of the build descriptor the tool will read.
    pub fn build_descriptor(&self) -> PathBuf {
        self.source_dir.join(BUILD_DESCRIPTOR_FILE)
    }
}

/// Returns true when `name` is a dotted path of identifiers.
pub fn is_valid_module_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_identifier)
}

pub(crate) fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Anchors a relative `path` at `base` and removes `.` and `..` lexically.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    normalize(&joined)
}

// Lexical cleanup only; the directory may not exist yet.
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
