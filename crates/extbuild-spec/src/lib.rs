//! extbuild Spec Library
//!
//! Types describing what `extbuild` builds and the inputs that shape the
//! build: the package manifest, extension descriptors, build type, host
//! platform, environment snapshot and tool versions.
//!
//! # Example
//!
//! ```
//! use extbuild_spec::{BuildType, ExtensionDescriptor, HostOs, Platform, PlatformFamily};
//! use std::path::Path;
//!
//! let ext = ExtensionDescriptor::with_base("pkg.viewer", "native", Path::new("/src/pkg"))
//!     .define("BUILD_EXAMPLES", "OFF");
//! assert_eq!(ext.output_dir(Path::new("/out")), Path::new("/out/pkg"));
//!
//! let platform = Platform::new(HostOs::Windows, 64, "x86_64");
//! assert_eq!(platform.family(), PlatformFamily::MultiConfig);
//! assert_eq!(BuildType::default().as_upper_str(), "RELEASE");
//! ```
//!
//! # Modules
//!
//! - [`manifest`]: package manifest loading and validation
//! - [`extension`]: extension descriptors
//! - [`build_type`]: debug/release selection
//! - [`platform`]: host platform descriptor and family
//! - [`env`]: environment snapshot
//! - [`version`]: tool version parsing and comparison
//! - [`error`]: error codes and the backend error trait

pub mod build_type;
pub mod env;
pub mod error;
pub mod extension;
pub mod manifest;
pub mod platform;
pub mod version;

pub use build_type::{BuildType, ParseBuildTypeError};
pub use env::{EnvSnapshot, CXXFLAGS_VAR, TOOLCHAIN_FILE_VAR};
pub use error::{BackendError, ErrorCode, ManifestError, ValidationError};
pub use extension::{
    absolutize, is_valid_module_name, ExtensionDescriptor, BUILD_DESCRIPTOR_FILE,
};
pub use manifest::{is_reserved_define, PackageManifest, MANIFEST_FILE, RESERVED_DEFINES};
pub use platform::{HostOs, Platform, PlatformFamily};
pub use version::{ParseVersionError, ToolVersion, MIN_MULTI_CONFIG_VERSION};
