//! Locates the x64 MSVC toolchain and Windows SDK library directories.
//!
//! ```no_run
//! let mut result = vs_locate::find_visual_studio_and_windows_sdk();
//!
//! if let Some(lib) = &result.toolchain_library_path {
//!     println!("MSVC libraries: {}", lib.display());
//! }
//! if let Some(um) = &result.sdk_user_mode_library_path {
//!     println!("SDK um libraries: {}", um.display());
//! }
//!
//! vs_locate::free_resources(&mut result);
//! ```

pub mod config;
pub mod core;
pub mod discovery;
pub mod host;

pub use crate::config::DiscoveryOptions;

pub use crate::core::{DiscoveryResult, ProbeError, ProbeResult, SdkVersion};

pub use discovery::{Discovery, free_resources, find_visual_studio_and_windows_sdk};

pub use host::{
    ComSetupQuery, DirEntryInfo, FileSystem, Host, MemoryHost, NativeRegistry, Registry,
    RegistryKey, SetupInstance, SetupInstances, SetupQuery, StdFileSystem,
};
