//! Host collaborators consumed by discovery: filesystem, registry and the
//! Visual Studio installer query service.

#[cfg(windows)]
mod com;
mod fs;
mod memory;
mod registry;
mod setup;

pub use fs::StdFileSystem;
pub use memory::MemoryHost;
pub use registry::NativeRegistry;
pub use setup::ComSetupQuery;

use crate::core::ProbeResult;
use std::ffi::OsString;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: OsString,
    pub is_dir: bool,
}

impl DirEntryInfo {
    pub fn directory(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    pub fn file(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }
}

pub trait FileSystem {
    /// True only for an existing entry that is not a directory.
    fn file_exists(&self, path: &Path) -> bool;

    /// Immediate children of `path`, in enumeration order.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>>;

    /// First line of a text file, newline included when present.
    fn read_first_line(&self, path: &Path) -> io::Result<String>;
}

pub trait RegistryKey {
    /// Reads a plain `REG_SZ` value. Values of any other type are errors.
    fn string_value(&self, name: &str) -> ProbeResult<OsString>;

    fn subkey_names(&self) -> ProbeResult<Vec<String>>;
}

pub trait Registry {
    /// Opens `path` under HKEY_LOCAL_MACHINE for reading.
    fn open_key(&self, path: &str) -> ProbeResult<Box<dyn RegistryKey + '_>>;
}

pub trait SetupInstance {
    fn installation_path(&self) -> ProbeResult<OsString>;
}

pub type SetupInstances<'a> = Box<dyn Iterator<Item = Box<dyn SetupInstance>> + 'a>;

pub trait SetupQuery {
    /// Connects to the installer service and enumerates installed instances.
    /// The iterator stops at exhaustion or at the first enumeration error.
    fn enum_instances(&self) -> ProbeResult<SetupInstances<'_>>;
}

#[derive(Clone, Copy)]
pub struct Host<'a> {
    pub filesystem: &'a dyn FileSystem,
    pub registry: &'a dyn Registry,
    pub setup: &'a dyn SetupQuery,
}

impl Host<'static> {
    pub fn native() -> Self {
        Self {
            filesystem: &StdFileSystem,
            registry: &NativeRegistry,
            setup: &ComSetupQuery,
        }
    }
}

impl<'a> Host<'a> {
    pub fn uniform<T>(host: &'a T) -> Self
    where
        T: FileSystem + Registry + SetupQuery,
    {
        Self {
            filesystem: host,
            registry: host,
            setup: host,
        }
    }
}

impl Default for Host<'static> {
    fn default() -> Self {
        Self::native()
    }
}
