use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SdkVersion {
    #[default]
    None,
    Windows10,
    Windows81,
}

impl SdkVersion {
    /// Numeric marker: 0 when no SDK was found, otherwise 10 or 8.
    pub const fn marker(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Windows10 => 10,
            Self::Windows81 => 8,
        }
    }

    pub const fn is_found(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Windows10 => write!(f, "Windows 10"),
            Self::Windows81 => write!(f, "Windows 8.1"),
        }
    }
}

/// Paths found by one discovery pass. Every field is independently optional;
/// the two SDK library paths are present exactly when `sdk_root` is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub sdk_version: SdkVersion,
    pub sdk_root: Option<PathBuf>,
    pub sdk_user_mode_library_path: Option<PathBuf>,
    pub sdk_crt_library_path: Option<PathBuf>,
    pub toolchain_executable_path: Option<PathBuf>,
    pub toolchain_library_path: Option<PathBuf>,
}

impl DiscoveryResult {
    pub fn is_empty(&self) -> bool {
        !self.sdk_version.is_found()
            && self.sdk_root.is_none()
            && self.sdk_user_mode_library_path.is_none()
            && self.sdk_crt_library_path.is_none()
            && self.toolchain_executable_path.is_none()
            && self.toolchain_library_path.is_none()
    }

    pub fn has_sdk(&self) -> bool {
        self.sdk_root.is_some()
    }

    pub fn has_toolchain(&self) -> bool {
        self.toolchain_library_path.is_some()
    }

    /// Drops every owned path and resets the version marker.
    pub fn release(&mut self) {
        *self = Self::default();
    }
}
