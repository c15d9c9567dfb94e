mod concat;
mod scanner;
mod sdk;
mod toolchain;
mod version;

pub use concat::concat;
pub use scanner::visit_subdirectories;
pub use sdk::{WindowsKit, find_windows_kit_root};
pub use toolchain::{
    Toolchain, find_visual_studio, find_with_legacy_registry, find_with_setup_query,
};
pub use version::{VersionCandidate, VersionPattern};

use crate::config::DiscoveryOptions;
use crate::config::constants::sdk::{UCRT_X64_SUFFIX, UM_X64_SUFFIX};
use crate::core::DiscoveryResult;
use crate::host::Host;
use std::path::PathBuf;

pub struct Discovery<'a> {
    host: Host<'a>,
    options: DiscoveryOptions,
}

impl<'a> Discovery<'a> {
    pub fn new(host: Host<'a>) -> Self {
        Self {
            host,
            options: DiscoveryOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DiscoveryOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs one full pass. SDK and toolchain lookups are independent; either
    /// may come back empty without affecting the other.
    pub fn run(&self) -> DiscoveryResult {
        let mut result = DiscoveryResult::default();

        if let Some(kit) = find_windows_kit_root(&self.host, &self.options) {
            result.sdk_user_mode_library_path =
                Some(PathBuf::from(concat(&[&kit.root, &UM_X64_SUFFIX])));
            result.sdk_crt_library_path =
                Some(PathBuf::from(concat(&[&kit.root, &UCRT_X64_SUFFIX])));
            result.sdk_version = kit.version;
            result.sdk_root = Some(PathBuf::from(kit.root));
        }

        if let Some(toolchain) = find_visual_studio(&self.host) {
            result.toolchain_executable_path = Some(PathBuf::from(toolchain.executable_path));
            result.toolchain_library_path = Some(PathBuf::from(toolchain.library_path));
        }

        result
    }
}

impl Default for Discovery<'static> {
    fn default() -> Self {
        Self::new(Host::native())
    }
}

/// Finds the x64 Windows SDK and MSVC toolchain directories on this host.
pub fn find_visual_studio_and_windows_sdk() -> DiscoveryResult {
    Discovery::default().run()
}

/// Releases every path held by `result` and resets it to the empty state.
pub fn free_resources(result: &mut DiscoveryResult) {
    result.release();
}
