use super::concat::concat;
use super::scanner::visit_subdirectories;
use super::version::{VersionCandidate, VersionPattern};
use crate::config::DiscoveryOptions;
use crate::config::constants::{registry, sdk};
use crate::core::SdkVersion;
use crate::host::{Host, RegistryKey};
use std::ffi::{OsStr, OsString};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowsKit {
    pub version: SdkVersion,
    pub root: OsString,
}

/// Picks the newest versioned `Lib` subdirectory of the installed Windows
/// kit, preferring the Windows 10 kit over the Windows 8.1 one.
pub fn find_windows_kit_root(host: &Host<'_>, options: &DiscoveryOptions) -> Option<WindowsKit> {
    let key = match host.registry.open_key(registry::KITS_ROOT_KEY) {
        Ok(key) => key,
        Err(e) => {
            tracing::debug!("No Windows kit roots: {}", e);
            return None;
        }
    };

    if let Some(kits_root) = read_kit_root(&*key, registry::KITS_ROOT_10) {
        if let Some(root) = best_versioned_lib(host, &kits_root, VersionPattern::FourPart) {
            return Some(WindowsKit {
                version: SdkVersion::Windows10,
                root,
            });
        }

        if !options.windows81_after_empty_kit10 {
            tracing::debug!(
                "KitsRoot10 {} has no version directory; not probing KitsRoot81",
                kits_root.to_string_lossy()
            );
            return None;
        }
    }

    if let Some(kits_root) = read_kit_root(&*key, registry::KITS_ROOT_81)
        && let Some(root) = best_versioned_lib(host, &kits_root, VersionPattern::WinV)
    {
        return Some(WindowsKit {
            version: SdkVersion::Windows81,
            root,
        });
    }

    tracing::debug!("No usable Windows SDK found");
    None
}

fn read_kit_root(key: &dyn RegistryKey, name: &str) -> Option<OsString> {
    key.string_value(name)
        .map_err(|e| tracing::trace!("{}", e))
        .ok()
}

fn best_versioned_lib(
    host: &Host<'_>,
    kits_root: &OsStr,
    pattern: VersionPattern,
) -> Option<OsString> {
    let lib_dir = concat(&[&kits_root, &sdk::LIB_DIR]);
    let mut candidate = VersionCandidate::new();

    visit_subdirectories(host.filesystem, &lib_dir, |name, full_path| {
        candidate.evaluate(pattern, name, full_path);
    });

    let best = candidate.into_best();
    if let Some(root) = &best {
        tracing::debug!("Selected Windows SDK {}", root.to_string_lossy());
    }

    best
}
