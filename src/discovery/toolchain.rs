use super::concat::concat;
use crate::config::constants::registry;
use crate::config::constants::toolchain as layout;
use crate::host::{FileSystem, Host};
use std::ffi::{OsStr, OsString};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub executable_path: OsString,
    pub library_path: OsString,
}

/// Installer-managed instances first, then the legacy `VS7` registry entries.
pub fn find_visual_studio(host: &Host<'_>) -> Option<Toolchain> {
    find_with_setup_query(host).or_else(|| find_with_legacy_registry(host))
}

/// Returns the first installed instance whose x64 library directory holds
/// the marker library. Instances are not ranked by version.
pub fn find_with_setup_query(host: &Host<'_>) -> Option<Toolchain> {
    let instances = match host.setup.enum_instances() {
        Ok(instances) => instances,
        Err(e) => {
            tracing::debug!("Skipping setup instance query: {}", e);
            return None;
        }
    };

    for instance in instances {
        let root = match instance.installation_path() {
            Ok(root) => root,
            Err(e) => {
                tracing::trace!("Skipping setup instance: {}", e);
                continue;
            }
        };

        if let Some(toolchain) = toolchain_for_instance(host.filesystem, &root) {
            tracing::debug!(
                "Selected MSVC toolchain {}",
                toolchain.library_path.to_string_lossy()
            );
            return Some(toolchain);
        }
    }

    tracing::debug!("No setup instance provides an x64 MSVC toolchain");
    None
}

fn toolchain_for_instance(filesystem: &dyn FileSystem, root: &OsStr) -> Option<Toolchain> {
    let version_file = concat(&[&root, &layout::TOOLS_VERSION_FILE]);

    let line = match filesystem.read_first_line(Path::new(&version_file)) {
        Ok(line) => line,
        Err(e) => {
            tracing::trace!("Cannot read {}: {}", version_file.to_string_lossy(), e);
            return None;
        }
    };

    let version = tools_version(&line);
    let library_path = concat(&[&root, &layout::MSVC_TOOLS_DIR, &version, &layout::LIB_X64_SUFFIX]);
    let marker = concat(&[&library_path, &layout::MARKER_FILE]);

    if !filesystem.file_exists(Path::new(&marker)) {
        tracing::trace!("Rejecting {}: marker missing", library_path.to_string_lossy());
        return None;
    }

    Some(Toolchain {
        executable_path: concat(&[
            &root,
            &layout::MSVC_TOOLS_DIR,
            &version,
            &layout::BIN_HOST_X64_SUFFIX,
        ]),
        library_path,
    })
}

/// The version token is the first line; a text-mode `\r\n` ending is dropped.
fn tools_version(line: &str) -> &str {
    let line = line.find('\n').map_or(line, |end| &line[..end]);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Probes the fixed pre-2017 version keys in order of recency.
pub fn find_with_legacy_registry(host: &Host<'_>) -> Option<Toolchain> {
    let key = match host.registry.open_key(registry::VS7_KEY) {
        Ok(key) => key,
        Err(e) => {
            tracing::debug!("No legacy Visual Studio entries: {}", e);
            return None;
        }
    };

    for version in registry::LEGACY_VS_VERSIONS {
        let install_dir = match key.string_value(version) {
            Ok(dir) => dir,
            Err(e) => {
                tracing::trace!("{}", e);
                continue;
            }
        };

        let library_path = concat(&[&install_dir, &layout::LEGACY_LIB_SUFFIX]);
        let marker = concat(&[&library_path, &layout::MARKER_FILE]);

        if host.filesystem.file_exists(Path::new(&marker)) {
            tracing::debug!("Selected Visual Studio {} toolchain", version);
            return Some(Toolchain {
                executable_path: concat(&[&install_dir, &layout::LEGACY_BIN_SUFFIX]),
                library_path,
            });
        }
    }

    tracing::debug!("No legacy Visual Studio toolchain found");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    const VERSION_FILE: &str = r"\VC\Auxiliary\Build\Microsoft.VCToolsVersion.default.txt";

    fn with_msvc(host: MemoryHost, root: &str, version: &str, marker: bool) -> MemoryHost {
        let host = host.with_file(&format!("{}{}", root, VERSION_FILE), &format!("{}\n", version));

        if marker {
            host.with_file(
                &format!(r"{}\VC\Tools\MSVC\{}\lib\x64\vcruntime.lib", root, version),
                "",
            )
        } else {
            host
        }
    }

    fn expected(root: &str, version: &str) -> Toolchain {
        Toolchain {
            executable_path: OsString::from(format!(r"{}\VC\Tools\MSVC\{}\bin\Hostx64\x64", root, version)),
            library_path: OsString::from(format!(r"{}\VC\Tools\MSVC\{}\lib\x64", root, version)),
        }
    }

    #[test]
    fn test_tools_version_strips_line_endings() {
        assert_eq!(tools_version("14.29.30133\n"), "14.29.30133");
        assert_eq!(tools_version("14.29.30133\r\nextra"), "14.29.30133");
        assert_eq!(tools_version("14.29.30133"), "14.29.30133");
    }

    #[test]
    fn test_first_working_instance_wins() {
        let host = MemoryHost::new()
            .with_instance(r"C:\VS2019")
            .with_instance(r"C:\VS2022");
        let host = with_msvc(host, r"C:\VS2019", "14.29.30133", true);
        let host = with_msvc(host, r"C:\VS2022", "14.38.33130", true);

        assert_eq!(
            find_with_setup_query(&Host::uniform(&host)),
            Some(expected(r"C:\VS2019", "14.29.30133"))
        );
    }

    #[test]
    fn test_skips_unusable_instances() {
        let host = MemoryHost::new()
            .with_broken_instance()
            .with_instance(r"C:\NoVersionFile")
            .with_instance(r"C:\NoMarker")
            .with_instance(r"C:\VS");
        let host = with_msvc(host, r"C:\NoMarker", "14.10.25017", false);
        let host = with_msvc(host, r"C:\VS", "14.29.30133", true);

        assert_eq!(
            find_with_setup_query(&Host::uniform(&host)),
            Some(expected(r"C:\VS", "14.29.30133"))
        );
    }

    #[test]
    fn test_crlf_version_file() {
        let host = MemoryHost::new()
            .with_instance(r"C:\VS")
            .with_file(&format!(r"C:\VS{}", VERSION_FILE), "14.29.30133\r\n")
            .with_file(r"C:\VS\VC\Tools\MSVC\14.29.30133\lib\x64\vcruntime.lib", "");

        assert_eq!(
            find_with_setup_query(&Host::uniform(&host)),
            Some(expected(r"C:\VS", "14.29.30133"))
        );
    }

    #[test]
    fn test_setup_service_unavailable() {
        let host = with_msvc(MemoryHost::new(), r"C:\VS", "14.29.30133", true);
        assert_eq!(find_with_setup_query(&Host::uniform(&host)), None);
    }

    #[test]
    fn test_legacy_order_prefers_newest_usable() {
        let host = MemoryHost::new()
            .with_registry_value(registry::VS7_KEY, "14.0", r"C:\VS14\")
            .with_registry_value(registry::VS7_KEY, "12.0", r"C:\VS12\")
            .with_registry_value(registry::VS7_KEY, "10.0", r"C:\VS10\")
            .with_file(r"C:\VS12\VC\Lib\amd64\vcruntime.lib", "")
            .with_file(r"C:\VS10\VC\Lib\amd64\vcruntime.lib", "");

        assert_eq!(
            find_with_legacy_registry(&Host::uniform(&host)),
            Some(Toolchain {
                executable_path: OsString::from(r"C:\VS12\VC\bin"),
                library_path: OsString::from(r"C:\VS12\VC\Lib\amd64"),
            })
        );
    }

    #[test]
    fn test_legacy_skips_non_string_value() {
        let host = MemoryHost::new()
            .with_registry_multi_string(registry::VS7_KEY, "14.0", &[r"C:\VS14\"])
            .with_registry_value(registry::VS7_KEY, "12.0", r"C:\VS12\")
            .with_file(r"C:\VS14\VC\Lib\amd64\vcruntime.lib", "")
            .with_file(r"C:\VS12\VC\Lib\amd64\vcruntime.lib", "");

        assert_eq!(
            find_with_legacy_registry(&Host::uniform(&host)),
            Some(Toolchain {
                executable_path: OsString::from(r"C:\VS12\VC\bin"),
                library_path: OsString::from(r"C:\VS12\VC\Lib\amd64"),
            })
        );
    }

    #[test]
    fn test_legacy_key_missing() {
        let host = MemoryHost::new().with_file(r"C:\VS14\VC\Lib\amd64\vcruntime.lib", "");
        assert_eq!(find_with_legacy_registry(&Host::uniform(&host)), None);
    }

    #[test]
    fn test_falls_back_to_legacy_registry() {
        let host = MemoryHost::new()
            .with_setup_service()
            .with_registry_value(registry::VS7_KEY, "14.0", r"C:\OldVS\")
            .with_file(r"C:\OldVS\VC\Lib\amd64\vcruntime.lib", "");

        assert_eq!(
            find_visual_studio(&Host::uniform(&host)),
            Some(Toolchain {
                executable_path: OsString::from(r"C:\OldVS\VC\bin"),
                library_path: OsString::from(r"C:\OldVS\VC\Lib\amd64"),
            })
        );
    }

    #[test]
    fn test_setup_match_skips_legacy_registry() {
        let host = MemoryHost::new()
            .with_instance(r"C:\VS")
            .with_registry_value(registry::VS7_KEY, "14.0", r"C:\OldVS\")
            .with_file(r"C:\OldVS\VC\Lib\amd64\vcruntime.lib", "");
        let host = with_msvc(host, r"C:\VS", "14.29.30133", true);

        assert_eq!(
            find_visual_studio(&Host::uniform(&host)),
            Some(expected(r"C:\VS", "14.29.30133"))
        );
    }
}
