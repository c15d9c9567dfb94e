use super::concat::concat;
use crate::config::constants::{HIDDEN_PREFIX, PATH_SEPARATOR};
use crate::host::FileSystem;
use std::ffi::OsStr;
use std::path::Path;

/// Calls `visit(short_name, full_path)` for each immediate subdirectory of
/// `dir` that does not start with a dot, in enumeration order.
///
/// Returns `false` when `dir` itself cannot be listed.
pub fn visit_subdirectories<F>(filesystem: &dyn FileSystem, dir: &OsStr, mut visit: F) -> bool
where
    F: FnMut(&OsStr, &OsStr),
{
    let entries = match filesystem.list_dir(Path::new(dir)) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot list {}: {}", dir.to_string_lossy(), e);
            return false;
        }
    };

    for entry in entries {
        if !entry.is_dir || is_hidden(&entry.name) {
            continue;
        }

        let full_path = concat(&[&dir, &PATH_SEPARATOR, &entry.name]);
        visit(&entry.name, &full_path);
    }

    true
}

fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&(HIDDEN_PREFIX as u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use std::ffi::OsString;

    fn collect(host: &MemoryHost, dir: &str) -> (bool, Vec<(OsString, OsString)>) {
        let mut seen = Vec::new();
        let opened = visit_subdirectories(host, OsStr::new(dir), |name, full| {
            seen.push((name.to_os_string(), full.to_os_string()));
        });
        (opened, seen)
    }

    #[test]
    fn test_visits_only_visible_directories() {
        let host = MemoryHost::new()
            .with_dir(r"C:\Lib\10.0.19041.0")
            .with_dir(r"C:\Lib\.hidden")
            .with_file(r"C:\Lib\10.0.99999.0", "not a directory");

        let (opened, seen) = collect(&host, r"C:\Lib");

        assert!(opened);
        assert_eq!(
            seen,
            vec![(
                OsString::from("10.0.19041.0"),
                OsString::from(r"C:\Lib\10.0.19041.0")
            )]
        );
    }

    #[test]
    fn test_missing_directory_reports_false() {
        let host = MemoryHost::new();
        let (opened, seen) = collect(&host, r"C:\Missing");

        assert!(!opened);
        assert!(seen.is_empty());
    }

    #[test]
    fn test_empty_directory_opens() {
        let host = MemoryHost::new().with_dir(r"C:\Empty");
        let (opened, seen) = collect(&host, r"C:\Empty");

        assert!(opened);
        assert!(seen.is_empty());
    }
}
