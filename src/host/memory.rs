use super::{
    DirEntryInfo, FileSystem, Registry, RegistryKey, SetupInstance, SetupInstances, SetupQuery,
};
use crate::core::{ProbeError, ProbeResult};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::Path;

const REGDB_E_CLASSNOTREG: i32 = 0x80040154u32 as i32;
const E_FAIL: i32 = 0x80004005u32 as i32;

#[derive(Debug, Clone)]
enum MemoryValue {
    Sz(OsString),
    MultiSz(Vec<OsString>),
}

/// In-memory stand-in for a Windows host. Paths use `\` separators and are
/// matched verbatim; directories are listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    dirs: Vec<String>,
    files: Vec<(String, String)>,
    registry: BTreeMap<String, BTreeMap<String, MemoryValue>>,
    setup: Option<Vec<Option<OsString>>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory together with all of its ancestors.
    pub fn with_dir(mut self, path: &str) -> Self {
        self.insert_dir(path);
        self
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        if let Some((parent, _)) = path.rsplit_once('\\') {
            self.insert_dir(parent);
        }

        self.files.retain(|(existing, _)| existing != path);
        self.files.push((path.to_string(), contents.to_string()));
        self
    }

    pub fn with_registry_key(mut self, key: &str) -> Self {
        self.registry.entry(key.to_string()).or_default();
        self
    }

    pub fn with_registry_value(mut self, key: &str, name: &str, value: &str) -> Self {
        self.registry
            .entry(key.to_string())
            .or_default()
            .insert(name.to_string(), MemoryValue::Sz(OsString::from(value)));
        self
    }

    /// Stores a `REG_MULTI_SZ` value, which string reads reject.
    pub fn with_registry_multi_string(mut self, key: &str, name: &str, values: &[&str]) -> Self {
        self.registry.entry(key.to_string()).or_default().insert(
            name.to_string(),
            MemoryValue::MultiSz(values.iter().map(OsString::from).collect()),
        );
        self
    }

    /// Makes the installer service reachable, initially with no instances.
    pub fn with_setup_service(mut self) -> Self {
        self.setup.get_or_insert_with(Vec::new);
        self
    }

    pub fn with_instance(mut self, installation_path: &str) -> Self {
        self.setup
            .get_or_insert_with(Vec::new)
            .push(Some(OsString::from(installation_path)));
        self
    }

    /// Adds an instance whose installation path cannot be queried.
    pub fn with_broken_instance(mut self) -> Self {
        self.setup.get_or_insert_with(Vec::new).push(None);
        self
    }

    fn insert_dir(&mut self, path: &str) {
        let path = path.trim_end_matches('\\');
        let mut end = 0;

        for component in path.split('\\') {
            end += component.len();
            let prefix = &path[..end];

            if !prefix.is_empty() && !self.dirs.iter().any(|d| d == prefix) {
                self.dirs.push(prefix.to_string());
            }

            end += 1;
        }
    }

    fn child_name<'a>(parent: &str, candidate: &'a str) -> Option<&'a str> {
        let rest = candidate.strip_prefix(parent)?.strip_prefix('\\')?;

        if rest.is_empty() || rest.contains('\\') {
            None
        } else {
            Some(rest)
        }
    }

    fn key_path(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }
}

impl FileSystem for MemoryHost {
    fn file_exists(&self, path: &Path) -> bool {
        let path = Self::key_path(path);
        self.files.iter().any(|(existing, _)| *existing == path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let key = Self::key_path(path);
        let key = key.trim_end_matches('\\');

        if !self.dirs.iter().any(|d| d == key) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", key),
            ));
        }

        let dirs = self
            .dirs
            .iter()
            .filter_map(|d| Self::child_name(key, d))
            .map(DirEntryInfo::directory);

        let files = self
            .files
            .iter()
            .filter_map(|(f, _)| Self::child_name(key, f))
            .map(DirEntryInfo::file);

        Ok(dirs.chain(files).collect())
    }

    fn read_first_line(&self, path: &Path) -> io::Result<String> {
        let key = Self::key_path(path);

        let contents = self
            .files
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, contents)| contents)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;

        if contents.is_empty() {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
        }

        let end = contents.find('\n').map(|i| i + 1).unwrap_or(contents.len());
        Ok(contents[..end].to_string())
    }
}

struct MemoryKey<'a> {
    host: &'a MemoryHost,
    path: &'a str,
}

impl RegistryKey for MemoryKey<'_> {
    fn string_value(&self, name: &str) -> ProbeResult<OsString> {
        let value = self
            .host
            .registry
            .get(self.path)
            .and_then(|values| values.get(name))
            .ok_or_else(|| ProbeError::registry_value(name, io::ErrorKind::NotFound.into()))?;

        match value {
            MemoryValue::Sz(text) => Ok(text.clone()),
            MemoryValue::MultiSz(_) => Err(ProbeError::registry_value(
                name,
                io::Error::new(io::ErrorKind::InvalidData, "expected REG_SZ, found REG_MULTI_SZ"),
            )),
        }
    }

    fn subkey_names(&self) -> ProbeResult<Vec<String>> {
        Ok(self
            .host
            .registry
            .keys()
            .filter_map(|k| MemoryHost::child_name(self.path, k))
            .map(str::to_string)
            .collect())
    }
}

impl Registry for MemoryHost {
    fn open_key(&self, path: &str) -> ProbeResult<Box<dyn RegistryKey + '_>> {
        let (path, _) = self
            .registry
            .get_key_value(path)
            .ok_or_else(|| ProbeError::registry_key(path, io::ErrorKind::NotFound.into()))?;

        Ok(Box::new(MemoryKey {
            host: self,
            path: path.as_str(),
        }))
    }
}

struct MemoryInstance(Option<OsString>);

impl SetupInstance for MemoryInstance {
    fn installation_path(&self) -> ProbeResult<OsString> {
        self.0.clone().ok_or(ProbeError::InstanceQueryFailed {
            operation: "GetInstallationPath",
            code: E_FAIL,
        })
    }
}

impl SetupQuery for MemoryHost {
    fn enum_instances(&self) -> ProbeResult<SetupInstances<'_>> {
        let instances = self.setup.as_ref().ok_or(ProbeError::SetupServiceUnavailable {
            code: REGDB_E_CLASSNOTREG,
        })?;

        Ok(Box::new(instances.iter().map(|path| {
            Box::new(MemoryInstance(path.clone())) as Box<dyn SetupInstance>
        })))
    }
}
