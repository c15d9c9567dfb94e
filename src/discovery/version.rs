use crate::config::constants::sdk::KIT81_PREFIX;
use std::ffi::{OsStr, OsString};

/// Directory naming scheme of a Windows kit `Lib` folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPattern {
    /// `10.0.19041.0`
    FourPart,
    /// `winv6.3`
    WinV,
}

impl VersionPattern {
    pub const fn width(&self) -> usize {
        match self {
            Self::FourPart => 4,
            Self::WinV => 2,
        }
    }

    /// Parses the leading version of `name`. Text after the last required
    /// component is ignored; unused trailing slots are zero.
    pub fn parse(&self, name: &str) -> Option<[u32; 4]> {
        let rest = match self {
            Self::FourPart => name,
            Self::WinV => name.strip_prefix(KIT81_PREFIX)?,
        };

        let mut version = [0u32; 4];
        let mut rest = rest;

        for (index, slot) in version.iter_mut().take(self.width()).enumerate() {
            if index > 0 {
                rest = rest.strip_prefix('.')?;
            }

            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 {
                return None;
            }

            *slot = rest[..digits].parse().ok()?;
            rest = &rest[digits..];
        }

        Some(version)
    }
}

/// Best version seen so far during one directory scan.
#[derive(Debug, Clone, Default)]
pub struct VersionCandidate {
    version: [u32; 4],
    best: Option<OsString>,
}

impl VersionCandidate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> &[u32; 4] {
        &self.version
    }

    pub fn best(&self) -> Option<&OsStr> {
        self.best.as_deref()
    }

    /// Adopts `full_path` when `short_name` parses under `pattern` and is
    /// strictly newer than the held version. Ties keep the earlier entry.
    pub fn evaluate(&mut self, pattern: VersionPattern, short_name: &OsStr, full_path: &OsStr) {
        let Some(version) = short_name.to_str().and_then(|name| pattern.parse(name)) else {
            tracing::trace!("Ignoring {}: not a version directory", short_name.to_string_lossy());
            return;
        };

        let width = pattern.width();
        if self.best.is_some() && version[..width] <= self.version[..width] {
            return;
        }

        self.best = Some(full_path.to_os_string());
        self.version = version;
    }

    pub fn into_best(self) -> Option<OsString> {
        self.best
    }
}
