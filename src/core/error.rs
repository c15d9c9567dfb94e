use std::fmt;
use std::io;

pub type ProbeResult<T> = Result<T, ProbeError>;

#[derive(Debug)]
pub enum ProbeError {
    RegistryKeyUnavailable {
        path: String,
        source: io::Error,
    },
    RegistryValueUnavailable {
        name: String,
        source: io::Error,
    },
    SetupServiceUnavailable {
        code: i32,
    },
    InstanceQueryFailed {
        operation: &'static str,
        code: i32,
    },
    UnsupportedPlatform {
        reason: String,
    },
}

impl ProbeError {
    pub fn registry_key(path: impl Into<String>, source: io::Error) -> Self {
        Self::RegistryKeyUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn registry_value(name: impl Into<String>, source: io::Error) -> Self {
        Self::RegistryValueUnavailable {
            name: name.into(),
            source,
        }
    }

    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::RegistryKeyUnavailable { path, source } => {
                write!(f, "Registry key HKLM\\{} could not be opened: {}", path, source)
            }

            ProbeError::RegistryValueUnavailable { name, source } => {
                write!(f, "Registry value '{}' is missing or not a string: {}", name, source)
            }

            ProbeError::SetupServiceUnavailable { code } => {
                write!(
                    f,
                    "Visual Studio setup configuration service unavailable (HRESULT 0x{:08X})",
                    *code as u32
                )
            }

            ProbeError::InstanceQueryFailed { operation, code } => {
                write!(
                    f,
                    "Setup instance query '{}' failed (HRESULT 0x{:08X})",
                    operation, *code as u32
                )
            }

            ProbeError::UnsupportedPlatform { reason } => {
                write!(f, "Unsupported platform: {}", reason)
            }
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::RegistryKeyUnavailable { source, .. } => Some(source),
            ProbeError::RegistryValueUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_registry_key_display() {
        let error = ProbeError::registry_key(
            r"SOFTWARE\Microsoft\Windows Kits\Installed Roots",
            io::Error::from(io::ErrorKind::NotFound),
        );

        let message = error.to_string();
        assert!(message.contains(r"HKLM\SOFTWARE\Microsoft\Windows Kits"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_setup_service_display_formats_hresult() {
        let error = ProbeError::SetupServiceUnavailable {
            code: 0x80040154u32 as i32,
        };

        assert!(error.to_string().contains("0x80040154"));
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ProbeError>();
        assert_sync::<ProbeError>();
    }
}
