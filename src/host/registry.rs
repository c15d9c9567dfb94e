use super::{Registry, RegistryKey};
use crate::core::{ProbeError, ProbeResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRegistry;

#[cfg(windows)]
mod imp {
    use super::*;
    use std::ffi::OsString;
    use std::io;
    use winreg::RegKey;
    use winreg::enums::{
        HKEY_LOCAL_MACHINE, KEY_ENUMERATE_SUB_KEYS, KEY_QUERY_VALUE, KEY_WOW64_32KEY, REG_SZ,
    };
    use winreg::types::FromRegValue;

    struct NativeKey(RegKey);

    impl RegistryKey for NativeKey {
        fn string_value(&self, name: &str) -> ProbeResult<OsString> {
            let raw = self
                .0
                .get_raw_value(name)
                .map_err(|e| ProbeError::registry_value(name, e))?;

            if raw.vtype != REG_SZ {
                return Err(ProbeError::registry_value(
                    name,
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("expected REG_SZ, found {:?}", raw.vtype),
                    ),
                ));
            }

            OsString::from_reg_value(&raw).map_err(|e| ProbeError::registry_value(name, e))
        }

        fn subkey_names(&self) -> ProbeResult<Vec<String>> {
            self.0
                .enum_keys()
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ProbeError::registry_value("<subkeys>", e))
        }
    }

    impl Registry for NativeRegistry {
        fn open_key(&self, path: &str) -> ProbeResult<Box<dyn RegistryKey + '_>> {
            let key = RegKey::predef(HKEY_LOCAL_MACHINE)
                .open_subkey_with_flags(
                    path,
                    KEY_QUERY_VALUE | KEY_WOW64_32KEY | KEY_ENUMERATE_SUB_KEYS,
                )
                .map_err(|e| ProbeError::registry_key(path, e))?;

            Ok(Box::new(NativeKey(key)))
        }
    }
}

#[cfg(not(windows))]
impl Registry for NativeRegistry {
    fn open_key(&self, _path: &str) -> ProbeResult<Box<dyn RegistryKey + '_>> {
        Err(ProbeError::unsupported(
            "the Windows registry is only available on Windows hosts",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn test_open_key_unsupported_off_windows() {
        let err = match NativeRegistry.open_key(r"SOFTWARE\Microsoft") {
            Err(e) => e,
            Ok(_) => panic!("registry should be unavailable"),
        };

        assert!(matches!(err, ProbeError::UnsupportedPlatform { .. }));
    }

    #[cfg(windows)]
    #[test]
    fn test_missing_key_is_error() {
        assert!(
            NativeRegistry
                .open_key(r"SOFTWARE\vs_locate\definitely\not\here")
                .is_err()
        );
    }
}
