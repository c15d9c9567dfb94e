use super::{SetupInstances, SetupQuery};
use crate::core::{ProbeError, ProbeResult};

/// Installer query service reached through the Visual Studio setup
/// configuration COM server.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComSetupQuery;

#[cfg(windows)]
#[allow(dead_code, non_snake_case, clippy::upper_case_acronyms)]
mod imp {
    use super::*;
    use crate::host::{SetupInstance, com};
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;
    use windows::Win32::Foundation::{FILETIME, S_OK};
    use windows::Win32::System::Com::{CLSCTX_INPROC_SERVER, CoCreateInstance};
    use windows_core::{BSTR, GUID, HRESULT, IUnknown, IUnknown_Vtbl, PCWSTR, interface};

    const CLSID_SETUP_CONFIGURATION: GUID =
        GUID::from_u128(0x177f0c4a_1cd3_4de7_a32c_71dbbb9fa36d);

    #[interface("B41463C3-8866-43B5-BC33-2B0676F7F42E")]
    unsafe trait ISetupInstance: IUnknown {
        fn GetInstanceId(&self, instance_id: *mut BSTR) -> HRESULT;
        fn GetInstallDate(&self, install_date: *mut FILETIME) -> HRESULT;
        fn GetInstallationName(&self, name: *mut BSTR) -> HRESULT;
        fn GetInstallationPath(&self, path: *mut BSTR) -> HRESULT;
        fn GetInstallationVersion(&self, version: *mut BSTR) -> HRESULT;
        fn GetDisplayName(&self, lcid: u32, display_name: *mut BSTR) -> HRESULT;
        fn GetDescription(&self, lcid: u32, description: *mut BSTR) -> HRESULT;
        fn ResolvePath(&self, relative_path: PCWSTR, absolute_path: *mut BSTR) -> HRESULT;
    }

    #[interface("6380BCFF-41D3-4B2E-8B2E-BF8A6810C848")]
    unsafe trait IEnumSetupInstances: IUnknown {
        fn Next(&self, celt: u32, instances: *mut Option<ISetupInstance>, fetched: *mut u32)
        -> HRESULT;
        fn Skip(&self, celt: u32) -> HRESULT;
        fn Reset(&self) -> HRESULT;
        fn Clone(&self, enumerator: *mut Option<IEnumSetupInstances>) -> HRESULT;
    }

    #[interface("42843719-DB4C-46C2-8E7C-64F1816EFD5B")]
    unsafe trait ISetupConfiguration: IUnknown {
        fn EnumInstances(&self, enumerator: *mut Option<IEnumSetupInstances>) -> HRESULT;
        fn GetInstanceForCurrentProcess(&self, instance: *mut Option<ISetupInstance>) -> HRESULT;
        fn GetInstanceForPath(&self, path: PCWSTR, instance: *mut Option<ISetupInstance>)
        -> HRESULT;
    }

    struct ComSetupInstance(ISetupInstance);

    impl SetupInstance for ComSetupInstance {
        fn installation_path(&self) -> ProbeResult<OsString> {
            let mut path = BSTR::new();

            unsafe { self.0.GetInstallationPath(&mut path) }
                .ok()
                .map_err(|e| ProbeError::InstanceQueryFailed {
                    operation: "GetInstallationPath",
                    code: e.code().0,
                })?;

            Ok(OsString::from_wide(&path))
        }
    }

    struct InstanceIter {
        enumerator: IEnumSetupInstances,
        _config: ISetupConfiguration,
    }

    impl Iterator for InstanceIter {
        type Item = Box<dyn SetupInstance>;

        fn next(&mut self) -> Option<Self::Item> {
            let mut instance = None;
            let mut fetched = 0u32;

            let hr = unsafe { self.enumerator.Next(1, &mut instance, &mut fetched) };
            if hr != S_OK || fetched < 1 {
                tracing::trace!("Setup instance enumeration ended (0x{:08X})", hr.0 as u32);
                return None;
            }

            instance.map(|instance| Box::new(ComSetupInstance(instance)) as Box<dyn SetupInstance>)
        }
    }

    impl SetupQuery for ComSetupQuery {
        fn enum_instances(&self) -> ProbeResult<SetupInstances<'_>> {
            com::initialize();

            let config: ISetupConfiguration = unsafe {
                CoCreateInstance(&CLSID_SETUP_CONFIGURATION, None, CLSCTX_INPROC_SERVER)
            }
            .map_err(|e| ProbeError::SetupServiceUnavailable { code: e.code().0 })?;

            let mut enumerator = None;
            unsafe { config.EnumInstances(&mut enumerator) }
                .ok()
                .map_err(|e| ProbeError::InstanceQueryFailed {
                    operation: "EnumInstances",
                    code: e.code().0,
                })?;

            let enumerator = enumerator.ok_or(ProbeError::InstanceQueryFailed {
                operation: "EnumInstances",
                code: 0,
            })?;

            Ok(Box::new(InstanceIter {
                enumerator,
                _config: config,
            }))
        }
    }
}

#[cfg(not(windows))]
impl SetupQuery for ComSetupQuery {
    fn enum_instances(&self) -> ProbeResult<SetupInstances<'_>> {
        Err(ProbeError::unsupported(
            "the Visual Studio setup configuration service requires Windows",
        ))
    }
}
