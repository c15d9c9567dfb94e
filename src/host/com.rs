use std::cell::Cell;
use windows::Win32::System::Com::{COINIT_APARTMENTTHREADED, CoInitializeEx};

thread_local! {
    static INITIALIZED: Cell<bool> = const { Cell::new(false) };
}

/// Initializes COM on the calling thread the first time it is called there.
/// The apartment is left alive for the embedding application to tear down.
pub fn initialize() {
    INITIALIZED.with(|initialized| {
        if initialized.get() {
            return;
        }

        // S_FALSE and RPC_E_CHANGED_MODE both leave COM usable on this thread.
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        if hr.is_err() {
            tracing::debug!("CoInitializeEx returned 0x{:08X}", hr.0 as u32);
        }

        initialized.set(true);
    });
}
