use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryOptions {
    /// When set, a `KitsRoot10` entry without any usable version directory
    /// no longer ends SDK discovery; the Windows 8.1 kit is probed next.
    pub windows81_after_empty_kit10: bool,
}

impl DiscoveryOptions {
    pub const fn new() -> Self {
        Self {
            windows81_after_empty_kit10: false,
        }
    }

    pub const fn windows81_after_empty_kit10(mut self, enabled: bool) -> Self {
        self.windows81_after_empty_kit10 = enabled;
        self
    }
}
