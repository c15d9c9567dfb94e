mod error;
mod types;

pub use error::{ProbeError, ProbeResult};
pub use types::{DiscoveryResult, SdkVersion};
