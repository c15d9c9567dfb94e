pub mod constants;
mod options;

pub use options::DiscoveryOptions;
