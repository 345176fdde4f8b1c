mod discover_subdomains;
mod event;
mod job;

pub use discover_subdomains::SubdomainDiscovery;
pub use event::{DiscoveryEvent, DiscoveryStats};
pub use job::DiscoveryJob;
