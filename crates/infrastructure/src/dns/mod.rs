pub mod forwarding;
pub mod resolver;
pub mod transport;
pub mod zone_transfer;

pub use resolver::UpstreamResolver;
pub use zone_transfer::{AxfrClient, DEFAULT_MAX_RECORDS};
