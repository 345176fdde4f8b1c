//! Configuration module for DNS Kraken
//!
//! All sections are optional in the TOML file; missing fields take the
//! defaults documented on each struct.
//! - `root`: Main configuration and CLI overrides
//! - `resolver`: Nameservers, timeouts, EDNS and AXFR settings
//! - `discovery`: Brute-force concurrency, retry and wildcard probing
//! - `ptr`: Reverse sweep limits
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod discovery;
pub mod errors;
pub mod logging;
pub mod ptr;
pub mod resolver;
pub mod root;

pub use discovery::DiscoveryConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use ptr::PtrConfig;
pub use resolver::{parse_nameserver, ResolverConfig};
pub use root::{CliOverrides, Config};
