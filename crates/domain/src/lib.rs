//! DNS Kraken Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod resolution;
pub mod resolver_options;
pub mod retry;
pub mod validators;
pub mod wildcard;
pub mod zone_transfer;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::QueryTarget;
pub use dns_record::{RData, RecordType};
pub use errors::DomainError;
pub use resolution::{QueryOutcome, ResolutionResult};
pub use resolver_options::{EdnsOptions, ResolverOptions};
pub use retry::RetryPolicy;
pub use wildcard::WildcardBaseline;
pub use zone_transfer::{ZoneData, ZoneRecord, ZoneTransferAttempt, ZoneTransferOutcome};
