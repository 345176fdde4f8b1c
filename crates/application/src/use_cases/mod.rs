pub mod discovery;
pub mod records;
pub mod wildcard;
pub mod zone_transfer;

pub use discovery::{DiscoveryEvent, DiscoveryJob, DiscoveryStats, SubdomainDiscovery};
pub use records::{
    LookupRecordsUseCase, ReverseLookup, ReverseLookupUseCase, CACHED_TYPES, ENUMERATE_TYPES,
    SRV_SERVICES,
};
pub use wildcard::DetectWildcardUseCase;
pub use zone_transfer::ZoneTransferUseCase;
