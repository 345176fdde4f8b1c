mod lookup_records;
mod reverse_lookup;

pub use lookup_records::{LookupRecordsUseCase, CACHED_TYPES, ENUMERATE_TYPES, SRV_SERVICES};
pub use reverse_lookup::{ReverseLookup, ReverseLookupUseCase, DEFAULT_MAX_HOSTS};
