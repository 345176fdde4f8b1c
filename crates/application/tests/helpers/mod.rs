pub mod mock_resolver;
pub mod mock_zone_transfer;

#[allow(unused_imports)]
pub use mock_resolver::MockResolver;
#[allow(unused_imports)]
pub use mock_zone_transfer::{a_record, soa_record, MockZoneTransferClient};
