mod dns_resolver;
mod zone_transfer;

pub use dns_resolver::DnsResolver;
pub use zone_transfer::ZoneTransferClient;
