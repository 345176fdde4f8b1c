use async_trait::async_trait;
use dns_kraken_domain::{DomainError, QueryTarget, ZoneData};
use std::net::SocketAddr;

#[async_trait]
pub trait ZoneTransferClient: Send + Sync {
    /// Requests a full transfer (AXFR) of `zone` from `server`.
    ///
    /// Refusal, timeout, connection failure and malformed streams are all
    /// errors; a successful result holds every record, both SOA included.
    async fn transfer(&self, zone: &QueryTarget, server: SocketAddr)
        -> Result<ZoneData, DomainError>;
}
