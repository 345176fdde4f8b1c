use crate::ports::{DnsResolver, ZoneTransferClient};
use crate::services::RetryingResolver;
use dns_kraken_domain::{
    DomainError, QueryTarget, RecordType, RetryPolicy, ZoneTransferAttempt, ZoneTransferOutcome,
};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const DEFAULT_AXFR_PORT: u16 = 53;

/// Asks every authoritative nameserver of a zone for a full transfer.
pub struct ZoneTransferUseCase {
    resolver: RetryingResolver,
    client: Arc<dyn ZoneTransferClient>,
    port: u16,
}

impl ZoneTransferUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>, client: Arc<dyn ZoneTransferClient>) -> Self {
        Self {
            resolver: RetryingResolver::new(resolver, Arc::new(RetryPolicy::no_retry())),
            client,
            port: DEFAULT_AXFR_PORT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Policy for the NS and address lookups; the transfers themselves are
    /// attempted once.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.resolver = self.resolver.with_policy(Arc::new(policy));
        self
    }

    /// One attempt per NS record, in the order the NS answer listed them.
    ///
    /// Fails as a whole only when the NS lookup itself fails.
    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<Vec<ZoneTransferAttempt>, DomainError> {
        let zone = QueryTarget::new(domain, RecordType::NS)?;
        let ns = self.resolver.resolve(&zone).await.result;

        if !ns.is_success() {
            warn!(domain = %zone.host(), outcome = %ns.outcome(), "NS lookup failed");
            return Err(DomainError::NameserverLookupFailed {
                domain: zone.host().to_string(),
                outcome: ns.outcome(),
            });
        }

        let mut attempts = Vec::with_capacity(ns.records().len());
        for record in ns.records() {
            let nameserver: Arc<str> = Arc::from(record.as_str());
            attempts.push(self.attempt_transfer(&zone, nameserver).await);
        }

        info!(
            domain = %zone.host(),
            servers = attempts.len(),
            succeeded = attempts.iter().filter(|a| a.is_success()).count(),
            "Zone transfer probing finished"
        );

        Ok(attempts)
    }

    async fn attempt_transfer(&self, zone: &QueryTarget, nameserver: Arc<str>) -> ZoneTransferAttempt {
        let address = match self.nameserver_address(&nameserver).await {
            Ok(address) => address,
            Err(reason) => {
                warn!(nameserver = %nameserver, reason = %reason, "Nameserver address lookup failed");
                return ZoneTransferAttempt {
                    nameserver,
                    address: None,
                    outcome: ZoneTransferOutcome::Failure(reason),
                };
            }
        };

        let server = SocketAddr::new(address, self.port);
        let outcome = match self.client.transfer(zone, server).await {
            Ok(records) => {
                info!(nameserver = %nameserver, records = records.len(), "Zone transfer succeeded");
                ZoneTransferOutcome::Success(records)
            }
            Err(e) => {
                info!(nameserver = %nameserver, error = %e, "Zone transfer failed");
                ZoneTransferOutcome::Failure(e.to_string())
            }
        };

        ZoneTransferAttempt {
            nameserver,
            address: Some(address),
            outcome,
        }
    }

    /// First A record of the nameserver.
    async fn nameserver_address(&self, nameserver: &str) -> Result<IpAddr, String> {
        let target = QueryTarget::new(nameserver, RecordType::A).map_err(|e| e.to_string())?;
        let result = self.resolver.resolve(&target).await.result;

        let first = result
            .records()
            .first()
            .ok_or_else(|| format!("address lookup failed: {}", result.outcome()))?;

        first
            .as_str()
            .parse::<IpAddr>()
            .map_err(|_| format!("address lookup returned '{first}'"))
    }
}
