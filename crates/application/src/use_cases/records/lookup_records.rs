use crate::ports::DnsResolver;
use crate::services::RetryingResolver;
use dns_kraken_domain::{DomainError, QueryTarget, RecordType, ResolutionResult, RetryPolicy};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Record types reported by a standard enumeration.
pub const ENUMERATE_TYPES: [RecordType; 7] = [
    RecordType::A,
    RecordType::AAAA,
    RecordType::MX,
    RecordType::NS,
    RecordType::SOA,
    RecordType::SPF,
    RecordType::TXT,
];

/// Record types asked of the external resolver in a cache check.
pub const CACHED_TYPES: [RecordType; 3] = [RecordType::A, RecordType::AAAA, RecordType::CNAME];

/// Well-known service labels queried for SRV records.
pub const SRV_SERVICES: [&str; 7] = [
    "_sip._tcp",
    "_sip._udp",
    "_xmpp-server._tcp",
    "_xmpp-client._tcp",
    "_http._tcp",
    "_ldap._tcp",
    "_ftp._tcp",
];

pub struct LookupRecordsUseCase {
    resolver: RetryingResolver,
}

impl LookupRecordsUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>, retry_policy: RetryPolicy) -> Self {
        Self {
            resolver: RetryingResolver::new(resolver, Arc::new(retry_policy)),
        }
    }

    /// One result per record type, in the order given.
    #[instrument(skip(self, record_types))]
    pub async fn execute(
        &self,
        name: &str,
        record_types: &[RecordType],
    ) -> Result<Vec<ResolutionResult>, DomainError> {
        let targets = record_types
            .iter()
            .map(|&record_type| QueryTarget::new(name, record_type))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.resolve_all(targets).await)
    }

    /// SRV lookups of `service.domain` for each service label.
    #[instrument(skip(self, services))]
    pub async fn execute_services(
        &self,
        domain: &str,
        services: &[&str],
    ) -> Result<Vec<ResolutionResult>, DomainError> {
        let targets = services
            .iter()
            .map(|service| QueryTarget::subdomain(service, domain, RecordType::SRV))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.resolve_all(targets).await)
    }

    async fn resolve_all(&self, targets: Vec<QueryTarget>) -> Vec<ResolutionResult> {
        let resolutions = join_all(targets.iter().map(|t| self.resolver.resolve(t))).await;

        resolutions
            .into_iter()
            .map(|resolution| {
                debug!(
                    target = %resolution.result.target(),
                    outcome = %resolution.result.outcome(),
                    attempts = resolution.attempts,
                    "Lookup finished"
                );
                resolution.result
            })
            .collect()
    }
}
