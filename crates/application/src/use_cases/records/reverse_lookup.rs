use crate::ports::DnsResolver;
use crate::services::RetryingResolver;
use dns_kraken_domain::{DomainError, QueryTarget, ResolutionResult, RetryPolicy};
use futures::{stream, Stream, StreamExt};
use ipnetwork::IpNetwork;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_CONCURRENCY: usize = 20;
pub const DEFAULT_MAX_HOSTS: u64 = 65_536;

#[derive(Debug, Clone)]
pub struct ReverseLookup {
    pub address: IpAddr,
    pub result: ResolutionResult,
    pub attempts: u32,
}

/// PTR lookups over a single address or a CIDR block.
pub struct ReverseLookupUseCase {
    resolver: RetryingResolver,
    concurrency: usize,
    max_hosts: u64,
}

impl ReverseLookupUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>, retry_policy: RetryPolicy) -> Self {
        Self {
            resolver: RetryingResolver::new(resolver, Arc::new(retry_policy)),
            concurrency: DEFAULT_CONCURRENCY,
            max_hosts: DEFAULT_MAX_HOSTS,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_max_hosts(mut self, max_hosts: u64) -> Self {
        self.max_hosts = max_hosts;
        self
    }

    /// Parses `input` as an address or CIDR block.
    pub fn parse_network(input: &str) -> Result<IpNetwork, DomainError> {
        let input = input.trim();
        if let Ok(address) = input.parse::<IpAddr>() {
            return Ok(IpNetwork::from(address));
        }
        input
            .parse::<IpNetwork>()
            .map_err(|e| DomainError::InvalidIpAddress(format!("{input}: {e}")))
    }

    /// Lookups in address order, at most `concurrency` in flight.
    ///
    /// Fails before any query when the block holds more than `max_hosts`
    /// addresses.
    pub fn execute(
        &self,
        input: &str,
    ) -> Result<impl Stream<Item = ReverseLookup> + Send + 'static, DomainError> {
        let network = Self::parse_network(input)?;
        let hosts = host_count(&network);
        if hosts > u128::from(self.max_hosts) {
            return Err(DomainError::NetworkTooLarge {
                hosts,
                limit: self.max_hosts,
            });
        }

        info!(network = %network, hosts = hosts as u64, "Starting reverse lookups");

        let resolver = self.resolver.clone();
        Ok(stream::iter(network.iter())
            .map(move |address| {
                let resolver = resolver.clone();
                async move {
                    let resolution = resolver.resolve(&QueryTarget::reverse(address)).await;
                    ReverseLookup {
                        address,
                        result: resolution.result,
                        attempts: resolution.attempts,
                    }
                }
            })
            .buffered(self.concurrency))
    }
}

fn host_count(network: &IpNetwork) -> u128 {
    let bits: u32 = if network.is_ipv4() { 32 } else { 128 };
    let host_bits = bits - u32::from(network.prefix());
    if host_bits >= 128 {
        u128::MAX
    } else {
        1u128 << host_bits
    }
}
