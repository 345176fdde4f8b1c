use anyhow::Context;
use dns_kraken_application::ports::{DnsResolver, ZoneTransferClient};
use dns_kraken_application::use_cases::{
    DetectWildcardUseCase, DiscoveryJob, LookupRecordsUseCase, ReverseLookupUseCase, SubdomainDiscovery,
    ZoneTransferUseCase,
};
use dns_kraken_domain::{Config, ResolverOptions, RetryPolicy};
use dns_kraken_infrastructure::dns::{AxfrClient, UpstreamResolver};
use futures::Stream;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Wires configuration to the use cases. Every use case gets its resolver
/// passed in; nothing is process-global.
pub struct Services {
    config: Config,
    cancel: CancellationToken,
}

impl Services {
    pub fn new(config: Config, cancel: CancellationToken) -> Self {
        Self { config, cancel }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cancel(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Resolver for the configured nameservers, or the system ones when
    /// none are configured.
    pub async fn resolver(&self) -> anyhow::Result<Arc<dyn DnsResolver>> {
        let resolver_config = &self.config.resolver;
        let nameservers = resolver_config.nameserver_addrs()?;

        let resolver = if nameservers.is_empty() {
            UpstreamResolver::system(resolver_config.timeout())
                .await
                .context("no nameserver given and the system resolvers are unavailable")?
        } else {
            UpstreamResolver::new(ResolverOptions::new(nameservers, resolver_config.timeout()))?
        };

        info!(nameservers = ?resolver.nameservers(), "Resolver ready");
        Ok(Arc::new(resolver))
    }

    /// Resolver pinned to the external `cached_nameserver`, EDNS with DO set.
    pub fn cached_resolver(&self) -> anyhow::Result<Arc<dyn DnsResolver>> {
        let options = self.config.resolver.cached_options()?;
        Ok(Arc::new(UpstreamResolver::new(options)?))
    }

    pub fn retry_policy(&self) -> anyhow::Result<RetryPolicy> {
        Ok(self.config.discovery.retry_policy()?)
    }

    pub fn lookup_records(
        &self,
        resolver: Arc<dyn DnsResolver>,
    ) -> anyhow::Result<LookupRecordsUseCase> {
        Ok(LookupRecordsUseCase::new(resolver, self.retry_policy()?))
    }

    pub fn reverse_lookup(
        &self,
        resolver: Arc<dyn DnsResolver>,
    ) -> anyhow::Result<ReverseLookupUseCase> {
        Ok(ReverseLookupUseCase::new(resolver, self.retry_policy()?)
            .with_concurrency(self.config.ptr.concurrency)
            .with_max_hosts(self.config.ptr.max_hosts))
    }

    pub fn zone_transfer(
        &self,
        resolver: Arc<dyn DnsResolver>,
    ) -> anyhow::Result<ZoneTransferUseCase> {
        let client: Arc<dyn ZoneTransferClient> =
            Arc::new(AxfrClient::new(self.config.resolver.axfr_timeout()));
        Ok(ZoneTransferUseCase::new(resolver, client)
            .with_port(self.config.resolver.axfr_port)
            .with_retry_policy(self.retry_policy()?))
    }

    /// Wildcard detection under the discovery retry policy, each attempt
    /// bounded by the resolver timeout.
    pub fn wildcard_detector(
        &self,
        resolver: Arc<dyn DnsResolver>,
    ) -> anyhow::Result<DetectWildcardUseCase> {
        Ok(DetectWildcardUseCase::new(resolver)
            .with_samples(self.config.discovery.wildcard_samples)
            .with_retry_policy(self.retry_policy()?)
            .with_attempt_timeout(Some(self.config.resolver.timeout())))
    }

    pub fn discovery_job<S>(&self, domain: &str, candidates: S) -> anyhow::Result<DiscoveryJob<S>>
    where
        S: Stream<Item = String>,
    {
        Ok(DiscoveryJob::new(domain, candidates)?
            .with_concurrency(self.config.discovery.concurrency)?
            .with_retry_policy(self.retry_policy()?)
            .with_attempt_timeout(self.config.resolver.timeout()))
    }

    pub fn discovery(&self, resolver: Arc<dyn DnsResolver>) -> SubdomainDiscovery {
        SubdomainDiscovery::new(resolver).with_cancellation(self.cancel.clone())
    }
}
